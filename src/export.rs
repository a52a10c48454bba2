//! Writing the diagram to disk

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;

use crate::config::DiagramConfig;
use crate::domain::Scene;
use crate::fl;
use crate::render::{self, text::FontSet};

/// Paths of the two files produced by a run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifacts {
    pub png: PathBuf,
    pub svg: PathBuf,
}

impl Artifacts {
    pub fn new(dir: &Path, file_stem: &str) -> Self {
        Self {
            png: dir.join(format!("{file_stem}.png")),
            svg: dir.join(format!("{file_stem}.svg")),
        }
    }
}

/// Create the output directory if needed; existing directories are fine
pub fn ensure_output_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))
}

/// Build, render and save the diagram into `dir`
pub fn run(config: &DiagramConfig, dir: &Path) -> anyhow::Result<Artifacts> {
    ensure_output_dir(dir)?;

    let scene = crate::diagram::build(config);
    let fonts = FontSet::load(&scene.font_families);
    save(&scene, &fonts, config, dir)
}

/// Serialize the scene to PNG and SVG under `dir`, replacing existing files
pub fn save(
    scene: &Scene,
    fonts: &FontSet,
    config: &DiagramConfig,
    dir: &Path,
) -> anyhow::Result<Artifacts> {
    let artifacts = Artifacts::new(dir, config.file_stem);

    let image = render::image::render_scene(
        scene,
        fonts,
        config.raster_size(),
        config.raster_scale(),
    )?;
    write_atomic(&artifacts.png, |file| {
        write_png(file, &image, config.dpi).map_err(io::Error::other)
    })?;
    log::info!("Wrote {}", artifacts.png.display());

    let svg = render::svg::render_scene(scene);
    write_atomic(&artifacts.svg, |file| file.write_all(svg.as_bytes()))?;
    log::info!("Wrote {}", artifacts.svg.display());

    Ok(artifacts)
}

/// Write into a temporary file next to `path` and rename it over `path`
fn write_atomic(
    path: &Path,
    write: impl FnOnce(&mut std::fs::File) -> io::Result<()>,
) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut builder = tempfile::Builder::new();
    builder.prefix(".quadglyph-");
    // Temp files default to 0600; let the umask decide like a plain create
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut file = builder
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create a temporary file in {}", dir.display()))?;

    write(file.as_file_mut()).with_context(|| format!("Failed to write {}", path.display()))?;
    file.as_file_mut().flush()?;

    file.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage, dpi: f32) -> Result<(), png::EncodingError> {
    // pHYs stores pixels per meter
    let ppm = (dpi / 0.0254).round() as u32;

    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

/// The line printed after a successful run
pub fn confirmation_message(artifacts: &Artifacts) -> String {
    fl!(
        "diagram-saved",
        png = artifacts.png.display().to_string(),
        svg = artifacts.svg.display().to_string()
    )
}
