//! Fixed configuration for the diagram: colors, sizes and output names

/// Straight-alpha color with float channels in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ShapeColor {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// CSS "green", not full-intensity green
    pub const GREEN: Self = Self::rgb(0.0, 128.0 / 255.0, 0.0);
    pub const GRID: Self = Self::rgb(176.0 / 255.0, 176.0 / 255.0, 176.0 / 255.0);
    pub const LEGEND_EDGE: Self = Self::rgb(0.8, 0.8, 0.8);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with a different opacity
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        ]
    }

    /// `#rrggbb` without the alpha channel, for SVG paint attributes
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Everything about the figure that is fixed at build time
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramConfig {
    /// Figure size in inches (width, height)
    pub figure_size: (f32, f32),
    /// Raster resolution in dots per inch
    pub dpi: f32,
    /// Data range shown on both axes
    pub extent: (f32, f32),
    /// Font families tried in order for labels
    pub font_families: Vec<&'static str>,
    /// Output directory, relative to the working directory
    pub output_dir: &'static str,
    /// File name shared by both outputs, without extension
    pub file_stem: &'static str,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            figure_size: (8.0, 6.0),
            dpi: 300.0,
            extent: (-0.1, 1.1),
            font_families: vec![
                "Noto Sans CJK SC",
                "Noto Sans CJK TC",
                "Noto Sans CJK JP",
                "Noto Sans CJK KR",
                "AR PL UKai CN",
                "AR PL UMing CN",
            ],
            output_dir: "imgs",
            file_stem: "font_rendering_diagram",
        }
    }
}

impl DiagramConfig {
    /// Canvas size in points (1/72 inch)
    pub fn canvas_size(&self) -> (f32, f32) {
        (self.figure_size.0 * 72.0, self.figure_size.1 * 72.0)
    }

    /// Raster pixels per canvas point
    pub fn raster_scale(&self) -> f32 {
        self.dpi / 72.0
    }

    /// Raster image size in pixels
    pub fn raster_size(&self) -> (u32, u32) {
        (
            (self.figure_size.0 * self.dpi).round() as u32,
            (self.figure_size.1 * self.dpi).round() as u32,
        )
    }
}
