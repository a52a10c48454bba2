//! Text rasterization with system fonts
//!
//! Faces are discovered with fontdb and rasterized with fontdue. Each
//! character is drawn with the first loaded face that has a glyph for it,
//! so Latin digits and CJK labels can come from different fonts.

use fontdb::{Database, Family, Query};
use fontdue::{Font, FontSettings};
use tiny_skia::{IntSize, Pixmap, PixmapPaint, PremultipliedColorU8, Transform};

use crate::domain::{HAlign, TextLabel, VAlign};

/// Ordered list of faces used for label text
pub struct FontSet {
    fonts: Vec<Font>,
}

impl FontSet {
    /// Load the named families in order, followed by the system sans-serif
    pub fn load(families: &[String]) -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("Font database holds {} faces", db.len());
        Self::from_database(&db, families)
    }

    /// Load the named families from an already populated database
    pub fn from_database(db: &Database, families: &[String]) -> Self {
        let mut queries: Vec<Family> = families.iter().map(|f| Family::Name(f.as_str())).collect();
        queries.push(Family::SansSerif);

        let mut ids = Vec::new();
        for family in &queries {
            let query = Query {
                families: std::slice::from_ref(family),
                ..Default::default()
            };
            if let Some(id) = db.query(&query)
                && !ids.contains(&id)
            {
                ids.push(id);
            }
        }

        let mut fonts = Vec::with_capacity(ids.len());
        for id in ids {
            let loaded = db.with_face_data(id, |data, index| {
                let settings = FontSettings {
                    collection_index: index,
                    ..Default::default()
                };
                Font::from_bytes(data, settings)
            });
            match loaded {
                Some(Ok(font)) => {
                    log::debug!("Loaded font face {:?}", font.name());
                    fonts.push(font);
                }
                Some(Err(err)) => log::warn!("Skipping unreadable font face: {}", err),
                None => log::warn!("Font face {:?} vanished from the database", id),
            }
        }

        if fonts.is_empty() {
            log::warn!(
                "None of the font families {:?} are installed and no sans-serif fallback exists; raster labels will be omitted",
                families
            );
        }

        Self { fonts }
    }

    /// A set without any faces; text is skipped entirely
    #[cfg(test)]
    pub fn empty() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Index of the first face with a glyph for `c`, or the primary face
    fn face_for(&self, c: char) -> usize {
        self.fonts
            .iter()
            .position(|font| font.lookup_glyph_index(c) != 0)
            .unwrap_or(0)
    }

    /// Advance width of `text` at `px` pixels per em
    pub fn measure(&self, text: &str, px: f32) -> f32 {
        if self.fonts.is_empty() {
            return 0.0;
        }
        text.chars()
            .map(|c| self.fonts[self.face_for(c)].metrics(c, px).advance_width)
            .sum()
    }

    /// Ascent and descent (negative) of the primary face at `px`
    fn line_metrics(&self, px: f32) -> (f32, f32) {
        self.fonts
            .first()
            .and_then(|font| font.horizontal_line_metrics(px))
            .map(|m| (m.ascent, m.descent))
            .unwrap_or((px * 0.8, -px * 0.2))
    }

    /// Draw a label onto the pixmap; label coordinates are multiplied by `scale`
    pub fn draw(&self, pixmap: &mut Pixmap, label: &TextLabel, scale: f32) {
        if self.fonts.is_empty() {
            return;
        }

        let px = label.size * scale;
        let width = self.measure(&label.text, px);
        let (ascent, descent) = self.line_metrics(px);

        let x = label.position.x * scale;
        let y = label.position.y * scale;

        let mut pen_x = match label.h_align {
            HAlign::Left => x,
            HAlign::Center => x - width * 0.5,
            HAlign::Right => x - width,
        };
        let baseline = match label.v_align {
            VAlign::Top => y + ascent,
            VAlign::Center => y + (ascent + descent) * 0.5,
            VAlign::Baseline => y,
            VAlign::Bottom => y + descent,
        };

        let [r, g, b, a] = label.color.to_rgba_u8();

        for c in label.text.chars() {
            let font = &self.fonts[self.face_for(c)];
            let (metrics, coverage) = font.rasterize(c, px);

            if let Some(glyph) = glyph_pixmap(metrics.width, metrics.height, &coverage, [r, g, b, a])
            {
                let gx = (pen_x + metrics.xmin as f32).round() as i32;
                let gy = (baseline - metrics.height as f32 - metrics.ymin as f32).round() as i32;
                pixmap.draw_pixmap(
                    gx,
                    gy,
                    glyph.as_ref(),
                    &PixmapPaint::default(),
                    Transform::identity(),
                    None,
                );
            }

            pen_x += metrics.advance_width;
        }
    }
}

/// Turn a fontdue coverage bitmap into a premultiplied pixmap of one color
fn glyph_pixmap(width: usize, height: usize, coverage: &[u8], color: [u8; 4]) -> Option<Pixmap> {
    let size = IntSize::from_wh(width as u32, height as u32)?;
    let mut glyph = Pixmap::new(size.width(), size.height())?;
    let [r, g, b, a] = color.map(u32::from);

    for (dst, &cov) in glyph.pixels_mut().iter_mut().zip(coverage) {
        let alpha = (a * cov as u32 + 127) / 255;
        let premul = |c: u32| ((c * alpha + 127) / 255) as u8;
        if let Some(pixel) =
            PremultipliedColorU8::from_rgba(premul(r), premul(g), premul(b), alpha as u8)
        {
            *dst = pixel;
        }
    }

    Some(glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_pixmap_premultiplies() {
        let glyph = glyph_pixmap(2, 1, &[255, 0], [255, 0, 0, 255]).unwrap();
        let pixels = glyph.pixels();
        assert_eq!(pixels[0].alpha(), 255);
        assert_eq!(pixels[0].red(), 255);
        assert_eq!(pixels[1].alpha(), 0);
    }

    #[test]
    fn test_glyph_pixmap_half_coverage() {
        let glyph = glyph_pixmap(1, 1, &[128], [0, 0, 255, 255]).unwrap();
        let pixel = glyph.pixels()[0];
        assert_eq!(pixel.alpha(), 128);
        assert_eq!(pixel.blue(), 128);
        assert_eq!(pixel.red(), 0);
    }

    #[test]
    fn test_empty_glyph_is_skipped() {
        assert!(glyph_pixmap(0, 0, &[], [0, 0, 0, 255]).is_none());
    }

    #[test]
    fn test_empty_set_draws_nothing() {
        let fonts = FontSet::empty();
        assert!(fonts.fonts.is_empty());
        assert_eq!(fonts.measure("基线", 10.0), 0.0);

        let mut pixmap = Pixmap::new(8, 8).unwrap();
        let label = TextLabel {
            position: crate::domain::Point::new(1.0, 1.0),
            text: "x".into(),
            size: 10.0,
            color: crate::config::ShapeColor::BLACK,
            h_align: HAlign::Left,
            v_align: VAlign::Top,
        };
        fonts.draw(&mut pixmap, &label, 1.0);
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
    }

    #[test]
    fn test_empty_database_has_no_faces() {
        let db = Database::new();
        let fonts = FontSet::from_database(&db, &["Noto Sans CJK SC".to_string()]);
        assert!(fonts.fonts.is_empty());
    }
}
