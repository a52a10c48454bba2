//! Shared geometry calculations for both backends
//!
//! The raster and SVG renderers must place arrowheads and legend boxes
//! identically, so the math lives here.

/// Arrow geometry constants, in canvas points
pub mod arrow {
    use crate::domain::Point;

    /// Arrowhead line length
    pub const HEAD_SIZE: f32 = 6.0;
    /// Arrowhead angle from shaft in radians (22 degrees)
    pub const HEAD_ANGLE: f32 = 0.383_972_4; // 22.0_f32.to_radians()
    /// Gap left between the arrow ends and the points it connects
    pub const SHRINK: f32 = 2.0;
    /// Minimum arrow length to be drawn
    pub const MIN_LENGTH: f32 = 1.0;

    /// Calculate the two arrowhead line ends for an arrow pointing at `end`
    pub fn head_points(start: Point, end: Point, head_size: f32) -> Option<(Point, Point)> {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let length = (dx * dx + dy * dy).sqrt();
        if length < MIN_LENGTH {
            return None;
        }

        // Unit direction vector (pointing from start to end)
        let nx = dx / length;
        let ny = dy / length;

        let cos_a = HEAD_ANGLE.cos();
        let sin_a = HEAD_ANGLE.sin();

        // First head line (rotated clockwise from arrow direction)
        let head1 = Point {
            x: end.x + (-nx * cos_a - (-ny) * sin_a) * head_size,
            y: end.y + (-nx * sin_a + (-ny) * cos_a) * head_size,
        };

        // Second head line (rotated counter-clockwise)
        let head2 = Point {
            x: end.x + (-nx * cos_a + (-ny) * sin_a) * head_size,
            y: end.y + (-nx * (-sin_a) + (-ny) * cos_a) * head_size,
        };

        Some((head1, head2))
    }

    /// Pull both ends of the segment inwards by `amount`
    pub fn shrink(start: Point, end: Point, amount: f32) -> Option<(Point, Point)> {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let length = (dx * dx + dy * dy).sqrt();
        if length <= amount * 2.0 + MIN_LENGTH {
            return None;
        }
        let ox = dx / length * amount;
        let oy = dy / length * amount;
        Some((
            Point::new(start.x + ox, start.y + oy),
            Point::new(end.x - ox, end.y - oy),
        ))
    }
}

/// Text layout constants
pub mod text {
    /// Font size of the figure title
    pub const FIGURE_TITLE_SIZE: f32 = 16.0;
    /// Font size of the axes title
    pub const AXES_TITLE_SIZE: f32 = 12.0;
    /// Font size of labels, ticks and legend entries
    pub const LABEL_SIZE: f32 = 10.0;

    /// Approximate rendered width of `text`
    ///
    /// Wide (CJK) characters take a full em, everything else a bit over half.
    /// Used where both backends need the same box, since the SVG backend
    /// cannot measure glyphs.
    pub fn estimate_width(text: &str, size: f32) -> f32 {
        text.chars()
            .map(|c| if is_wide(c) { size } else { size * 0.6 })
            .sum()
    }

    fn is_wide(c: char) -> bool {
        matches!(c as u32,
            0x1100..=0x115F
            | 0x2E80..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6)
    }
}

/// Legend layout constants
pub mod legend {
    /// Padding between the frame and its content
    pub const PADDING: f32 = 5.0;
    /// Colored swatch size
    pub const SWATCH_WIDTH: f32 = 20.0;
    pub const SWATCH_HEIGHT: f32 = 7.0;
    /// Gap between swatch and label
    pub const SWATCH_GAP: f32 = 8.0;
    /// Height of one entry row
    pub const ROW_HEIGHT: f32 = 14.0;
}
