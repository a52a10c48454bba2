//! Drawing primitives shared by the raster and vector backends
//!
//! All coordinates are canvas points (1/72 inch) with the origin at the
//! top-left corner and y growing downwards.

use super::geometry::Point;
use crate::config::ShapeColor;

/// Horizontal anchor of a text label relative to its position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical anchor of a text label relative to its position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    #[default]
    Baseline,
    Bottom,
}

/// Closed filled polygon with an optional outline
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonShape {
    pub points: Vec<Point>,
    pub fill: ShapeColor,
    pub stroke: Option<(ShapeColor, f32)>,
}

/// Open polyline
#[derive(Clone, Debug, PartialEq)]
pub struct LineShape {
    pub points: Vec<Point>,
    pub color: ShapeColor,
    pub width: f32,
    /// Dash and gap lengths in points, solid when `None`
    pub dash: Option<[f32; 2]>,
}

/// Straight arrow with an open head at `end`
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowShape {
    pub start: Point,
    pub end: Point,
    pub color: ShapeColor,
    pub width: f32,
}

/// Axis-aligned rectangle, used for the legend box and swatches
#[derive(Clone, Debug, PartialEq)]
pub struct RectShape {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Option<ShapeColor>,
    pub stroke: Option<(ShapeColor, f32)>,
}

/// Single line of text
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    pub position: Point,
    pub text: String,
    /// Font size in points
    pub size: f32,
    pub color: ShapeColor,
    pub h_align: HAlign,
    pub v_align: VAlign,
}

/// Unified primitive type, drawn in insertion order
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Polygon(PolygonShape),
    Line(LineShape),
    Arrow(ArrowShape),
    Rect(RectShape),
    Text(TextLabel),
}

/// A finished figure ready for serialization
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Canvas width in points
    pub width: f32,
    /// Canvas height in points
    pub height: f32,
    pub background: Option<ShapeColor>,
    /// Font families for text, most preferred first
    pub font_families: Vec<String>,
    pub items: Vec<Primitive>,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn push(&mut self, item: Primitive) {
        self.items.push(item);
    }
}
