//! The glyph rendering diagram
//!
//! Builds the fixed figure: a unit quad split into two textured triangles,
//! their winding arrows and texture coordinates, a baseline and a schematic
//! letter "A", laid out on an 8x6 inch canvas.

use crate::config::{DiagramConfig, ShapeColor};
use crate::domain::{
    ArrowShape, Axes, HAlign, LineShape, Point, PolygonShape, Primitive, Quad, RectShape, Scene,
    TextLabel, Triangle, VAlign,
};
use crate::fl;
use crate::render::geometry::{legend, text};

/// Fill and arrow color of each triangle, in `Quad::triangles` order
pub const TRIANGLE_COLORS: [ShapeColor; 2] = [ShapeColor::BLUE, ShapeColor::RED];

/// Opacity of the triangle fills and legend swatches
const FILL_ALPHA: f32 = 0.3;
/// Side of the square plotting area in points
const AXES_SIZE: f32 = 290.0;
/// Top of the plotting area in points
const AXES_TOP: f32 = 62.0;
/// Grid and tick spacing in data units
const TICK_STEP: f32 = 0.2;
const TICK_LENGTH: f32 = 3.5;
const TICK_PAD: f32 = 2.0;
const TICK_LABEL_SIZE: f32 = 9.0;
const FRAME_WIDTH: f32 = 0.8;
/// Legend top edge below the axes, as a fraction of the axes height
const LEGEND_OFFSET: f32 = 0.05;
/// Dashed line pattern at 1.5 pt line width
const DASH: [f32; 2] = [5.55, 2.4];
/// Dashed line pattern at 0.8 pt line width
const GRID_DASH: [f32; 2] = [2.96, 1.28];

/// Baseline height in data units
pub const BASELINE_Y: f32 = 0.2;

/// Strokes of the letter "A" in data units: left diagonal, right diagonal, crossbar
pub const GLYPH_STROKES: [(Point, Point); 3] = [
    (Point::new(0.2, 0.2), Point::new(0.5, 0.8)),
    (Point::new(0.5, 0.8), Point::new(0.8, 0.2)),
    (Point::new(0.3, 0.5), Point::new(0.7, 0.5)),
];

/// Build the complete figure
pub fn build(config: &DiagramConfig) -> Scene {
    let (width, height) = config.canvas_size();
    let mut scene = Scene::new(width, height);
    scene.background = Some(ShapeColor::WHITE);
    scene.font_families = config.font_families.iter().map(|f| f.to_string()).collect();

    let axes = Axes {
        left: (width - AXES_SIZE) * 0.5,
        top: AXES_TOP,
        size: AXES_SIZE,
        min: config.extent.0,
        max: config.extent.1,
    };

    let quad = Quad::UNIT;
    let triangles = quad.triangles();
    debug_assert!((triangles[0].area() + triangles[1].area() - quad.area()).abs() < 1e-6);

    add_titles(&mut scene, &axes);
    add_triangles(&mut scene, &axes, &triangles);
    add_grid(&mut scene, &axes);
    add_baseline(&mut scene, &axes);
    add_glyph(&mut scene, &axes);
    add_winding_arrows(&mut scene, &axes, &triangles);
    add_texcoord_labels(&mut scene, &axes, &triangles);
    add_frame(&mut scene, &axes);
    add_legend(&mut scene, &axes);

    log::debug!("Diagram built with {} primitives", scene.items.len());
    scene
}

fn add_titles(scene: &mut Scene, axes: &Axes) {
    scene.push(Primitive::Text(TextLabel {
        position: Point::new(scene.width * 0.5, 28.0),
        text: fl!("figure-title"),
        size: text::FIGURE_TITLE_SIZE,
        color: ShapeColor::BLACK,
        h_align: HAlign::Center,
        v_align: VAlign::Baseline,
    }));
    scene.push(Primitive::Text(TextLabel {
        position: Point::new(axes.center_x(), axes.top - 6.0),
        text: fl!("axes-title"),
        size: text::AXES_TITLE_SIZE,
        color: ShapeColor::BLACK,
        h_align: HAlign::Center,
        v_align: VAlign::Bottom,
    }));
}

fn add_triangles(scene: &mut Scene, axes: &Axes, triangles: &[Triangle; 2]) {
    for (triangle, color) in triangles.iter().zip(TRIANGLE_COLORS) {
        scene.push(Primitive::Polygon(PolygonShape {
            points: triangle
                .vertices
                .iter()
                .map(|&v| axes.to_canvas(v))
                .collect(),
            fill: color.with_alpha(FILL_ALPHA),
            stroke: Some((color.with_alpha(FILL_ALPHA), 1.0)),
        }));
    }
}

/// Dashed grid at every tick, tick marks and tick labels on the left and bottom
fn add_grid(scene: &mut Scene, axes: &Axes) {
    let grid_color = ShapeColor::GRID.with_alpha(0.7);

    for t in axes.ticks(TICK_STEP) {
        let bottom = axes.to_canvas(Point::new(t, axes.min));
        let top = axes.to_canvas(Point::new(t, axes.max));
        let left = axes.to_canvas(Point::new(axes.min, t));
        let right = axes.to_canvas(Point::new(axes.max, t));

        for (a, b) in [(bottom, top), (left, right)] {
            scene.push(Primitive::Line(LineShape {
                points: vec![a, b],
                color: grid_color,
                width: FRAME_WIDTH,
                dash: Some(GRID_DASH),
            }));
        }

        scene.push(Primitive::Line(LineShape {
            points: vec![bottom, Point::new(bottom.x, bottom.y + TICK_LENGTH)],
            color: ShapeColor::BLACK,
            width: FRAME_WIDTH,
            dash: None,
        }));
        scene.push(Primitive::Line(LineShape {
            points: vec![left, Point::new(left.x - TICK_LENGTH, left.y)],
            color: ShapeColor::BLACK,
            width: FRAME_WIDTH,
            dash: None,
        }));

        let tick_text = format!("{t:.1}");
        scene.push(Primitive::Text(TextLabel {
            position: Point::new(bottom.x, bottom.y + TICK_LENGTH + TICK_PAD),
            text: tick_text.clone(),
            size: TICK_LABEL_SIZE,
            color: ShapeColor::BLACK,
            h_align: HAlign::Center,
            v_align: VAlign::Top,
        }));
        scene.push(Primitive::Text(TextLabel {
            position: Point::new(left.x - TICK_LENGTH - TICK_PAD, left.y),
            text: tick_text,
            size: TICK_LABEL_SIZE,
            color: ShapeColor::BLACK,
            h_align: HAlign::Right,
            v_align: VAlign::Center,
        }));
    }
}

/// Horizontal dashed baseline across the whole plotting area, labelled at its right end
fn add_baseline(scene: &mut Scene, axes: &Axes) {
    let color = ShapeColor::GREEN;
    scene.push(Primitive::Line(LineShape {
        points: vec![
            axes.to_canvas(Point::new(axes.min, BASELINE_Y)),
            axes.to_canvas(Point::new(axes.max, BASELINE_Y)),
        ],
        color: color.with_alpha(0.7),
        width: 1.5,
        dash: Some(DASH),
    }));
    scene.push(Primitive::Text(TextLabel {
        position: axes.to_canvas(Point::new(1.05, BASELINE_Y)),
        text: fl!("baseline"),
        size: text::LABEL_SIZE,
        color,
        h_align: HAlign::Left,
        v_align: VAlign::Center,
    }));
}

fn add_glyph(scene: &mut Scene, axes: &Axes) {
    for (a, b) in GLYPH_STROKES {
        scene.push(Primitive::Line(LineShape {
            points: vec![axes.to_canvas(a), axes.to_canvas(b)],
            color: ShapeColor::BLACK,
            width: 3.0,
            dash: None,
        }));
    }
}

/// One arrow per triangle edge, following the vertex order
fn add_winding_arrows(scene: &mut Scene, axes: &Axes, triangles: &[Triangle; 2]) {
    for (triangle, color) in triangles.iter().zip(TRIANGLE_COLORS) {
        for (from, to) in triangle.edges() {
            scene.push(Primitive::Arrow(ArrowShape {
                start: axes.to_canvas(from),
                end: axes.to_canvas(to),
                color,
                width: 1.5,
            }));
        }
    }
}

/// Texture coordinate of every vertex, per triangle
///
/// The first triangle's labels sit below-left of the vertex and the second's
/// above-right, so the shared vertices show both.
fn add_texcoord_labels(scene: &mut Scene, axes: &Axes, triangles: &[Triangle; 2]) {
    let anchors = [(HAlign::Right, VAlign::Top), (HAlign::Left, VAlign::Bottom)];

    for ((triangle, color), (h_align, v_align)) in
        triangles.iter().zip(TRIANGLE_COLORS).zip(anchors)
    {
        for vertex in triangle.vertices {
            scene.push(Primitive::Text(TextLabel {
                position: axes.to_canvas(vertex),
                text: format!("({},{})", vertex.x, vertex.y),
                size: text::LABEL_SIZE,
                color,
                h_align,
                v_align,
            }));
        }
    }
}

fn add_frame(scene: &mut Scene, axes: &Axes) {
    scene.push(Primitive::Rect(RectShape {
        x: axes.left,
        y: axes.top,
        width: axes.size,
        height: axes.size,
        fill: None,
        stroke: Some((ShapeColor::BLACK, FRAME_WIDTH)),
    }));
}

/// Framed legend below the axes, one swatch per triangle
fn add_legend(scene: &mut Scene, axes: &Axes) {
    let entries: Vec<(ShapeColor, String)> = TRIANGLE_COLORS
        .iter()
        .enumerate()
        .map(|(i, &color)| {
            let index: usize = i + 1;
            (color, fl!("triangle-label", index = index))
        })
        .collect();

    let label_width = entries
        .iter()
        .map(|(_, label)| text::estimate_width(label, text::LABEL_SIZE))
        .fold(0.0, f32::max);
    let width = legend::PADDING * 2.0 + legend::SWATCH_WIDTH + legend::SWATCH_GAP + label_width;
    let height = legend::PADDING * 2.0 + legend::ROW_HEIGHT * entries.len() as f32;
    let left = axes.center_x() - width * 0.5;
    let top = axes.bottom() + axes.size * LEGEND_OFFSET;

    scene.push(Primitive::Rect(RectShape {
        x: left,
        y: top,
        width,
        height,
        fill: Some(ShapeColor::WHITE.with_alpha(0.8)),
        stroke: Some((ShapeColor::LEGEND_EDGE, FRAME_WIDTH)),
    }));

    for (i, (color, label)) in entries.into_iter().enumerate() {
        let center_y = top + legend::PADDING + legend::ROW_HEIGHT * (i as f32 + 0.5);
        let swatch_x = left + legend::PADDING;

        scene.push(Primitive::Rect(RectShape {
            x: swatch_x,
            y: center_y - legend::SWATCH_HEIGHT * 0.5,
            width: legend::SWATCH_WIDTH,
            height: legend::SWATCH_HEIGHT,
            fill: Some(color.with_alpha(FILL_ALPHA)),
            stroke: Some((color.with_alpha(FILL_ALPHA), 1.0)),
        }));
        scene.push(Primitive::Text(TextLabel {
            position: Point::new(
                swatch_x + legend::SWATCH_WIDTH + legend::SWATCH_GAP,
                center_y,
            ),
            text: label,
            size: text::LABEL_SIZE,
            color: ShapeColor::BLACK,
            h_align: HAlign::Left,
            v_align: VAlign::Center,
        }));
    }
}
