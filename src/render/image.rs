//! Raster rendering of a scene using tiny-skia
//!
//! The scene is drawn onto an opaque `RgbaImage` so the premultiplied
//! pixmap data and the straight-alpha image data stay identical.

use anyhow::Context;
use image::RgbaImage;
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, StrokeDash, Transform,
};

use super::geometry::arrow;
use super::text::FontSet;
use crate::config::ShapeColor;
use crate::domain::{ArrowShape, LineShape, Point, PolygonShape, Primitive, RectShape, Scene};

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) -> anyhow::Result<()> {
    let (w, h) = (img.width(), img.height());
    let size = tiny_skia::IntSize::from_wh(w, h).context("raster image has zero size")?;
    let mut pixmap = Pixmap::from_vec(img.as_raw().clone(), size)
        .context("raster image buffer does not match its size")?;

    f(&mut pixmap);

    // Copy back
    img.copy_from_slice(pixmap.data());
    Ok(())
}

fn paint_for(color: ShapeColor) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn build_polyline(points: &[Point], close: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    if close {
        pb.close();
    }
    pb.finish()
}

/// Build an arrow path as stroked lines (shaft + two angled head lines)
fn build_arrow_path(start: Point, end: Point, head_size: f32) -> Option<Path> {
    let (start, end) = arrow::shrink(start, end, arrow::SHRINK)?;
    let (head1, head2) = arrow::head_points(start, end, head_size)?;

    let mut pb = PathBuilder::new();

    // Shaft line from start to end
    pb.move_to(start.x, start.y);
    pb.line_to(end.x, end.y);

    // Head lines
    pb.move_to(head1.x, head1.y);
    pb.line_to(end.x, end.y);
    pb.line_to(head2.x, head2.y);

    pb.finish()
}

fn build_rect_path(rect: &RectShape) -> Option<Path> {
    let r = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)?;
    Some(PathBuilder::from_rect(r))
}

fn draw_polygon(pixmap: &mut Pixmap, polygon: &PolygonShape, transform: Transform) {
    let Some(path) = build_polyline(&polygon.points, true) else {
        return;
    };

    pixmap.fill_path(
        &path,
        &paint_for(polygon.fill),
        FillRule::Winding,
        transform,
        None,
    );

    if let Some((color, width)) = polygon.stroke {
        let stroke = Stroke {
            width,
            line_join: LineJoin::Miter,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint_for(color), &stroke, transform, None);
    }
}

fn draw_line(pixmap: &mut Pixmap, line: &LineShape, transform: Transform) {
    let Some(path) = build_polyline(&line.points, false) else {
        return;
    };

    let stroke = Stroke {
        width: line.width,
        line_cap: LineCap::Butt,
        line_join: LineJoin::Round,
        dash: line
            .dash
            .and_then(|[on, off]| StrokeDash::new(vec![on, off], 0.0)),
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint_for(line.color), &stroke, transform, None);
}

fn draw_arrow(pixmap: &mut Pixmap, arrow_shape: &ArrowShape, transform: Transform) {
    let Some(path) = build_arrow_path(arrow_shape.start, arrow_shape.end, arrow::HEAD_SIZE) else {
        return;
    };

    let stroke = Stroke {
        width: arrow_shape.width,
        line_cap: LineCap::Butt,
        line_join: LineJoin::Miter,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint_for(arrow_shape.color), &stroke, transform, None);
}

fn draw_rect(pixmap: &mut Pixmap, rect: &RectShape, transform: Transform) {
    let Some(path) = build_rect_path(rect) else {
        return;
    };

    if let Some(fill) = rect.fill {
        pixmap.fill_path(&path, &paint_for(fill), FillRule::Winding, transform, None);
    }

    if let Some((color, width)) = rect.stroke {
        let stroke = Stroke {
            width,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint_for(color), &stroke, transform, None);
    }
}

/// Render the whole scene into a `width` x `height` image at `scale` pixels per canvas point
pub fn render_scene(
    scene: &Scene,
    fonts: &FontSet,
    (width, height): (u32, u32),
    scale: f32,
) -> anyhow::Result<RgbaImage> {
    let [r, g, b, _] = scene.background.unwrap_or(ShapeColor::WHITE).to_rgba_u8();
    let mut img = RgbaImage::from_pixel(width, height, image::Rgba([r, g, b, 255]));

    log::debug!(
        "Rasterizing {} primitives into {}x{} pixels",
        scene.items.len(),
        width,
        height
    );

    let transform = Transform::from_scale(scale, scale);
    with_pixmap(&mut img, |pixmap| {
        for item in &scene.items {
            match item {
                Primitive::Polygon(polygon) => draw_polygon(pixmap, polygon, transform),
                Primitive::Line(line) => draw_line(pixmap, line, transform),
                Primitive::Arrow(arrow_shape) => draw_arrow(pixmap, arrow_shape, transform),
                Primitive::Rect(rect) => draw_rect(pixmap, rect, transform),
                Primitive::Text(label) => fonts.draw(pixmap, label, scale),
            }
        }
    })?;

    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_scene() -> Scene {
        let mut scene = Scene::new(20.0, 20.0);
        scene.push(Primitive::Polygon(PolygonShape {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
            fill: ShapeColor::BLUE.with_alpha(0.3),
            stroke: None,
        }));
        scene
    }

    fn render_unscaled(scene: &Scene) -> RgbaImage {
        let size = (scene.width as u32, scene.height as u32);
        render_scene(scene, &FontSet::empty(), size, 1.0).unwrap()
    }

    #[test]
    fn test_render_size_follows_config() {
        let config = crate::config::DiagramConfig {
            dpi: 18.0,
            ..Default::default()
        };
        let (w, h) = config.canvas_size();
        let img = render_scene(
            &Scene::new(w, h),
            &FontSet::empty(),
            config.raster_size(),
            config.raster_scale(),
        )
        .unwrap();
        assert_eq!(img.dimensions(), (144, 108));
        assert_eq!(img.get_pixel(5, 5).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_translucent_fill_tints_background() {
        let img = render_unscaled(&square_scene());
        let inside = img.get_pixel(5, 5).0;
        // White blended with 30% blue
        assert_eq!(inside[2], 255);
        assert!(inside[0] > 160 && inside[0] < 200);
        assert_eq!(inside[3], 255);
        let outside = img.get_pixel(15, 15).0;
        assert_eq!(outside, [255, 255, 255, 255]);
    }

    #[test]
    fn test_thick_line_is_dark() {
        let mut scene = Scene::new(20.0, 20.0);
        scene.push(Primitive::Line(LineShape {
            points: vec![Point::new(2.0, 10.0), Point::new(18.0, 10.0)],
            color: ShapeColor::BLACK,
            width: 3.0,
            dash: None,
        }));
        let img = render_unscaled(&scene);
        assert!(img.get_pixel(10, 10).0[0] < 30);
        assert_eq!(img.get_pixel(10, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_rect_outline_and_fill() {
        let mut scene = Scene::new(20.0, 20.0);
        scene.push(Primitive::Rect(RectShape {
            x: 4.0,
            y: 4.0,
            width: 12.0,
            height: 8.0,
            fill: Some(ShapeColor::RED),
            stroke: Some((ShapeColor::BLACK, 2.0)),
        }));
        let img = render_unscaled(&scene);
        assert_eq!(img.get_pixel(10, 8).0, [255, 0, 0, 255]);
        assert!(img.get_pixel(4, 8).0[0] < 80);
        assert_eq!(img.get_pixel(10, 16).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_arrow_path_is_shrunk() {
        assert!(build_arrow_path(Point::new(0.0, 0.0), Point::new(50.0, 0.0), 6.0).is_some());
        assert!(build_arrow_path(Point::new(0.0, 0.0), Point::new(3.0, 0.0), 6.0).is_none());
    }
}
