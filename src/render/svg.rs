//! Vector rendering of a scene as an SVG document

use std::fmt::Write;

use super::geometry::arrow;
use crate::config::ShapeColor;
use crate::domain::{
    ArrowShape, HAlign, LineShape, Point, PolygonShape, Primitive, RectShape, Scene, TextLabel,
    VAlign,
};

/// Mutable state used whilst writing an SVG
pub struct SvgRender {
    svg: String,
    indent: usize,
}

/// Attribute writer handed to the tag closures
pub struct SvgRenderAttrs<'a>(&'a mut SvgRender);

impl SvgRenderAttrs<'_> {
    pub fn push(&mut self, name: &str, value: impl std::fmt::Display) {
        let _ = write!(self.0.svg, r#" {name}="{value}""#);
    }
}

impl SvgRender {
    pub fn new() -> Self {
        Self {
            svg: String::new(),
            indent: 0,
        }
    }

    fn newline(&mut self) {
        if !self.svg.is_empty() {
            self.svg.push('\n');
        }
        for _ in 0..self.indent {
            self.svg.push_str("  ");
        }
    }

    pub fn leaf_tag(&mut self, name: &str, attributes: impl FnOnce(&mut SvgRenderAttrs)) {
        self.newline();
        self.svg.push('<');
        self.svg.push_str(name);
        attributes(&mut SvgRenderAttrs(self));
        self.svg.push_str("/>");
    }

    /// Element whose only child is escaped character data
    pub fn text_tag(
        &mut self,
        name: &str,
        attributes: impl FnOnce(&mut SvgRenderAttrs),
        content: &str,
    ) {
        self.newline();
        self.svg.push('<');
        self.svg.push_str(name);
        attributes(&mut SvgRenderAttrs(self));
        self.svg.push('>');
        self.svg.push_str(&escape(content));
        let _ = write!(self.svg, "</{name}>");
    }

    pub fn parent_tag(
        &mut self,
        name: &str,
        attributes: impl FnOnce(&mut SvgRenderAttrs),
        inner: impl FnOnce(&mut Self),
    ) {
        self.newline();
        self.svg.push('<');
        self.svg.push_str(name);
        attributes(&mut SvgRenderAttrs(self));
        self.svg.push('>');
        let length = self.svg.len();
        self.indent += 1;
        inner(self);
        self.indent -= 1;
        if self.svg.len() != length {
            self.newline();
            let _ = write!(self.svg, "</{name}>");
        } else {
            self.svg.pop();
            self.svg.push_str("/>");
        }
    }

    pub fn finish(self) -> String {
        let mut out = String::from(r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#);
        out.push('\n');
        out.push_str(&self.svg);
        out.push('\n');
        out
    }
}

impl Default for SvgRender {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape character data and attribute values
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn fmt_num(v: f32) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn fill_attrs(attrs: &mut SvgRenderAttrs, color: ShapeColor) {
    attrs.push("fill", color.to_hex());
    if color.a < 1.0 {
        attrs.push("fill-opacity", fmt_num(color.a));
    }
}

fn stroke_attrs(attrs: &mut SvgRenderAttrs, color: ShapeColor, width: f32) {
    attrs.push("stroke", color.to_hex());
    attrs.push("stroke-width", fmt_num(width));
    if color.a < 1.0 {
        attrs.push("stroke-opacity", fmt_num(color.a));
    }
}

fn write_polygon(render: &mut SvgRender, polygon: &PolygonShape) {
    render.leaf_tag("polygon", |attrs| {
        attrs.push("points", points_attr(&polygon.points));
        fill_attrs(attrs, polygon.fill);
        if let Some((color, width)) = polygon.stroke {
            stroke_attrs(attrs, color, width);
        }
    });
}

fn write_line(render: &mut SvgRender, line: &LineShape) {
    render.leaf_tag("polyline", |attrs| {
        attrs.push("points", points_attr(&line.points));
        attrs.push("fill", "none");
        stroke_attrs(attrs, line.color, line.width);
        if let Some([on, off]) = line.dash {
            attrs.push("stroke-dasharray", format!("{},{}", fmt_num(on), fmt_num(off)));
        }
    });
}

fn write_arrow(render: &mut SvgRender, shape: &ArrowShape) {
    let Some((start, end)) = arrow::shrink(shape.start, shape.end, arrow::SHRINK) else {
        return;
    };
    let Some((head1, head2)) = arrow::head_points(start, end, arrow::HEAD_SIZE) else {
        return;
    };

    render.parent_tag(
        "g",
        |attrs| {
            attrs.push("fill", "none");
            stroke_attrs(attrs, shape.color, shape.width);
        },
        |render| {
            render.leaf_tag("line", |attrs| {
                attrs.push("x1", fmt_num(start.x));
                attrs.push("y1", fmt_num(start.y));
                attrs.push("x2", fmt_num(end.x));
                attrs.push("y2", fmt_num(end.y));
            });
            render.leaf_tag("polyline", |attrs| {
                attrs.push("points", points_attr(&[head1, end, head2]));
            });
        },
    );
}

fn write_rect(render: &mut SvgRender, rect: &RectShape) {
    render.leaf_tag("rect", |attrs| {
        attrs.push("x", fmt_num(rect.x));
        attrs.push("y", fmt_num(rect.y));
        attrs.push("width", fmt_num(rect.width));
        attrs.push("height", fmt_num(rect.height));
        match rect.fill {
            Some(fill) => fill_attrs(attrs, fill),
            None => attrs.push("fill", "none"),
        }
        if let Some((color, width)) = rect.stroke {
            stroke_attrs(attrs, color, width);
        }
    });
}

fn write_text(render: &mut SvgRender, label: &TextLabel) {
    render.text_tag(
        "text",
        |attrs| {
            attrs.push("x", fmt_num(label.position.x));
            attrs.push("y", fmt_num(label.position.y));
            attrs.push("font-size", fmt_num(label.size));
            fill_attrs(attrs, label.color);
            let anchor = match label.h_align {
                HAlign::Left => "start",
                HAlign::Center => "middle",
                HAlign::Right => "end",
            };
            attrs.push("text-anchor", anchor);
            let baseline = match label.v_align {
                VAlign::Top => "text-before-edge",
                VAlign::Center => "central",
                VAlign::Baseline => "alphabetic",
                VAlign::Bottom => "text-after-edge",
            };
            attrs.push("dominant-baseline", baseline);
        },
        &label.text,
    );
}

/// Serialize the scene; sizes are in points so the document prints at the figure size
pub fn render_scene(scene: &Scene) -> String {
    let mut render = SvgRender::new();
    let font_family = scene
        .font_families
        .iter()
        .map(|f| format!("'{f}'"))
        .chain(std::iter::once("sans-serif".to_string()))
        .collect::<Vec<_>>()
        .join(", ");

    render.parent_tag(
        "svg",
        |attrs| {
            attrs.push("xmlns", "http://www.w3.org/2000/svg");
            attrs.push("version", "1.1");
            attrs.push("width", format!("{}pt", fmt_num(scene.width)));
            attrs.push("height", format!("{}pt", fmt_num(scene.height)));
            attrs.push(
                "viewBox",
                format!("0 0 {} {}", fmt_num(scene.width), fmt_num(scene.height)),
            );
        },
        |render| {
            if let Some(background) = scene.background {
                render.leaf_tag("rect", |attrs| {
                    attrs.push("width", "100%");
                    attrs.push("height", "100%");
                    fill_attrs(attrs, background);
                });
            }
            render.parent_tag(
                "g",
                |attrs| attrs.push("font-family", escape(&font_family)),
                |render| {
                    for item in &scene.items {
                        match item {
                            Primitive::Polygon(polygon) => write_polygon(render, polygon),
                            Primitive::Line(line) => write_line(render, line),
                            Primitive::Arrow(shape) => write_arrow(render, shape),
                            Primitive::Rect(rect) => write_rect(render, rect),
                            Primitive::Text(label) => write_text(render, label),
                        }
                    }
                },
            );
        },
    );

    log::debug!("Serialized {} primitives to SVG", scene.items.len());

    render.finish()
}
