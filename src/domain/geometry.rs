//! Geometric types for the quad, its triangles and the plotting area

/// A point, either in data space (y up) or canvas points (y down)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Twice the signed area of the triangle (a, b, c); positive when counter-clockwise with y up
fn signed_area2(a: Point, b: Point, c: Point) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Unit square made of two textured triangles
///
/// Vertices are stored top-left, bottom-left, bottom-right, top-right,
/// which is also their texture coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub vertices: [Point; 4],
}

impl Quad {
    pub const UNIT: Quad = Quad {
        vertices: [
            Point::new(0.0, 1.0),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ],
    };

    /// Split along the v0-v2 diagonal: (v0, v1, v2) and (v0, v2, v3)
    pub fn triangles(&self) -> [Triangle; 2] {
        let [v0, v1, v2, v3] = self.vertices;
        [
            Triangle {
                vertices: [v0, v1, v2],
            },
            Triangle {
                vertices: [v0, v2, v3],
            },
        ]
    }

    pub fn area(&self) -> f32 {
        let [v0, v1, v2, v3] = self.vertices;
        (signed_area2(v0, v1, v2) + signed_area2(v0, v2, v3)).abs() * 0.5
    }
}

/// Three vertices in traversal order
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [Point; 3],
}

impl Triangle {
    /// Directed edges in winding order, closing back on the first vertex
    pub fn edges(&self) -> [(Point, Point); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    pub fn area(&self) -> f32 {
        let [a, b, c] = self.vertices;
        signed_area2(a, b, c).abs() * 0.5
    }
}

/// Square plotting area mapping a data range onto canvas points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axes {
    /// Left edge in canvas points
    pub left: f32,
    /// Top edge in canvas points
    pub top: f32,
    /// Side length in canvas points
    pub size: f32,
    /// Data range shown on both axes
    pub min: f32,
    pub max: f32,
}

impl Axes {
    pub fn bottom(&self) -> f32 {
        self.top + self.size
    }

    pub fn center_x(&self) -> f32 {
        self.left + self.size * 0.5
    }

    /// Map a data-space point (y up) to canvas points (y down)
    pub fn to_canvas(&self, p: Point) -> Point {
        let span = self.max - self.min;
        Point {
            x: self.left + (p.x - self.min) / span * self.size,
            y: self.bottom() - (p.y - self.min) / span * self.size,
        }
    }

    /// Tick positions in data space at `step` intervals inside the range
    pub fn ticks(&self, step: f32) -> Vec<f32> {
        let first = (self.min / step).ceil() as i32;
        let last = (self.max / step).floor() as i32;
        (first..=last).map(|i| i as f32 * step).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Whether (p, q) is one of the triangle's edges, in either direction
    fn has_edge(triangle: &Triangle, p: Point, q: Point) -> bool {
        triangle
            .edges()
            .iter()
            .any(|&(a, b)| (a == p && b == q) || (a == q && b == p))
    }

    #[test]
    fn test_triangles_cover_quad() {
        let quad = Quad::UNIT;
        let [t1, t2] = quad.triangles();
        assert!((t1.area() + t2.area() - quad.area()).abs() < 1e-6);
        assert!((quad.area() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangles_share_diagonal() {
        let quad = Quad::UNIT;
        let [t1, t2] = quad.triangles();
        let (v0, v2) = (quad.vertices[0], quad.vertices[2]);
        assert!(has_edge(&t1, v0, v2));
        assert!(has_edge(&t2, v0, v2));
        // The other diagonal belongs to neither triangle
        let (v1, v3) = (quad.vertices[1], quad.vertices[3]);
        assert!(!has_edge(&t1, v1, v3));
        assert!(!has_edge(&t2, v1, v3));
    }

    #[test]
    fn test_edges_form_closed_loop() {
        for triangle in Quad::UNIT.triangles() {
            let edges = triangle.edges();
            for i in 0..3 {
                assert_eq!(edges[i].1, edges[(i + 1) % 3].0);
            }
            assert_eq!(edges[0].0, triangle.vertices[0]);
        }
    }

    #[test]
    fn test_axes_mapping() {
        let axes = Axes {
            left: 100.0,
            top: 50.0,
            size: 120.0,
            min: -0.1,
            max: 1.1,
        };
        let origin = axes.to_canvas(Point::new(-0.1, -0.1));
        assert!((origin.x - 100.0).abs() < 1e-3);
        assert!((origin.y - 170.0).abs() < 1e-3);
        let top_right = axes.to_canvas(Point::new(1.1, 1.1));
        assert!((top_right.x - 220.0).abs() < 1e-3);
        assert!((top_right.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_ticks() {
        let axes = Axes {
            left: 0.0,
            top: 0.0,
            size: 1.0,
            min: -0.1,
            max: 1.1,
        };
        let ticks = axes.ticks(0.2);
        assert_eq!(ticks.len(), 6);
        assert!(ticks[0].abs() < 1e-6);
        assert!((ticks[5] - 1.0).abs() < 1e-6);
    }
}
