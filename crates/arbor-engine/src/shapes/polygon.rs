use crate::coords::{AffineFrame, Point2D};
use crate::graph::Behavior;
use crate::paint::Color;
use crate::scene::Canvas;

/// Ordered list of local-space vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon2D {
    points: Vec<Point2D>,
}

impl Polygon2D {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    /// Builds a polygon from flat `x0, y0, x1, y1, ...` coordinates.
    /// A trailing odd coordinate is ignored.
    pub fn from_coords(coords: &[f32]) -> Self {
        Self::new(coords.chunks_exact(2).map(|c| Point2D::new(c[0], c[1])).collect())
    }

    /// Regular `sides`-gon of the given radius centred on the origin, first
    /// vertex on +X.
    pub fn regular(sides: usize, radius: f32) -> Self {
        let step = 360.0 / sides as f32;
        Self::new(
            (0..sides)
                .map(|i| {
                    let (s, c) = (i as f32 * step).to_radians().sin_cos();
                    Point2D::new(radius * c, radius * s)
                })
                .collect(),
        )
    }

    #[inline]
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vertices mapped through `frame`.
    pub fn transformed(&self, frame: &AffineFrame) -> Vec<Point2D> {
        self.points.iter().map(|&p| frame.apply(p)).collect()
    }

    /// Fills with `fill` and outlines with `line`; `None` skips that part.
    pub(crate) fn paint(
        &self,
        canvas: &mut dyn Canvas,
        frame: &AffineFrame,
        fill: Option<Color>,
        line: Option<Color>,
    ) {
        if fill.is_none() && line.is_none() {
            return;
        }
        let world = self.transformed(frame);
        if let Some(color) = fill {
            canvas.set_pen_color(color);
            canvas.fill_polygon(&world);
        }
        if let Some(color) = line {
            canvas.set_pen_color(color);
            canvas.stroke_polyline(&world, true);
        }
    }
}

/// Polygon payload with optional fill and outline colors.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    pub polygon: Polygon2D,
    pub fill: Option<Color>,
    pub line: Option<Color>,
}

impl PolygonShape {
    pub fn new(polygon: Polygon2D, fill: Option<Color>, line: Option<Color>) -> Self {
        Self { polygon, fill, line }
    }
}

impl Behavior for PolygonShape {
    fn draw_self(&self, canvas: &mut dyn Canvas, frame: &AffineFrame) {
        self.polygon.paint(canvas, frame, self.fill, self.line);
    }
}
