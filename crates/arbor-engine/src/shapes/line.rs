use crate::coords::{AffineFrame, Point2D};
use crate::graph::Behavior;
use crate::paint::Color;
use crate::scene::Canvas;

/// Open line segment in local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineShape {
    pub from: Point2D,
    pub to: Point2D,
    pub color: Color,
}

impl LineShape {
    pub fn new(from: Point2D, to: Point2D, color: Color) -> Self {
        Self { from, to, color }
    }

    /// Segment from `(0, 0)` to `(1, 0)`.
    pub fn unit(color: Color) -> Self {
        Self::new(Point2D::zero(), Point2D::new(1.0, 0.0), color)
    }
}

impl Behavior for LineShape {
    fn draw_self(&self, canvas: &mut dyn Canvas, frame: &AffineFrame) {
        canvas.set_pen_color(self.color);
        canvas.stroke_polyline(&[frame.apply(self.from), frame.apply(self.to)], false);
    }
}
