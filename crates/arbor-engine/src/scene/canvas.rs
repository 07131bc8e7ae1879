use crate::coords::Point2D;
use crate::paint::Color;

/// Drawing surface consumed by shape payloads.
///
/// All points are already in world space; the canvas never sees frames.
/// Geometry is drawn with the most recently set pen color.
pub trait Canvas {
    fn set_pen_color(&mut self, color: Color);

    /// Filled convex polygon.
    fn fill_polygon(&mut self, points: &[Point2D]);

    /// Polyline through `points`, closed back to the first point when `closed`.
    fn stroke_polyline(&mut self, points: &[Point2D], closed: bool);
}
