use crate::coords::AffineFrame;
use crate::graph::Behavior;
use crate::paint::Color;
use crate::scene::Canvas;

use super::Polygon2D;

/// Circle centred on the node origin, drawn as a regular polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    radius: f32,
    outline: Polygon2D,
    pub fill: Option<Color>,
    pub line: Option<Color>,
}

impl CircleShape {
    /// Number of segments approximating the circumference.
    pub const SEGMENTS: usize = 32;

    pub fn new(radius: f32, fill: Option<Color>, line: Option<Color>) -> Self {
        Self {
            radius,
            outline: Polygon2D::regular(Self::SEGMENTS, radius),
            fill,
            line,
        }
    }

    /// Radius 1.
    pub fn unit(fill: Option<Color>, line: Option<Color>) -> Self {
        Self::new(1.0, fill, line)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
        self.outline = Polygon2D::regular(Self::SEGMENTS, radius);
    }
}

impl Behavior for CircleShape {
    fn draw_self(&self, canvas: &mut dyn Canvas, frame: &AffineFrame) {
        self.outline.paint(canvas, frame, self.fill, self.line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Point2D;
    use crate::scene::DrawList;

    #[test]
    fn scaled_frame_scales_radius() {
        let c = CircleShape::new(2.0, Some(Color::WHITE), None);
        let mut list = DrawList::new();
        c.draw_self(&mut list, &AffineFrame::identity().translate(1.0, 1.0).scale(0.5, 0.5));

        let pts = list.items()[0].points();
        assert_eq!(pts.len(), CircleShape::SEGMENTS);
        let centre = Point2D::new(1.0, 1.0);
        assert!(pts.iter().all(|p| (p.distance(centre) - 1.0).abs() < 1e-5));
    }

    #[test]
    fn set_radius_rebuilds_outline() {
        let mut c = CircleShape::unit(None, Some(Color::RED));
        c.set_radius(3.0);
        let mut list = DrawList::new();
        c.draw_self(&mut list, &AffineFrame::identity());
        assert!((list.items()[0].points()[0].x - 3.0).abs() < 1e-6);
    }
}
