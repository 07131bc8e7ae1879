use crate::coords::Point2D;
use crate::paint::Color;

use super::{Canvas, DrawCmd, FillCmd, StrokeCmd};

/// Recorded draw stream for a frame.
///
/// Items are kept in recording order, which is the paint order of a scene
/// graph walk (parents before children, siblings in list order).
///
/// Degenerate geometry is dropped at record time: fills need at least three
/// points, strokes at least two.
#[derive(Debug, Clone)]
pub struct DrawList {
    items: Vec<DrawCmd>,
    pen: Color,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and resets the pen. Keeps allocated capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.pen = Color::BLACK;
    }

    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current pen color.
    #[inline]
    pub fn pen(&self) -> Color {
        self.pen
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self { items: Vec::new(), pen: Color::BLACK }
    }
}

impl Canvas for DrawList {
    #[inline]
    fn set_pen_color(&mut self, color: Color) {
        self.pen = color;
    }

    fn fill_polygon(&mut self, points: &[Point2D]) {
        if points.len() < 3 {
            return;
        }
        self.items.push(DrawCmd::Fill(FillCmd { points: points.to_vec(), color: self.pen }));
    }

    fn stroke_polyline(&mut self, points: &[Point2D], closed: bool) {
        if points.len() < 2 {
            return;
        }
        self.items.push(DrawCmd::Stroke(StrokeCmd {
            points: points.to_vec(),
            color: self.pen,
            closed,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> Vec<Point2D> {
        vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0), Point2D::new(0.0, 1.0)]
    }

    #[test]
    fn records_with_current_pen() {
        let mut list = DrawList::new();
        list.set_pen_color(Color::RED);
        list.fill_polygon(&tri());
        list.set_pen_color(Color::BLUE);
        list.stroke_polyline(&tri(), true);

        assert_eq!(list.len(), 2);
        assert_eq!(list.items()[0].color(), Color::RED);
        assert_eq!(list.items()[1].color(), Color::BLUE);
        assert!(matches!(&list.items()[1], DrawCmd::Stroke(s) if s.closed));
    }

    #[test]
    fn degenerate_geometry_is_dropped() {
        let mut list = DrawList::new();
        list.fill_polygon(&tri()[..2]);
        list.stroke_polyline(&tri()[..1], false);
        assert!(list.is_empty());
    }

    #[test]
    fn clear_resets_pen_and_items() {
        let mut list = DrawList::new();
        list.set_pen_color(Color::YELLOW);
        list.fill_polygon(&tri());
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.pen(), Color::BLACK);
    }
}
