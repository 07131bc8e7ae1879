use crate::coords::Point2D;
use crate::paint::Color;

/// Renderer-agnostic draw command in world space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fill(FillCmd),
    Stroke(StrokeCmd),
}

/// Filled polygon payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FillCmd {
    pub points: Vec<Point2D>,
    pub color: Color,
}

/// Outline payload.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeCmd {
    pub points: Vec<Point2D>,
    pub color: Color,
    pub closed: bool,
}

impl DrawCmd {
    #[inline]
    pub fn color(&self) -> Color {
        match self {
            DrawCmd::Fill(c) => c.color,
            DrawCmd::Stroke(c) => c.color,
        }
    }

    #[inline]
    pub fn points(&self) -> &[Point2D] {
        match self {
            DrawCmd::Fill(c) => &c.points,
            DrawCmd::Stroke(c) => &c.points,
        }
    }
}
