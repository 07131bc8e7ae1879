//! Built-in shape payloads.
//!
//! Each shape is a [`Behavior`](crate::graph::Behavior) that maps its local
//! geometry through the frame handed down by the scene graph and emits it on
//! a [`Canvas`](crate::scene::Canvas).

mod circle;
mod line;
mod polygon;

pub use circle::CircleShape;
pub use line::LineShape;
pub use polygon::{Polygon2D, PolygonShape};
