//! Coordinate and transform types shared by the scene graph and renderers.
//!
//! World space:
//! - +X right, +Y up
//! - angles in degrees, counter-clockwise, normalized to `[-180, 180)`
//!
//! The path renderer maps world units to NDC with a view uniform derived from
//! the [`Viewport`].

mod angle;
mod frame;
mod mat3;
mod point;
mod transform;
mod viewport;

pub use angle::normalize_degrees;
pub use frame::AffineFrame;
pub use mat3::Mat3;
pub use point::Point2D;
pub use transform::Transform2D;
pub use viewport::Viewport;
