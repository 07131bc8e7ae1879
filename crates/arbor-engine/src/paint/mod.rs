//! Paint model shared between shapes and renderers.
//!
//! Shapes set a single pen color before emitting geometry; there are no
//! gradients or patterns.

mod color;

pub use color::Color;
