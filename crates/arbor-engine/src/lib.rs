//! Arbor engine crate.
//!
//! A 2D scene graph (`graph`) over affine frames (`coords`), with shape
//! behaviors (`shapes`) that record into a backend-neutral draw list
//! (`scene`). The `render`, `device` and `window` layers put that list on
//! screen through wgpu and winit.

pub mod coords;
pub mod graph;
pub mod paint;
pub mod scene;
pub mod shapes;

pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
