//! GPU device + surface management.
//!
//! Creates the wgpu device and queue, configures the window surface and hands
//! out per-frame encoders.

mod gpu;
mod surface;

pub use gpu::{Gpu, GpuConfig, GpuFrame};
pub use surface::SurfaceRecovery;
