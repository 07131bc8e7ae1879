//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry is in world units (+Y up), already transformed by the scene graph.
//! - The vertex shader converts to NDC using a view uniform.

mod ctx;
mod path;

pub use ctx::{RenderCtx, RenderTarget};
pub use path::{tessellate, Batch, PathRenderer, PathVertex, Topology};
