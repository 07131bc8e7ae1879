//! Draw stream types.
//!
//! Responsibilities:
//! - define the [`Canvas`] surface shapes draw onto
//! - record world-space draw commands in paint order ([`DrawList`])
//!
//! Renderers under `render` consume a [`DrawList`]; nothing here touches the GPU.

mod canvas;
mod cmd;
mod list;

pub use canvas::Canvas;
pub use cmd::{DrawCmd, FillCmd, StrokeCmd};
pub use list::DrawList;
