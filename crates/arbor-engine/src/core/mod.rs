//! Contracts between the window runtime and applications.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
