//! Frame timing.
//!
//! One [`FrameClock`] per window; `tick()` once per presented frame yields the
//! `dt` fed to `SceneGraph::update`.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
