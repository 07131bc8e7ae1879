use std::time::{Duration, Instant};

/// Timing for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    /// Sum of all clamped `dt` values so far, in seconds.
    pub elapsed: f64,
    pub frame_index: u64,
}

/// Per-window frame clock.
///
/// `dt` is clamped so a debugger pause or a minimized window does not hand
/// the scene graph a huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    elapsed: f64,
    frame_index: u64,
    min_dt: Duration,
    max_dt: Duration,
}

impl FrameClock {
    pub const DEFAULT_MIN_DT: Duration = Duration::from_micros(100);
    pub const DEFAULT_MAX_DT: Duration = Duration::from_millis(100);

    pub fn new() -> Self {
        Self::with_clamps(Self::DEFAULT_MIN_DT, Self::DEFAULT_MAX_DT)
    }

    pub fn with_clamps(min_dt: Duration, max_dt: Duration) -> Self {
        debug_assert!(min_dt <= max_dt, "min_dt must not exceed max_dt");
        Self { last: None, elapsed: 0.0, frame_index: 0, min_dt, max_dt }
    }

    /// Forgets the previous tick; the next frame gets `min_dt`.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock as if the frame started at `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let raw = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => self.min_dt,
        };
        let dt = raw.clamp(self.min_dt, self.max_dt).as_secs_f32();

        self.last = Some(now);
        self.elapsed += dt as f64;

        let time = FrameTime { dt, elapsed: self.elapsed, frame_index: self.frame_index };
        self.frame_index = self.frame_index.wrapping_add(1);
        time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_uses_min_dt() {
        let mut clock = FrameClock::new();
        let t = clock.tick_at(Instant::now());
        assert_eq!(t.dt, FrameClock::DEFAULT_MIN_DT.as_secs_f32());
        assert_eq!(t.frame_index, 0);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut clock = FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(50));
        let start = Instant::now();
        clock.tick_at(start);
        let t = clock.tick_at(start + Duration::from_secs(3));
        assert_eq!(t.dt, 0.05);
        assert_eq!(t.frame_index, 1);
    }

    #[test]
    fn normal_frame_passes_through() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick_at(start);
        let t = clock.tick_at(start + Duration::from_millis(16));
        assert!((t.dt - 0.016).abs() < 1e-6);
    }
}
