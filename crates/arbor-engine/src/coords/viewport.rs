/// Drawable size in physical pixels.
///
/// World space is laid out so that `[-1, 1]` spans the shorter axis; the
/// longer axis extends proportionally.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Half-extent of the visible world along x and y.
    ///
    /// Invalid viewports fall back to the unit square.
    pub fn world_half_extent(self) -> [f32; 2] {
        if !self.is_valid() {
            return [1.0, 1.0];
        }
        if self.width >= self.height {
            [self.width / self.height, 1.0]
        } else {
            [1.0, self.height / self.width]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_extends_x() {
        assert_eq!(Viewport::new(1600.0, 800.0).world_half_extent(), [2.0, 1.0]);
    }

    #[test]
    fn portrait_extends_y() {
        assert_eq!(Viewport::new(400.0, 1200.0).world_half_extent(), [1.0, 3.0]);
    }

    #[test]
    fn zero_size_falls_back_to_unit() {
        assert_eq!(Viewport::new(0.0, 600.0).world_half_extent(), [1.0, 1.0]);
    }
}
