use super::{Mat3, Point2D};

/// Immutable 2D coordinate frame (affine transform).
///
/// Every operation returns a new frame equal to `self ∘ T`, where `T` is the
/// elementary transform named by the call. Chaining calls therefore composes
/// from the outermost frame inward, which is the order of a walk from the
/// scene root toward a leaf:
///
/// ```
/// # use arbor_engine::coords::{AffineFrame, Point2D};
/// let frame = AffineFrame::identity().translate(10.0, 0.0).rotate(90.0);
/// let p = frame.apply(Point2D::new(1.0, 0.0));
/// assert!(p.approx_eq(Point2D::new(10.0, 1.0), 1e-5));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AffineFrame {
    matrix: Mat3,
}

impl AffineFrame {
    #[inline]
    pub const fn identity() -> Self {
        Self { matrix: Mat3::identity() }
    }

    #[inline]
    pub const fn from_matrix(matrix: Mat3) -> Self {
        Self { matrix }
    }

    #[inline]
    pub fn matrix(&self) -> &Mat3 {
        &self.matrix
    }

    #[inline]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::from_matrix(self.matrix * Mat3::translation(dx, dy))
    }

    #[inline]
    pub fn translate_by(&self, offset: Point2D) -> Self {
        self.translate(offset.x, offset.y)
    }

    /// Rotates counter-clockwise by `degrees`.
    #[inline]
    pub fn rotate(&self, degrees: f32) -> Self {
        Self::from_matrix(self.matrix * Mat3::rotation(degrees))
    }

    #[inline]
    pub fn scale(&self, sx: f32, sy: f32) -> Self {
        Self::from_matrix(self.matrix * Mat3::scaling(sx, sy))
    }

    /// `self ∘ other`: `other` is applied first.
    #[inline]
    pub fn compose(&self, other: &AffineFrame) -> Self {
        Self::from_matrix(self.matrix * other.matrix)
    }

    #[inline]
    pub fn apply(&self, point: Point2D) -> Point2D {
        self.matrix.transform_point(point)
    }

    /// Where this frame puts its own origin.
    #[inline]
    pub fn origin(&self) -> Point2D {
        self.apply(Point2D::zero())
    }

    /// Inverse frame, or `None` when the frame collapses an axis.
    #[inline]
    pub fn invert(&self) -> Option<Self> {
        self.matrix.inverse().map(Self::from_matrix)
    }

    #[inline]
    pub fn approx_eq(&self, other: &AffineFrame, eps: f32) -> bool {
        self.matrix.approx_eq(&other.matrix, eps)
    }
}

impl Default for AffineFrame {
    fn default() -> Self {
        Self::identity()
    }
}
