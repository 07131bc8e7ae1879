use super::{normalize_degrees, AffineFrame, Point2D};

/// Local placement of a node relative to its parent.
///
/// Applied as translate ∘ rotate ∘ scale. `rotation` is in degrees and always
/// kept within `[-180, 180)`; the scale is uniform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2D {
    translation: Point2D,
    rotation: f32,
    scale: f32,
}

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D {
        translation: Point2D::zero(),
        rotation: 0.0,
        scale: 1.0,
    };

    pub fn new(translation: Point2D, rotation: f32, scale: f32) -> Self {
        Self {
            translation,
            rotation: normalize_degrees(rotation),
            scale,
        }
    }

    #[inline]
    pub fn translation(&self) -> Point2D {
        self.translation
    }

    #[inline]
    pub fn set_translation(&mut self, translation: Point2D) {
        self.translation = translation;
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    #[inline]
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = normalize_degrees(degrees);
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// The frame this transform maps child coordinates through.
    #[inline]
    pub fn frame(&self) -> AffineFrame {
        self.frame_within(&AffineFrame::identity())
    }

    /// `parent ∘ self`.
    #[inline]
    pub fn frame_within(&self, parent: &AffineFrame) -> AffineFrame {
        parent
            .translate_by(self.translation)
            .rotate(self.rotation)
            .scale(self.scale, self.scale)
    }

    /// Inverse of [`frame`](Self::frame), built from the inverse elementary
    /// transforms in reverse order.
    ///
    /// `None` when the scale is zero (or its reciprocal overflows).
    pub fn inverse_frame(&self) -> Option<AffineFrame> {
        let inv_scale = 1.0 / self.scale;
        if !inv_scale.is_finite() {
            return None;
        }
        Some(
            AffineFrame::identity()
                .scale(inv_scale, inv_scale)
                .rotate(-self.rotation)
                .translate_by(-self.translation),
        )
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_is_normalized_on_every_write() {
        let mut t = Transform2D::new(Point2D::zero(), 540.0, 1.0);
        assert_eq!(t.rotation(), -180.0);
        t.set_rotation(-190.0);
        assert_eq!(t.rotation(), 170.0);
    }

    #[test]
    fn inverse_frame_undoes_frame() {
        let t = Transform2D::new(Point2D::new(4.0, -2.0), 135.0, 0.5);
        let inv = t.inverse_frame().expect("non-zero scale");
        assert!(t.frame().compose(&inv).approx_eq(&AffineFrame::identity(), 1e-5));
        assert!(inv.approx_eq(&t.frame().invert().expect("invertible"), 1e-4));
    }

    #[test]
    fn zero_scale_has_no_inverse() {
        let t = Transform2D::new(Point2D::new(1.0, 0.0), 0.0, 0.0);
        assert!(t.inverse_frame().is_none());
    }
}
