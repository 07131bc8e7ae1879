use core::ops::Mul;

use super::Point2D;

/// Row-major 3x3 matrix acting on homogeneous 2D points (column vectors).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3 {
    pub rows: [[f32; 3]; 3],
}

impl Mat3 {
    #[inline]
    pub const fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Self { rows }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    #[inline]
    pub const fn translation(dx: f32, dy: f32) -> Self {
        Self::from_rows([[1.0, 0.0, dx], [0.0, 1.0, dy], [0.0, 0.0, 1.0]])
    }

    /// Counter-clockwise rotation by `degrees`.
    #[inline]
    pub fn rotation(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::from_rows([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    #[inline]
    pub const fn scaling(sx: f32, sy: f32) -> Self {
        Self::from_rows([[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Multiplies the homogeneous vector `[x, y, w]`.
    #[inline]
    pub fn transform(&self, v: [f32; 3]) -> [f32; 3] {
        let r = &self.rows;
        [
            r[0][0] * v[0] + r[0][1] * v[1] + r[0][2] * v[2],
            r[1][0] * v[0] + r[1][1] * v[1] + r[1][2] * v[2],
            r[2][0] * v[0] + r[2][1] * v[1] + r[2][2] * v[2],
        ]
    }

    /// Transforms `p` augmented with `w = 1`, dropping the third coordinate.
    #[inline]
    pub fn transform_point(&self, p: Point2D) -> Point2D {
        let [x, y, _] = self.transform(p.to_homogeneous());
        Point2D::new(x, y)
    }

    pub fn determinant(&self) -> f32 {
        let m = &self.rows;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse via the adjugate. `None` when singular or not finite.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let m = &self.rows;
        let inv = 1.0 / det;

        let cof = |r0: usize, r1: usize, c0: usize, c1: usize| {
            m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0]
        };

        let out = Self::from_rows([
            [cof(1, 2, 1, 2) * inv, -cof(0, 2, 1, 2) * inv, cof(0, 1, 1, 2) * inv],
            [-cof(1, 2, 0, 2) * inv, cof(0, 2, 0, 2) * inv, -cof(0, 1, 0, 2) * inv],
            [cof(1, 2, 0, 1) * inv, -cof(0, 2, 0, 1) * inv, cof(0, 1, 0, 1) * inv],
        ]);

        out.is_finite().then_some(out)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.rows.iter().flatten().all(|v| v.is_finite())
    }

    pub fn approx_eq(&self, other: &Mat3, eps: f32) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Mat3 {
        let a = &self.rows;
        let b = &rhs.rows;
        let mut out = [[0.0f32; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
        }
        Mat3::from_rows(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn identity_is_neutral() {
        let m = Mat3::translation(3.0, -2.0) * Mat3::rotation(30.0);
        assert!((Mat3::identity() * m).approx_eq(&m, EPS));
        assert!((m * Mat3::identity()).approx_eq(&m, EPS));
    }

    #[test]
    fn rotation_quarter_turn_is_counter_clockwise() {
        let p = Mat3::rotation(90.0).transform_point(Point2D::new(1.0, 0.0));
        assert!(p.approx_eq(Point2D::new(0.0, 1.0), EPS));
    }

    #[test]
    fn translation_moves_points_not_directions() {
        let m = Mat3::translation(4.0, 5.0);
        assert_eq!(m.transform_point(Point2D::new(1.0, 1.0)), Point2D::new(5.0, 6.0));
        assert_eq!(m.transform([1.0, 1.0, 0.0]), [1.0, 1.0, 0.0]);
    }

    #[test]
    fn inverse_undoes_transform() {
        let m = Mat3::translation(7.0, -1.0) * Mat3::rotation(-65.0) * Mat3::scaling(2.0, 0.5);
        let inv = m.inverse().expect("invertible");
        assert!((m * inv).approx_eq(&Mat3::identity(), EPS));
        assert!((inv * m).approx_eq(&Mat3::identity(), EPS));
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        assert!(Mat3::scaling(0.0, 1.0).inverse().is_none());
        assert_eq!(Mat3::scaling(0.0, 3.0).determinant(), 0.0);
    }

    #[test]
    fn determinant_of_scaling_is_area_factor() {
        assert!((Mat3::scaling(2.0, 3.0).determinant() - 6.0).abs() < EPS);
        assert!((Mat3::rotation(33.0).determinant() - 1.0).abs() < EPS);
    }
}
