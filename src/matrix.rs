use crate::error::{GeomError, Result};
use crate::geometry::Point2D;
use std::ops::Mul;

/// 3×3 homogeneous transform, stored row-major.
///
/// ```text
///  | m0 m1 m2 |   | x |
///  | m3 m4 m5 | * | y |
///  | m6 m7 m8 |   | 1 |
/// ```
///
/// `x' = (m0·x + m1·y + m2) / h`, `y' = (m3·x + m4·y + m5) / h` with
/// `h = m6·x + m7·y + m8`. The affine constructors keep the bottom row at
/// `0 0 1`; callers building a general projective matrix by hand own the
/// `h != 0` requirement, which [`Matrix3::map`] checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    pub m: [f32; 9],
}

impl Default for Matrix3 {
    fn default() -> Matrix3 {
        Matrix3::IDENTITY
    }
}

impl Matrix3 {
    pub const IDENTITY: Matrix3 = Matrix3 {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    pub const fn from_rows(m: [f32; 9]) -> Matrix3 {
        Matrix3 { m }
    }

    pub fn translate(dx: f32, dy: f32) -> Matrix3 {
        Matrix3::from_rows([1.0, 0.0, dx, 0.0, 1.0, dy, 0.0, 0.0, 1.0])
    }

    pub fn scale(sx: f32, sy: f32) -> Matrix3 {
        Matrix3::from_rows([sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0])
    }

    /// Rotation about the origin. Positive angles turn +x towards +y.
    pub fn rotate(degrees: f32) -> Matrix3 {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Matrix3::from_rows([cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0])
    }

    pub fn rotate_about(degrees: f32, pivot: Point2D) -> Matrix3 {
        if pivot == Point2D::ORIGIN {
            return Matrix3::rotate(degrees);
        }
        Matrix3::translate(pivot.x, pivot.y)
            .concat(&Matrix3::rotate(degrees))
            .concat(&Matrix3::translate(-pivot.x, -pivot.y))
    }

    /// `self · other`: the result applies `other` first, then `self`.
    pub fn concat(&self, other: &Matrix3) -> Matrix3 {
        let a = &self.m;
        let b = &other.m;
        let mut out = [0.0f32; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = (0..3).map(|k| a[row * 3 + k] * b[k * 3 + col]).sum();
            }
        }
        Matrix3::from_rows(out)
    }

    /// Maps a point through the full homogeneous division.
    pub fn map(&self, point: Point2D) -> Result<Point2D> {
        let m = &self.m;
        let Point2D { x, y } = point;
        let h = m[6] * x + m[7] * y + m[8];
        if h == 0.0 {
            return Err(GeomError::DegenerateTransform { x, y });
        }
        let x1 = m[0] * x + m[1] * y + m[2];
        let y1 = m[3] * x + m[4] * y + m[5];
        Ok(Point2D::new(x1 / h, y1 / h))
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: Matrix3) -> Matrix3 {
        self.concat(&rhs)
    }
}
