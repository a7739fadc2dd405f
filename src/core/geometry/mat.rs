use std::fmt::{self, Display, Formatter};

use super::Vector3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// A 3x3 matrix was built from a slice that did not hold 9 values.
    WrongLength(usize),
}

impl Display for MatrixError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::WrongLength(len) => {
                write!(f, "3x3 matrix needs 9 values, got {}", len)
            }
        }
    }
}

impl std::error::Error for MatrixError {}

/// Row-major 3x3 rotation matrix.
///
/// Vectors are treated as rows: `transform(v)` computes `v * M`. With that
/// convention `a.multiply(&b)` applies `a` first and `b` second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix {
    values: [f64; 9],
}

impl RotationMatrix {
    pub const IDENTITY: RotationMatrix = RotationMatrix {
        values: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    pub fn from_values(values: &[f64]) -> Result<Self, MatrixError> {
        let values: [f64; 9] = values
            .try_into()
            .map_err(|_| MatrixError::WrongLength(values.len()))?;
        Ok(Self { values })
    }

    /// Rotation about the vertical (y) axis.
    pub fn heading(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        #[rustfmt::skip]
        let values = [
            cos,  0.0, sin,
            0.0,  1.0, 0.0,
            -sin, 0.0, cos,
        ];
        Self { values }
    }

    /// Rotation about the horizontal (x) axis.
    pub fn pitch(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        #[rustfmt::skip]
        let values = [
            1.0, 0.0, 0.0,
            0.0, cos, -sin,
            0.0, sin, cos,
        ];
        Self { values }
    }

    /// Heading first, then pitch. Rebuilt from scratch every frame.
    pub fn from_heading_pitch(heading_degrees: f64, pitch_degrees: f64) -> Self {
        Self::heading(heading_degrees).multiply(&Self::pitch(pitch_degrees))
    }

    pub fn multiply(&self, other: &RotationMatrix) -> RotationMatrix {
        let mut values = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                values[row * 3 + col] = (0..3)
                    .map(|i| self.values[row * 3 + i] * other.values[i * 3 + col])
                    .sum();
            }
        }
        RotationMatrix { values }
    }

    pub fn transform(&self, v: Vector3) -> Vector3 {
        let m = &self.values;
        Vector3::new(
            v.x * m[0] + v.y * m[3] + v.z * m[6],
            v.x * m[1] + v.y * m[4] + v.z * m[7],
            v.x * m[2] + v.y * m[5] + v.z * m[8],
        )
    }
}

impl Default for RotationMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Display for RotationMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.values.chunks(3) {
            writeln!(f, "[{:8.3},{:8.3},{:8.3}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}
