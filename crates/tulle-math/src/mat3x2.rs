//! 3×2 matrix type for deformation gradients in codimensional (shell)
//! simulation.
//!
//! In cloth simulation, triangles are 2D manifolds embedded in 3D space.
//! The deformation gradient F is a 3×2 matrix mapping from the 2D reference
//! configuration to the 3D deformed configuration.

use glam::{DMat2, DVec3};
use serde::{Deserialize, Serialize};

/// A 3×2 column-major matrix.
///
/// Used to represent the deformation gradient F for shell elements.
/// Columns represent the deformed edge vectors of a triangle
/// mapped through the inverse of the rest-state edge vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat3x2 {
    /// First column (3 components).
    pub col0: DVec3,
    /// Second column (3 components).
    pub col1: DVec3,
}

impl Mat3x2 {
    /// Creates a new 3×2 matrix from two column vectors.
    #[inline]
    pub fn from_cols(col0: DVec3, col1: DVec3) -> Self {
        Self { col0, col1 }
    }

    /// The zero matrix.
    pub const ZERO: Self = Self {
        col0: DVec3::ZERO,
        col1: DVec3::ZERO,
    };

    /// Identity-like matrix (first two columns of 3×3 identity).
    pub const IDENTITY: Self = Self {
        col0: DVec3::X,
        col1: DVec3::Y,
    };

    /// Compute F^T * F as a 2×2 matrix.
    ///
    /// This is the right Cauchy-Green deformation tensor C = F^T F,
    /// which measures strain independent of rotation.
    #[inline]
    pub fn ftf(&self) -> DMat2 {
        let a = self.col0.dot(self.col0);
        let b = self.col0.dot(self.col1);
        let d = self.col1.dot(self.col1);
        DMat2::from_cols_array(&[a, b, b, d])
    }

    /// Frobenius norm squared: ||F||_F^2 = trace(F^T F).
    #[inline]
    pub fn frobenius_norm_sq(&self) -> f64 {
        self.col0.length_squared() + self.col1.length_squared()
    }

    /// Multiply by a 2×2 matrix on the right: result = self * m.
    #[inline]
    pub fn mul_mat2(&self, m: DMat2) -> Self {
        Self {
            col0: self.col0 * m.col(0).x + self.col1 * m.col(0).y,
            col1: self.col0 * m.col(1).x + self.col1 * m.col(1).y,
        }
    }
}

impl std::ops::Add for Mat3x2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            col0: self.col0 + rhs.col0,
            col1: self.col1 + rhs.col1,
        }
    }
}

impl std::ops::Sub for Mat3x2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            col0: self.col0 - rhs.col0,
            col1: self.col1 - rhs.col1,
        }
    }
}

impl std::ops::Mul<f64> for Mat3x2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self {
            col0: self.col0 * rhs,
            col1: self.col1 * rhs,
        }
    }
}
