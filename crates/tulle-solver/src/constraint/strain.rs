//! Continuum triangle strain constraint (St. Venant–Kirchhoff membrane).
//!
//! The triangle's rest shape is flattened into a 2D frame once, giving a
//! 2×2 rest edge matrix Dₘ. At evaluation time the deformation gradient
//! is the 3×2 matrix F = Dₛ·Dₘ⁻¹ built from the current edge vectors, and
//! the Green strain E = ½(FᵀF − I) measures deformation independent of
//! rotation. The constraint value is the membrane strain energy
//!
//!   C = A₀ · (μ‖E‖²_F + ½λ tr(E)²)
//!
//! which vanishes exactly at (rotated) rest shapes. The gradient flows
//! through the first Piola–Kirchhoff stress P = F(2μE + λ tr(E) I):
//! ∂C/∂Dₛ = A₀·P·Dₘ⁻ᵀ.

use tulle_math::{DMat2, DVec3, Mat3x2};
use tulle_types::constants::NORMAL_EPSILON;
use tulle_types::{Scalar, TulleError, TulleResult};

use crate::constraint::MAX_ARITY;
use crate::particle::ParticleSet;

/// Membrane strain constraint over one triangle.
#[derive(Debug, Clone)]
pub struct TriangleStrainKernel {
    /// Particle indices (p₀, p₁, p₂).
    pub particles: [usize; 3],
    /// Inverse of the 2×2 rest edge matrix.
    inv_rest: DMat2,
    /// Rest area A₀.
    rest_area: Scalar,
    /// Second Lamé parameter (shear modulus) μ.
    mu: Scalar,
    /// First Lamé parameter λ.
    lambda: Scalar,
}

impl TriangleStrainKernel {
    /// Builds the constraint from the particles' current authoritative
    /// positions and material parameters.
    ///
    /// Fails if the rest triangle is degenerate (zero area).
    pub fn from_rest(
        particles: &ParticleSet,
        indices: [usize; 3],
        young_modulus: Scalar,
        poisson_ratio: Scalar,
    ) -> TulleResult<Self> {
        let x0 = particles.position(indices[0]);
        let u = particles.position(indices[1]) - x0;
        let v = particles.position(indices[2]) - x0;

        let normal = u.cross(v);
        if normal.length_squared() < NORMAL_EPSILON {
            return Err(TulleError::InvalidMesh(
                "Strain constraint rest triangle has zero area".into(),
            ));
        }

        // Orthonormal 2D frame in the rest triangle's plane
        let ex = u.normalize();
        let ey = normal.normalize().cross(ex);

        let rest = DMat2::from_cols_array(&[u.dot(ex), u.dot(ey), v.dot(ex), v.dot(ey)]);
        let rest_area = 0.5 * rest.determinant();

        let mu = young_modulus / (2.0 * (1.0 + poisson_ratio));
        let lambda = young_modulus * poisson_ratio
            / ((1.0 + poisson_ratio) * (1.0 - 2.0 * poisson_ratio));

        Ok(Self {
            particles: indices,
            inv_rest: rest.inverse(),
            rest_area,
            mu,
            lambda,
        })
    }

    pub fn value(&self, particles: &ParticleSet) -> Scalar {
        let f = self.deformation(particles);
        let e = green_strain(&f);
        let trace = e.col(0).x + e.col(1).y;
        let frob_sq = e.col(0).length_squared() + e.col(1).length_squared();
        self.rest_area * (self.mu * frob_sq + 0.5 * self.lambda * trace * trace)
    }

    pub fn gradient(&self, particles: &ParticleSet, out: &mut [DVec3; MAX_ARITY]) {
        let f = self.deformation(particles);
        let e = green_strain(&f);
        let trace = e.col(0).x + e.col(1).y;

        // First Piola–Kirchhoff stress P = F·(2μE + λ tr(E) I)
        let s = e * (2.0 * self.mu) + DMat2::IDENTITY * (self.lambda * trace);
        let p = f.mul_mat2(s);

        let g = p.mul_mat2(self.inv_rest.transpose()) * self.rest_area;
        out[1] = g.col0;
        out[2] = g.col1;
        out[0] = -(g.col0 + g.col1);
    }

    fn deformation(&self, particles: &ParticleSet) -> Mat3x2 {
        let [i0, i1, i2] = self.particles;
        let p0 = particles.predicted(i0);
        let d_s = Mat3x2::from_cols(
            particles.predicted(i1) - p0,
            particles.predicted(i2) - p0,
        );
        d_s.mul_mat2(self.inv_rest)
    }
}

/// Green strain tensor E = ½(FᵀF − I).
fn green_strain(f: &Mat3x2) -> DMat2 {
    (f.ftf() - DMat2::IDENTITY) * 0.5
}
