//! Isometric bending constraint (Bender–Weber–Botsch formulation).
//!
//! A linearised, sign-agnostic alternative to dihedral bending. A
//! symmetric 4×4 matrix Q is built once from rest cotangent weights;
//! the constraint is the quadratic form
//!
//!   C = ½ · Σᵢⱼ Qᵢⱼ (pᵢ·pⱼ),      ∇ᵢC = Σⱼ Qᵢⱼ pⱼ
//!
//! Q = (3 / (A₀ + A₁)) · K Kᵀ, where K is the cotangent Laplacian stencil
//! of the hinge. For a flat rest configuration K annihilates the rest
//! positions, so both C and ∇C vanish there. Gradients are exact, not
//! approximated: the quadratic form's derivative is linear in p.

use tulle_math::numeric::{cot_theta, triangle_area};
use tulle_math::{DVec3, DVec4};
use tulle_types::{Scalar, TulleError, TulleResult};

use crate::constraint::MAX_ARITY;
use crate::particle::ParticleSet;

/// Isometric bending constraint over four particles
/// (edge p₀, edge p₁, wing p₂, wing p₃).
#[derive(Debug, Clone)]
pub struct IsometricBendingKernel {
    /// Particle indices (edge p₀, edge p₁, wing p₂, wing p₃).
    pub particles: [usize; 4],
    /// Symmetric 4×4 quadratic-form matrix, row i = `q[i]`.
    q: [DVec4; 4],
}

impl IsometricBendingKernel {
    /// Builds the constraint from the particles' current authoritative
    /// positions.
    ///
    /// Fails if the hinge has zero total area. A cotangent that is
    /// non-finite (parallel edge pair) is substituted with zero.
    pub fn from_rest(particles: &ParticleSet, indices: [usize; 4]) -> TulleResult<Self> {
        let x0 = particles.position(indices[0]);
        let x1 = particles.position(indices[1]);
        let x2 = particles.position(indices[2]);
        let x3 = particles.position(indices[3]);

        let e0 = x1 - x0;
        let e1 = x2 - x1;
        let e2 = x0 - x2;
        let e3 = x3 - x0;
        let e4 = x1 - x3;

        let cot_01 = finite_or_zero(cot_theta(e0, -e1));
        let cot_02 = finite_or_zero(cot_theta(e0, -e2));
        let cot_03 = finite_or_zero(cot_theta(e0, e3));
        let cot_04 = finite_or_zero(cot_theta(e0, e4));

        let k = DVec4::new(
            cot_01 + cot_04,
            cot_02 + cot_03,
            -cot_01 - cot_02,
            -cot_03 - cot_04,
        );

        let total_area = triangle_area(x0, x1, x2) + triangle_area(x0, x1, x3);
        if !(total_area > 0.0) {
            return Err(TulleError::InvalidMesh(
                "Isometric bending hinge has zero rest area".into(),
            ));
        }

        let scale = 3.0 / total_area;
        let q = [k.x * k * scale, k.y * k * scale, k.z * k * scale, k.w * k * scale];

        Ok(Self {
            particles: indices,
            q,
        })
    }

    pub fn value(&self, particles: &ParticleSet) -> Scalar {
        let p = self.predicted(particles);
        let mut sum = 0.0;
        for i in 0..4 {
            for j in 0..4 {
                sum += self.q[i][j] * p[i].dot(p[j]);
            }
        }
        0.5 * sum
    }

    pub fn gradient(&self, particles: &ParticleSet, out: &mut [DVec3; MAX_ARITY]) {
        let p = self.predicted(particles);
        for i in 0..4 {
            let mut g = DVec3::ZERO;
            for j in 0..4 {
                g += self.q[i][j] * p[j];
            }
            out[i] = g;
        }
    }

    fn predicted(&self, particles: &ParticleSet) -> [DVec3; 4] {
        let [i0, i1, i2, i3] = self.particles;
        [
            particles.predicted(i0),
            particles.predicted(i1),
            particles.predicted(i2),
            particles.predicted(i3),
        ]
    }
}

fn finite_or_zero(x: Scalar) -> Scalar {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}
