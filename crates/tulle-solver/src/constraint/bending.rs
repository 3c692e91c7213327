//! Dihedral bending constraint for two triangles sharing an edge.
//!
//! ## Geometry
//!
//! Particle order is (p₀, p₁, p₂, p₃): the shared edge is (p₀, p₁) and
//! p₂, p₃ are the wing vertices of the two triangles.
//!
//! ```text
//!        p2
//!       / \
//!      /   \
//!    p0 ─── p1
//!      \   /
//!       \ /
//!        p3
//! ```
//!
//! With n̂₁ = normalize((p₁−p₀)×(p₂−p₀)) and n̂₂ = normalize((p₁−p₀)×(p₃−p₀)),
//!
//!   C = acos(clamp(n̂₁·n̂₂, −1, 1)) − φ₀
//!
//! The analytic gradient follows the chain rule through d = n̂₁·n̂₂:
//! dC/dd = −1/√(1−d²), and the partials of d pull back through the cross
//! products via scalar triple product identities. At flat configurations
//! (d = ±1) the gradient has a removable singularity whose limit is zero;
//! the implementation reports exactly zero there.

use tulle_math::numeric::safe_acos;
use tulle_math::DVec3;
use tulle_types::constants::{NORMAL_EPSILON, PROJECTION_EPSILON};
use tulle_types::Scalar;

use crate::constraint::MAX_ARITY;
use crate::particle::ParticleSet;

/// Dihedral-angle bending constraint over four particles.
#[derive(Debug, Clone)]
pub struct BendingKernel {
    /// Particle indices (edge p₀, edge p₁, wing p₂, wing p₃).
    pub particles: [usize; 4],
    /// Rest dihedral angle φ₀ (radians).
    pub rest_angle: Scalar,
}

impl BendingKernel {
    /// Creates a bending constraint with an explicit rest angle.
    pub fn new(particles: [usize; 4], rest_angle: Scalar) -> Self {
        Self {
            particles,
            rest_angle,
        }
    }

    /// Creates a bending constraint whose rest angle is measured from the
    /// particles' current authoritative positions.
    ///
    /// Returns NaN as the rest angle if either triangle is degenerate;
    /// callers building constraint sets treat that as a topology error.
    pub fn from_rest(particles: &ParticleSet, indices: [usize; 4]) -> Self {
        let rest_angle = dihedral_angle(
            particles.position(indices[0]),
            particles.position(indices[1]),
            particles.position(indices[2]),
            particles.position(indices[3]),
        );
        Self::new(indices, rest_angle)
    }

    pub fn value(&self, particles: &ParticleSet) -> Scalar {
        let [i0, i1, i2, i3] = self.particles;
        dihedral_angle(
            particles.predicted(i0),
            particles.predicted(i1),
            particles.predicted(i2),
            particles.predicted(i3),
        ) - self.rest_angle
    }

    pub fn gradient(&self, particles: &ParticleSet, out: &mut [DVec3; MAX_ARITY]) {
        let [i0, i1, i2, i3] = self.particles;
        let x0 = particles.predicted(i0);

        let e = particles.predicted(i1) - x0;
        let a = particles.predicted(i2) - x0;
        let b = particles.predicted(i3) - x0;

        let n1 = e.cross(a);
        let n2 = e.cross(b);
        let l1_sq = n1.length_squared();
        let l2_sq = n2.length_squared();

        if l1_sq < NORMAL_EPSILON || l2_sq < NORMAL_EPSILON {
            // Degenerate triangle: normal undefined
            zero_gradient(out);
            return;
        }

        let l1 = l1_sq.sqrt();
        let l2 = l2_sq.sqrt();
        let n1_hat = n1 / l1;
        let n2_hat = n2 / l2;

        let d = n1_hat.dot(n2_hat).clamp(-1.0, 1.0);
        let sin_sq = 1.0 - d * d;
        if sin_sq < PROJECTION_EPSILON {
            // Flat configuration: removable singularity, zero limit
            zero_gradient(out);
            return;
        }

        // Partials of d = n̂₁·n̂₂ w.r.t. the difference vectors e, a, b
        let u = (n2_hat - d * n1_hat) / l1;
        let w = (n1_hat - d * n2_hat) / l2;

        let dd_da = u.cross(e);
        let dd_db = w.cross(e);
        let dd_de = a.cross(u) + b.cross(w);

        let coeff = -1.0 / sin_sq.sqrt();
        out[1] = coeff * dd_de;
        out[2] = coeff * dd_da;
        out[3] = coeff * dd_db;
        out[0] = -(out[1] + out[2] + out[3]);
    }
}

/// Dihedral angle between the triangles (x₀, x₁, x₂) and (x₀, x₁, x₃).
///
/// Returns NaN when either triangle is degenerate.
pub fn dihedral_angle(x0: DVec3, x1: DVec3, x2: DVec3, x3: DVec3) -> Scalar {
    let e = x1 - x0;
    let n1 = e.cross(x2 - x0);
    let n2 = e.cross(x3 - x0);

    if n1.length_squared() < NORMAL_EPSILON || n2.length_squared() < NORMAL_EPSILON {
        return Scalar::NAN;
    }

    safe_acos(n1.normalize().dot(n2.normalize()))
}

fn zero_gradient(out: &mut [DVec3; MAX_ARITY]) {
    for g in out.iter_mut() {
        *g = DVec3::ZERO;
    }
}
