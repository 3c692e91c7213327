//! Environmental collision constraint: `C = n̂·p₀ − d`, unilateral.
//!
//! Keeps a particle on the positive side of a half-space. Transient
//! collision hooks rebuild these every substep, e.g. as tangent planes of
//! an analytic collider near each particle.

use tulle_math::DVec3;
use tulle_types::Scalar;

use crate::constraint::MAX_ARITY;
use crate::particle::ParticleSet;

/// Half-space containment for a single particle.
#[derive(Debug, Clone)]
pub struct CollisionKernel {
    /// Particle index (p₀).
    pub particles: [usize; 1],
    /// Unit outward normal `n̂` of the plane.
    pub normal: DVec3,
    /// Plane offset `d`: the constraint surface is `n̂·p = d`.
    pub offset: Scalar,
}

impl CollisionKernel {
    /// Creates a half-space constraint with unit normal `normal`.
    pub fn new(particle: usize, normal: DVec3, offset: Scalar) -> Self {
        Self {
            particles: [particle],
            normal,
            offset,
        }
    }

    pub fn value(&self, particles: &ParticleSet) -> Scalar {
        self.normal.dot(particles.predicted(self.particles[0])) - self.offset
    }

    pub fn gradient(&self, _particles: &ParticleSet, out: &mut [DVec3; MAX_ARITY]) {
        out[0] = self.normal;
    }
}
