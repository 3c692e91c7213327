//! Distance constraint: `C = ‖p₀ − p₁‖ − d`.
//!
//! The workhorse in-plane constraint; the cloth builder instantiates one
//! per undirected mesh edge under the EdgeDistance strategy.

use tulle_math::DVec3;
use tulle_types::constants::PROJECTION_EPSILON;
use tulle_types::Scalar;

use crate::constraint::MAX_ARITY;
use crate::particle::ParticleSet;

/// Distance constraint between two particles.
#[derive(Debug, Clone)]
pub struct DistanceKernel {
    /// Particle indices (p₀, p₁).
    pub particles: [usize; 2],
    /// Rest length `d`.
    pub rest_length: Scalar,
}

impl DistanceKernel {
    /// Creates a distance constraint with an explicit rest length.
    pub fn new(a: usize, b: usize, rest_length: Scalar) -> Self {
        Self {
            particles: [a, b],
            rest_length,
        }
    }

    /// Creates a distance constraint whose rest length is the current
    /// distance between the two particles' authoritative positions.
    pub fn from_rest(particles: &ParticleSet, a: usize, b: usize) -> Self {
        let rest_length = (particles.position(a) - particles.position(b)).length();
        Self::new(a, b, rest_length)
    }

    pub fn value(&self, particles: &ParticleSet) -> Scalar {
        let [a, b] = self.particles;
        (particles.predicted(a) - particles.predicted(b)).length() - self.rest_length
    }

    pub fn gradient(&self, particles: &ParticleSet, out: &mut [DVec3; MAX_ARITY]) {
        let [a, b] = self.particles;
        let diff = particles.predicted(a) - particles.predicted(b);
        let len = diff.length();
        if len < PROJECTION_EPSILON {
            // Coincident particles: direction undefined
            out[0] = DVec3::ZERO;
            out[1] = DVec3::ZERO;
            return;
        }
        let n = diff / len;
        out[0] = n;
        out[1] = -n;
    }
}
