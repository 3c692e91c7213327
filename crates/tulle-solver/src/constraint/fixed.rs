//! Fixed-point constraint: `C = ‖p₀ − x*‖`.
//!
//! A positional attractor toward a target point. Always bilateral and
//! typically registered stiff (k = 1, α = 0). Pinning via `w = 0` and
//! pinning via this constraint may coexist; zero inverse mass makes the
//! projection a no-op, so it trivially wins.

use tulle_math::DVec3;
use tulle_types::constants::PROJECTION_EPSILON;
use tulle_types::Scalar;

use crate::constraint::MAX_ARITY;
use crate::particle::ParticleSet;

/// Attracts a single particle to a fixed target position.
#[derive(Debug, Clone)]
pub struct FixedPointKernel {
    /// Particle index (p₀).
    pub particles: [usize; 1],
    /// Target position `x*`.
    pub target: DVec3,
}

impl FixedPointKernel {
    /// Creates a fixed-point constraint toward `target`.
    pub fn new(particle: usize, target: DVec3) -> Self {
        Self {
            particles: [particle],
            target,
        }
    }

    pub fn value(&self, particles: &ParticleSet) -> Scalar {
        (particles.predicted(self.particles[0]) - self.target).length()
    }

    pub fn gradient(&self, particles: &ParticleSet, out: &mut [DVec3; MAX_ARITY]) {
        let diff = particles.predicted(self.particles[0]) - self.target;
        let len = diff.length();
        if len < PROJECTION_EPSILON {
            // Already at the target
            out[0] = DVec3::ZERO;
            return;
        }
        out[0] = diff / len;
    }
}
