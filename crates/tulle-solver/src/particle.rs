//! Particle storage — the primary mutable data during simulation.
//!
//! The engine owns all particles in one contiguous array; constraints
//! reference them by index. This removes any possibility of dangling
//! references and keeps the projection loop cache-friendly.

use tulle_math::DVec3;
use tulle_types::{Scalar, TulleError, TulleResult};

/// A point mass.
///
/// `x` is the authoritative position at the end of the last completed
/// substep; `p` is the predicted position being projected during the
/// current substep. Pinned particles carry `w = 0` and are never moved
/// by projection or integration.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// Authoritative position.
    pub x: DVec3,
    /// Predicted position (scratch for the current substep).
    pub p: DVec3,
    /// Velocity.
    pub v: DVec3,
    /// Accumulated external force.
    pub f: DVec3,
    mass: Scalar,
    inv_mass: Scalar,
}

impl Particle {
    /// Mass. Pinned particles report infinite mass.
    #[inline]
    pub fn mass(&self) -> Scalar {
        self.mass
    }

    /// Inverse mass `w = 1/m`; zero for pinned particles.
    #[inline]
    pub fn inv_mass(&self) -> Scalar {
        self.inv_mass
    }

    /// Returns true if this particle is pinned (`w = 0`).
    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.inv_mass == 0.0
    }
}

/// Contiguous particle storage with the per-substep phase operations.
#[derive(Debug, Clone, Default)]
pub struct ParticleSet {
    particles: Vec<Particle>,
}

impl ParticleSet {
    /// Creates an empty particle set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dynamic particle and returns its index.
    ///
    /// Fails if `mass` is not strictly positive.
    pub fn add(&mut self, x: DVec3, v: DVec3, mass: Scalar) -> TulleResult<usize> {
        if !(mass > 0.0) {
            return Err(TulleError::InvalidConfig(format!(
                "Particle mass must be positive, got {mass}"
            )));
        }
        self.particles.push(Particle {
            x,
            p: x,
            v,
            f: DVec3::ZERO,
            mass,
            inv_mass: 1.0 / mass,
        });
        Ok(self.particles.len() - 1)
    }

    /// Adds a pinned particle (`w = 0`) and returns its index.
    pub fn add_pinned(&mut self, x: DVec3) -> usize {
        self.particles.push(Particle {
            x,
            p: x,
            v: DVec3::ZERO,
            f: DVec3::ZERO,
            mass: Scalar::INFINITY,
            inv_mass: 0.0,
        });
        self.particles.len() - 1
    }

    /// Pins an existing particle in place (`w ← 0`).
    ///
    /// Pinning by inverse mass and pinning by a stiff fixed-point
    /// constraint may coexist; with `w = 0` projection cannot move the
    /// particle, so the inverse mass trivially wins.
    pub fn pin(&mut self, i: usize) {
        self.particles[i].mass = Scalar::INFINITY;
        self.particles[i].inv_mass = 0.0;
        self.particles[i].v = DVec3::ZERO;
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns true if the set holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Read access to particle `i`.
    #[inline]
    pub fn get(&self, i: usize) -> &Particle {
        &self.particles[i]
    }

    /// Iterator over all particles.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Authoritative position of particle `i`.
    #[inline]
    pub fn position(&self, i: usize) -> DVec3 {
        self.particles[i].x
    }

    /// Predicted position of particle `i`.
    #[inline]
    pub fn predicted(&self, i: usize) -> DVec3 {
        self.particles[i].p
    }

    /// Velocity of particle `i`.
    #[inline]
    pub fn velocity(&self, i: usize) -> DVec3 {
        self.particles[i].v
    }

    /// Inverse mass of particle `i`.
    #[inline]
    pub fn inv_mass(&self, i: usize) -> Scalar {
        self.particles[i].inv_mass
    }

    /// Overwrites the velocity of particle `i`.
    #[inline]
    pub fn set_velocity(&mut self, i: usize, v: DVec3) {
        self.particles[i].v = v;
    }

    /// Zeroes every particle's accumulated force.
    pub fn clear_forces(&mut self) {
        for particle in &mut self.particles {
            particle.f = DVec3::ZERO;
        }
    }

    /// Accumulates a force on particle `i`.
    #[inline]
    pub fn add_force(&mut self, i: usize, force: DVec3) {
        self.particles[i].f += force;
    }

    /// Semi-implicit velocity integration: `v ← v + Δt·w·f`.
    ///
    /// Multiplying by the inverse mass keeps pinned particles at rest
    /// without branching.
    pub fn integrate_forces(&mut self, dt: Scalar) {
        for particle in &mut self.particles {
            particle.v += dt * particle.inv_mass * particle.f;
        }
    }

    /// Position prediction: `p ← x + Δt·v`.
    pub fn predict(&mut self, dt: Scalar) {
        for particle in &mut self.particles {
            particle.p = particle.x + dt * particle.v;
        }
    }

    /// Moves the predicted position of particle `i` by `delta`.
    #[inline]
    pub fn displace_predicted(&mut self, i: usize, delta: DVec3) {
        self.particles[i].p += delta;
    }

    /// Velocity recovery and position commit:
    /// `v ← (p − x)/Δt`, then `x ← p`.
    pub fn finalize_step(&mut self, dt: Scalar) {
        let inv_dt = 1.0 / dt;
        for particle in &mut self.particles {
            particle.v = (particle.p - particle.x) * inv_dt;
            particle.x = particle.p;
        }
    }

    /// Scales every velocity by `factor` (damping pass).
    pub fn damp_velocities(&mut self, factor: Scalar) {
        for particle in &mut self.particles {
            particle.v *= factor;
        }
    }

    /// Total kinetic energy `0.5·Σ mᵢ‖vᵢ‖²`, skipping pinned particles.
    pub fn kinetic_energy(&self) -> Scalar {
        self.particles
            .iter()
            .filter(|particle| !particle.is_pinned())
            .map(|particle| 0.5 * particle.mass * particle.v.length_squared())
            .sum()
    }
}
