//! Simulation world — the state the engine owns and the scene hooks
//! mutate.
//!
//! Holds the particle storage, the persistent constraint list, and the
//! per-substep transient constraint list, plus the simulation clock.
//! Persistent constraints live for the whole simulation; transient
//! constraints are cleared by the engine before the collision hook runs
//! and again at the end of every substep.

use tulle_types::Scalar;

use crate::constraint::Constraint;
use crate::particle::ParticleSet;

/// Engine-owned simulation state, handed to [`Scene`](crate::Scene)
/// hooks by mutable reference.
#[derive(Debug, Default)]
pub struct World {
    /// All particles, indexed by the constraints.
    pub particles: ParticleSet,
    /// Persistent constraints, projected in registration order.
    pub constraints: Vec<Constraint>,
    /// Transient (per-substep) constraints, projected after the
    /// persistent ones, in registration order.
    pub transient_constraints: Vec<Constraint>,

    time: Scalar,
    dt: Scalar,
}

impl World {
    pub(crate) fn new(dt: Scalar) -> Self {
        Self {
            dt,
            ..Default::default()
        }
    }

    /// Current simulated physics time (seconds).
    #[inline]
    pub fn time(&self) -> Scalar {
        self.time
    }

    /// The fixed physics timestep.
    #[inline]
    pub fn dt(&self) -> Scalar {
        self.dt
    }

    /// Registers a persistent constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Registers a transient constraint for the current substep.
    pub fn add_transient_constraint(&mut self, constraint: Constraint) {
        self.transient_constraints.push(constraint);
    }

    pub(crate) fn advance_time(&mut self) {
        self.time += self.dt;
    }
}
