//! Engine configuration.
//!
//! Parameters that control the time-stepping loop: step sizes, iteration
//! counts, and the projection algorithm. Configuration is validated once
//! at engine construction and immutable afterwards.

use serde::{Deserialize, Serialize};
use tulle_types::constants::{
    DEFAULT_CONSTRAINT_ITERATIONS, DEFAULT_DT, DEFAULT_VELOCITY_ITERATIONS,
    TIMESTEP_DIVISIBILITY_TOLERANCE,
};
use tulle_types::{Scalar, TulleError, TulleResult};

/// Constraint projection algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// Position-Based Dynamics: projection scaled by stiffness `k`.
    Pbd,
    /// Extended PBD: per-constraint compliance and accumulated Lagrange
    /// multipliers, making stiffness timestep-independent.
    Xpbd,
}

/// Configuration for the simulation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Physics timestep (seconds).
    pub dt_physics: Scalar,

    /// Frame duration (seconds). Must be an integer multiple of
    /// `dt_physics` within 1e-9.
    pub dt_frame: Scalar,

    /// Constraint-projection iterations per substep (≥ 1).
    pub constraint_iterations: u32,

    /// Velocity-update passes per substep. Reserved for a future
    /// iterative velocity solve (friction, restitution); the current
    /// velocity pass is damping only and the engine invokes
    /// [`Scene::update_velocities`](crate::Scene::update_velocities)
    /// exactly once per substep regardless of this value.
    pub velocity_iterations: u32,

    /// Projection algorithm.
    pub algorithm: Algorithm,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dt_physics: DEFAULT_DT,
            dt_frame: DEFAULT_DT,
            constraint_iterations: DEFAULT_CONSTRAINT_ITERATIONS,
            velocity_iterations: DEFAULT_VELOCITY_ITERATIONS,
            algorithm: Algorithm::Xpbd,
        }
    }
}

impl EngineConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> TulleResult<()> {
        if !(self.dt_physics > 0.0) {
            return Err(TulleError::InvalidConfig(format!(
                "Physics timestep must be positive, got {}",
                self.dt_physics
            )));
        }
        if !(self.dt_frame > 0.0) {
            return Err(TulleError::InvalidConfig(format!(
                "Frame duration must be positive, got {}",
                self.dt_frame
            )));
        }

        let ratio = self.dt_frame / self.dt_physics;
        let remainder = (self.dt_frame - ratio.round() * self.dt_physics).abs();
        if ratio.round() < 1.0 || remainder > TIMESTEP_DIVISIBILITY_TOLERANCE {
            return Err(TulleError::InvalidConfig(format!(
                "Frame duration ({}) is not an integer multiple of the physics timestep ({})",
                self.dt_frame, self.dt_physics
            )));
        }

        if self.constraint_iterations < 1 {
            return Err(TulleError::InvalidConfig(
                "Constraint iteration count must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Number of physics substeps per frame: `⌈Δt_frame/Δt_phys⌉`.
    ///
    /// Only meaningful after [`validate`](Self::validate) succeeds.
    pub fn substeps_per_frame(&self) -> u32 {
        (self.dt_frame / self.dt_physics).round() as u32
    }
}
