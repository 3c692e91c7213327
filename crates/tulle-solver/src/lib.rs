//! # tulle-solver
//!
//! The constraint-projection core: particles, the analytic constraint
//! library, the PBD/XPBD projection kernel, and the time-stepping engine.
//!
//! ## Key Types
//!
//! - [`ParticleSet`] — engine-owned contiguous particle storage
//! - [`Constraint`] / [`constraint::ConstraintKernel`] — the constraint
//!   library (distance, bending, isometric bending, triangle strain,
//!   fixed point, environmental collision)
//! - [`EngineConfig`] — validated time-stepping configuration
//! - [`Engine`] / [`Scene`] — the per-frame substep driver and its hooks
//!
//! ## Substep algorithm
//!
//! ```text
//! set_external_forces → integrate velocities → predict positions →
//! generate_collision_constraints → reset λ →
//! N_c × (project persistent, project transient) →
//! v = (p − x)/Δt, x = p → update_velocities → clear transient
//! ```
//!
//! Projection is serial Gauss–Seidel in registration order; the
//! convergence behavior of XPBD depends on that ordering, so it is part
//! of the observable contract.

pub mod config;
pub mod constraint;
pub mod engine;
pub mod particle;
pub mod projection;
pub mod world;

pub use config::{Algorithm, EngineConfig};
pub use constraint::{Constraint, ConstraintKind};
pub use engine::{Engine, Scene};
pub use particle::{Particle, ParticleSet};
pub use world::World;
