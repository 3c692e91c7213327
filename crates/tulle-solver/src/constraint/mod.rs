//! The constraint library.
//!
//! Every constraint is a scalar function C over the predicted positions
//! of a fixed number of particles, with an analytic gradient. Bilateral
//! constraints drive C toward zero; unilateral constraints project only
//! while C < 0.
//!
//! The library is a tagged variant ([`ConstraintKernel`]) of self-contained
//! evaluators, one module per concrete constraint. [`Constraint`] wraps a
//! kernel with the per-instance solver parameters (stiffness for PBD,
//! compliance and the λ accumulator for XPBD).

pub mod bending;
pub mod collision;
pub mod distance;
pub mod fixed;
pub mod isometric;
pub mod strain;

pub use bending::BendingKernel;
pub use collision::CollisionKernel;
pub use distance::DistanceKernel;
pub use fixed::FixedPointKernel;
pub use isometric::IsometricBendingKernel;
pub use strain::TriangleStrainKernel;

use tulle_math::DVec3;
use tulle_types::{Scalar, TulleError, TulleResult};

use crate::particle::ParticleSet;

/// Maximum constraint arity; gradient scratch buffers are sized by this.
pub const MAX_ARITY: usize = 4;

/// Equality vs inequality constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// C(p) = 0.
    Bilateral,
    /// C(p) ≥ 0; projected only while C < 0.
    Unilateral,
}

/// A concrete constraint evaluator.
#[derive(Debug, Clone)]
pub enum ConstraintKernel {
    Distance(DistanceKernel),
    Bending(BendingKernel),
    IsometricBending(IsometricBendingKernel),
    TriangleStrain(TriangleStrainKernel),
    FixedPoint(FixedPointKernel),
    EnvironmentalCollision(CollisionKernel),
}

impl ConstraintKernel {
    /// Indices of the participating particles, in constraint order.
    pub fn particles(&self) -> &[usize] {
        match self {
            Self::Distance(k) => &k.particles,
            Self::Bending(k) => &k.particles,
            Self::IsometricBending(k) => &k.particles,
            Self::TriangleStrain(k) => &k.particles,
            Self::FixedPoint(k) => &k.particles,
            Self::EnvironmentalCollision(k) => &k.particles,
        }
    }

    /// Number of participating particles.
    #[inline]
    pub fn arity(&self) -> usize {
        self.particles().len()
    }

    /// Bilateral or unilateral.
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Self::EnvironmentalCollision(_) => ConstraintKind::Unilateral,
            _ => ConstraintKind::Bilateral,
        }
    }

    /// Evaluates C at the predicted positions.
    ///
    /// Returns NaN for degenerate configurations (undefined triangle
    /// normals); the projection loop skips those.
    pub fn value(&self, particles: &ParticleSet) -> Scalar {
        match self {
            Self::Distance(k) => k.value(particles),
            Self::Bending(k) => k.value(particles),
            Self::IsometricBending(k) => k.value(particles),
            Self::TriangleStrain(k) => k.value(particles),
            Self::FixedPoint(k) => k.value(particles),
            Self::EnvironmentalCollision(k) => k.value(particles),
        }
    }

    /// Writes the analytic gradient of `value` into `out`, one 3-vector
    /// per participating particle; entries past the arity are untouched.
    ///
    /// Degenerate configurations report a zero gradient, which makes the
    /// projection loop skip the constraint for the iteration.
    pub fn gradient(&self, particles: &ParticleSet, out: &mut [DVec3; MAX_ARITY]) {
        match self {
            Self::Distance(k) => k.gradient(particles, out),
            Self::Bending(k) => k.gradient(particles, out),
            Self::IsometricBending(k) => k.gradient(particles, out),
            Self::TriangleStrain(k) => k.gradient(particles, out),
            Self::FixedPoint(k) => k.gradient(particles, out),
            Self::EnvironmentalCollision(k) => k.gradient(particles, out),
        }
    }
}

/// A constraint instance: an evaluator plus solver parameters.
#[derive(Debug, Clone)]
pub struct Constraint {
    /// The concrete evaluator.
    pub kernel: ConstraintKernel,
    /// PBD stiffness `k` ∈ (0, 1].
    pub stiffness: Scalar,
    /// XPBD compliance `α` ≥ 0.
    pub compliance: Scalar,
    /// XPBD Lagrange accumulator; reset to zero at the start of every
    /// substep and never shared between constraints.
    pub lambda: Scalar,
}

impl Constraint {
    /// Creates a constraint, validating the solver parameters.
    pub fn new(kernel: ConstraintKernel, stiffness: Scalar, compliance: Scalar) -> TulleResult<Self> {
        if !(stiffness > 0.0 && stiffness <= 1.0) {
            return Err(TulleError::InvalidConstraint(format!(
                "Stiffness must lie in (0, 1], got {stiffness}"
            )));
        }
        if !(compliance >= 0.0) {
            return Err(TulleError::InvalidConstraint(format!(
                "Compliance must be non-negative, got {compliance}"
            )));
        }
        Ok(Self {
            kernel,
            stiffness,
            compliance,
            lambda: 0.0,
        })
    }

    /// Resets the Lagrange accumulator for a new substep.
    #[inline]
    pub fn reset_lambda(&mut self) {
        self.lambda = 0.0;
    }
}
