//! Weighted Gauss–Seidel projection of a single constraint.
//!
//! Both algorithms share the same structure: evaluate C and ∇C at the
//! predicted positions, form the weighted denominator s = Σᵢ wᵢ‖∇Cᵢ‖²,
//! and displace each particle by wᵢ·Δλ·∇Cᵢ. They differ only in Δλ:
//!
//! - PBD:  Δλ = −k·C / s
//! - XPBD: Δλ = (−C − α̃·λ) / (s + α̃)  with α̃ = α/Δt², then λ += Δλ
//!
//! Numerical degeneracy (s below threshold, NaN value or gradient) skips
//! the constraint for the current iteration; the step is then slightly
//! under-converged, which is acceptable and never propagates outward.

use std::sync::Once;

use tulle_types::constants::PROJECTION_EPSILON;
use tulle_types::Scalar;

use crate::config::Algorithm;
use crate::constraint::{Constraint, ConstraintKind, MAX_ARITY};
use crate::particle::ParticleSet;
use tulle_math::DVec3;

static DEGENERACY_WARNING: Once = Once::new();

/// Projects one constraint onto the particle set's predicted positions.
pub fn project_constraint(
    constraint: &mut Constraint,
    particles: &mut ParticleSet,
    algorithm: Algorithm,
    dt: Scalar,
) {
    let value = constraint.kernel.value(particles);
    if value.is_nan() {
        warn_degenerate();
        return;
    }

    // Unilateral constraints only push, never pull
    if constraint.kernel.kind() == ConstraintKind::Unilateral && value >= 0.0 {
        return;
    }

    let mut grad = [DVec3::ZERO; MAX_ARITY];
    constraint.kernel.gradient(particles, &mut grad);

    let mut weighted_sum = 0.0;
    for (slot, &i) in constraint.kernel.particles().iter().enumerate() {
        let g = grad[slot];
        if !g.is_finite() {
            warn_degenerate();
            return;
        }
        weighted_sum += particles.inv_mass(i) * g.length_squared();
    }

    if weighted_sum < PROJECTION_EPSILON {
        return;
    }

    let delta_lambda = match algorithm {
        Algorithm::Pbd => -constraint.stiffness * value / weighted_sum,
        Algorithm::Xpbd => {
            let alpha_tilde = constraint.compliance / (dt * dt);
            let delta = (-value - alpha_tilde * constraint.lambda) / (weighted_sum + alpha_tilde);
            constraint.lambda += delta;
            delta
        }
    };

    for (slot, &i) in constraint.kernel.particles().iter().enumerate() {
        let correction = particles.inv_mass(i) * delta_lambda * grad[slot];
        particles.displace_predicted(i, correction);
    }
}

fn warn_degenerate() {
    DEGENERACY_WARNING.call_once(|| {
        tracing::warn!(
            "degenerate constraint configuration encountered; \
             skipping projection for affected iterations"
        );
    });
}
