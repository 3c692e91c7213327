//! Physical constants and simulation defaults.

use crate::Scalar;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: Scalar = 9.8;

/// Default physics timestep (seconds). 1/60th of a second.
pub const DEFAULT_DT: Scalar = 1.0 / 60.0;

/// Default number of constraint-projection iterations per substep.
pub const DEFAULT_CONSTRAINT_ITERATIONS: u32 = 10;

/// Default number of velocity-update passes per substep.
pub const DEFAULT_VELOCITY_ITERATIONS: u32 = 5;

/// Air density at sea level (kg/m³), used by the aerodynamic model.
pub const AIR_DENSITY: Scalar = 1.225;

/// Default aerodynamic drag coefficient.
pub const DEFAULT_DRAG_COEFFICIENT: Scalar = 1.0;

/// Default aerodynamic lift coefficient.
pub const DEFAULT_LIFT_COEFFICIENT: Scalar = 0.0;

/// Threshold on the weighted gradient norm sum Σ wᵢ‖∇Cᵢ‖² below which a
/// constraint projection is skipped for the current iteration.
pub const PROJECTION_EPSILON: Scalar = 1.0e-12;

/// Cross products with squared magnitude below this are treated as
/// degenerate: the triangle normal is undefined and the gradient reports
/// zero so the caller skips the constraint.
pub const NORMAL_EPSILON: Scalar = 1.0e-30;

/// Tolerance for the frame-step / physics-step divisibility check.
pub const TIMESTEP_DIVISIBILITY_TOLERANCE: Scalar = 1.0e-9;

/// Default Young's modulus for the membrane strain constraint (Pa).
pub const DEFAULT_YOUNG_MODULUS: Scalar = 1000.0;

/// Default Poisson's ratio for the membrane strain constraint.
pub const DEFAULT_POISSON_RATIO: Scalar = 0.30;
