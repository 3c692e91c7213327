//! Scalar type alias for the simulation.
//!
//! The core is CPU-only and validated against tolerances in the
//! 1e-10 .. 1e-12 range (rest-configuration residuals, gradient checks),
//! which rules out single precision.

/// The floating-point type used throughout the simulation.
///
/// Set to `f64`. All math types are the glam `D*` (double) variants.
pub type Scalar = f64;
