//! # tulle-math
//!
//! Linear algebra primitives for the Tulle simulation engine.
//!
//! Provides:
//! - Re-exports of `glam` double-precision types (`DVec3`, `DMat2`, etc.)
//! - 3×2 matrix type for membrane deformation gradients
//! - Safe numeric helpers (`safe_acos`, cotangents) used by constraint
//!   gradients

pub mod mat3x2;
pub mod numeric;

pub use mat3x2::Mat3x2;

// Re-export the glam f64 types as the canonical math types for Tulle.
pub use glam::{DAffine3, DMat2, DMat3, DMat4, DQuat, DVec2, DVec3, DVec4};
