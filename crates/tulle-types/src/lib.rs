//! # tulle-types
//!
//! Shared types, error types, and physical constants for the Tulle
//! cloth simulation engine.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Tulle crates share.

pub mod constants;
pub mod error;
pub mod scalar;

pub use error::{TulleError, TulleResult};
pub use scalar::Scalar;
