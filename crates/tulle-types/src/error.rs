//! Error types for the Tulle engine.
//!
//! All crates return `TulleResult<T>` from fallible operations.
//! Configuration and topology problems are fatal at setup time;
//! per-iteration numerical degeneracy is recovered silently inside the
//! solver and never surfaces here.

use thiserror::Error;

/// Unified error type for the Tulle engine.
#[derive(Debug, Error)]
pub enum TulleError {
    /// Mesh data is malformed or topologically unusable
    /// (non-manifold edge, degenerate triangle, index out of range).
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Engine or cloth configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Constraint parameter is out of range
    /// (stiffness outside (0,1], negative compliance, non-positive mass).
    #[error("Invalid constraint: {0}")]
    InvalidConstraint(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, TulleError>`.
pub type TulleResult<T> = Result<T, TulleError>;
