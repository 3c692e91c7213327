//! # tulle-mesh
//!
//! Triangle mesh storage and topology queries for the Tulle cloth engine.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`] — SoA vertex/index buffers
//! - [`topology::Topology`] — edge and adjacency queries for constraint
//!   generation
//! - [`generators::quad_grid`] — procedural cloth patch generator

pub mod generators;
pub mod mesh;
pub mod topology;

pub use mesh::TriangleMesh;
pub use topology::{InteriorEdge, Topology};
