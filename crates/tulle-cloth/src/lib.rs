//! # tulle-cloth
//!
//! Cloth construction on top of the solver core: instantiates particles
//! and a deduplicated constraint set from a triangle mesh, with pluggable
//! in-plane and out-of-plane strategies, and applies aerodynamic
//! drag/lift forces over triangle elements.

pub mod aero;
pub mod builder;

pub use aero::{apply_aerodynamic_forces, AeroParams};
pub use builder::{ClothOptions, ClothPatch, InPlaneStrategy, OutOfPlaneStrategy};
