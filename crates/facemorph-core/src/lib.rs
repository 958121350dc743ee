//! facemorph core - Shared types for mesh loading and blend-shape morphing
//!
//! This crate provides the data model used throughout the workspace:
//! - Indexed triangle meshes with per-corner attribute indices
//! - Blend weight vectors and their plain-text format
//! - Vector types (re-exported from glam)

pub mod types;
pub mod weights;

pub use glam::{DVec2, DVec3};
pub use types::{Attribute, Corner, IndexError, Mesh, Triangle};
pub use weights::{ParseWeightsError, WeightVector};
