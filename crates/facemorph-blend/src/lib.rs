//! facemorph blend - Blend-shape morphing and GPU-ready buffers
//!
//! Combines a base mesh with weighted morph targets and expands the result
//! into flat, non-indexed vertex and normal streams.

pub mod blend;
pub mod buffer;
pub mod error;
pub mod vertex;

pub use blend::{blend, BlendShapes};
pub use buffer::{expand, expand_textured, BlendedMesh, TexturedBuffers};
pub use error::BlendError;
pub use vertex::{GpuVertex, TexturedVertex, VertexAttribute};
