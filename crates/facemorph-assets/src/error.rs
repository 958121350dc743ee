use std::path::PathBuf;

use facemorph_core::{IndexError, ParseWeightsError};

/// Errors that can occur while loading meshes, weights or textures.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to load OBJ file '{0}': {1}")]
    Obj(PathBuf, String),

    #[error("malformed mesh '{0}': {1}")]
    Malformed(PathBuf, #[source] IndexError),

    #[error("failed to parse weights '{0}': {1}")]
    Weights(PathBuf, #[source] ParseWeightsError),

    #[error("failed to load image '{0}': {1}")]
    ImageLoadFailed(PathBuf, String),

    #[error("I/O error loading '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),
}
