use facemorph_core::IndexError;

/// Errors that can occur while blending or expanding meshes.
///
/// Every check runs before any output is produced, so a returned error means
/// no blend was attempted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BlendError {
    #[error("{targets} morph targets but {weights} weights")]
    WeightCountMismatch { targets: usize, weights: usize },

    #[error("morph target {target} has {found} vertices, base mesh has {expected}")]
    TopologyMismatch {
        target: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid base mesh: {0}")]
    InvalidMesh(#[from] IndexError),

    #[error("face {face} has a corner without a normal")]
    MissingNormals { face: usize },

    #[error("face {face} has a corner without texture coordinates")]
    MissingTexcoords { face: usize },
}
