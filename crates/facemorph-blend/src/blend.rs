//! Linear blend-shape interpolation
//!
//! Each target contributes its weighted delta from the base:
//! `result[v] = base[v] + sum_i(w[i] * (target[i][v] - base[v]))`.
//! Only positions are blended. Normals are always the base mesh's.

use std::borrow::Borrow;

use facemorph_core::{DVec3, Mesh};
use tracing::debug;

use crate::buffer::{self, BlendedMesh};
use crate::error::BlendError;

/// A base mesh and the morph targets that deform it, checked for matching
/// vertex counts once so they can be blended with many weight vectors.
#[derive(Debug)]
pub struct BlendShapes<'a> {
    base: &'a Mesh,
    targets: Vec<&'a Mesh>,
}

impl<'a> BlendShapes<'a> {
    /// Borrow a base and its targets. Fails if the base has out-of-range
    /// indices or any target's vertex count differs from the base.
    pub fn new<M>(base: &'a Mesh, targets: &'a [M]) -> Result<Self, BlendError>
    where
        M: Borrow<Mesh>,
    {
        base.validate()?;

        let expected = base.vertex_count();
        let targets = targets
            .iter()
            .map(<M as Borrow<Mesh>>::borrow)
            .collect::<Vec<&Mesh>>();
        for (target, mesh) in targets.iter().enumerate() {
            if mesh.vertex_count() != expected {
                return Err(BlendError::TopologyMismatch {
                    target,
                    expected,
                    found: mesh.vertex_count(),
                });
            }
        }

        Ok(Self { base, targets })
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Blended positions, one per base vertex, before face expansion.
    pub fn blend_positions(&self, weights: &[f64]) -> Result<Vec<DVec3>, BlendError> {
        if weights.len() != self.targets.len() {
            return Err(BlendError::WeightCountMismatch {
                targets: self.targets.len(),
                weights: weights.len(),
            });
        }

        let mut result = self.base.positions.clone();
        for (mesh, &weight) in self.targets.iter().zip(weights) {
            for ((out, base), target) in result
                .iter_mut()
                .zip(&self.base.positions)
                .zip(&mesh.positions)
            {
                *out += weight * (*target - *base);
            }
        }
        Ok(result)
    }

    /// Blend and expand into non-indexed vertex and normal streams.
    pub fn blend(&self, weights: &[f64]) -> Result<BlendedMesh, BlendError> {
        let positions = self.blend_positions(weights)?;
        let normal_buffer = buffer::expand_normals(self.base)?;
        let vertex_buffer = buffer::expand_positions(self.base, &positions);

        debug!(
            "Blended {} targets over {} vertices into {} corners",
            self.targets.len(),
            positions.len(),
            vertex_buffer.len() / 3
        );

        Ok(BlendedMesh {
            vertex_buffer,
            normal_buffer,
        })
    }
}

/// Blend `targets` onto `base` with one weight per target.
///
/// Inputs are checked before anything is computed; mismatched weight or vertex
/// counts return an error instead of a partial result.
pub fn blend<M>(base: &Mesh, targets: &[M], weights: &[f64]) -> Result<BlendedMesh, BlendError>
where
    M: Borrow<Mesh>,
{
    if targets.len() != weights.len() {
        return Err(BlendError::WeightCountMismatch {
            targets: targets.len(),
            weights: weights.len(),
        });
    }
    BlendShapes::new(base, targets)?.blend(weights)
}
