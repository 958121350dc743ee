//! Scene preparation: everything that runs once before the first frame
//!
//! Loads the face and its morph targets, blends them with the configured
//! weights, and expands textured props into upload-ready buffers.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use tracing::info;

use facemorph_assets::{AssetHandle, MeshSetPattern, MeshStore, TextureAsset};
use facemorph_blend::{BlendShapes, BlendedMesh, TexturedBuffers};

use crate::settings::{PropSettings, SceneSettings, Settings};

/// A textured mesh ready for upload
pub struct PreparedProp {
    pub name: String,
    pub buffers: TexturedBuffers,
    pub texture: AssetHandle<TextureAsset>,
}

/// Buffers for one session
pub struct PreparedScene {
    pub face: BlendedMesh,
    pub props: Vec<PreparedProp>,
}

impl PreparedScene {
    /// Total vertices across the face and all props
    pub fn vertex_count(&self) -> usize {
        self.face.vertex_count()
            + self
                .props
                .iter()
                .map(|p| p.buffers.vertex_count())
                .sum::<usize>()
    }
}

/// Load, blend and expand everything the settings describe.
pub fn prepare(settings: &Settings, store: &mut MeshStore) -> Result<PreparedScene> {
    let face = prepare_face(&settings.scene, store)?;

    let props = settings
        .props
        .iter()
        .map(|prop| prepare_prop(prop, store))
        .collect::<Result<Vec<_>>>()?;

    Ok(PreparedScene { face, props })
}

fn prepare_face(scene: &SceneSettings, store: &mut MeshStore) -> Result<BlendedMesh> {
    let weights = store
        .load_weights(&scene.weights)
        .context("Failed to load blend weights")?;
    let count = scene.target_count.unwrap_or(weights.len());

    let base = store
        .load_mesh(&scene.base_mesh)
        .context("Failed to load base mesh")?;
    let pattern = MeshSetPattern::new(&scene.targets_dir, scene.target_extension.clone());
    let handles = store
        .load_mesh_set(&pattern, count)
        .context("Failed to load morph targets")?;

    let base = store
        .mesh_arc(base)
        .context("Base mesh missing from store")?;
    let targets = handles
        .iter()
        .map(|&h| store.mesh_arc(h).context("Morph target missing from store"))
        .collect::<Result<Vec<_>>>()?;

    let shapes = BlendShapes::new(&base, &targets)
        .context("Morph targets do not match base mesh")?;
    let face = shapes
        .blend(weights.as_slice())
        .context("Failed to blend morph targets")?;

    info!(
        "Blended {} targets onto {} ({} triangles)",
        shapes.target_count(),
        scene.base_mesh.display(),
        base.face_count()
    );
    Ok(face)
}

fn prepare_prop(prop: &PropSettings, store: &mut MeshStore) -> Result<PreparedProp> {
    let name = prop_name(&prop.mesh);

    let mesh = store
        .load_mesh(&prop.mesh)
        .with_context(|| format!("Failed to load prop '{}'", name))?;
    let texture = store
        .load_texture(&prop.texture)
        .with_context(|| format!("Failed to load texture for prop '{}'", name))?;

    let mesh = store.get_mesh(mesh).context("Prop mesh missing from store")?;
    ensure!(
        mesh.has_texcoords(),
        "Prop '{}' has no texture coordinates",
        name
    );
    let buffers = facemorph_blend::expand_textured(mesh)
        .with_context(|| format!("Failed to expand prop '{}'", name))?;

    info!("Prepared prop '{}' ({} vertices)", name, buffers.vertex_count());
    Ok(PreparedProp {
        name,
        buffers,
        texture,
    })
}

fn prop_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
