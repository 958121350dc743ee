//! facemorph - Blend-shape morphing sandbox
//!
//! Loads a neutral face and its expression targets, blends them with the
//! weights file, and prepares the buffers a renderer uploads.

mod scene;
mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use facemorph_assets::MeshStore;
use facemorph_blend::{BlendedMesh, GpuVertex};

use crate::settings::Settings;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set subscriber")?;

    info!("Starting facemorph...");

    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load_from(&path)?,
        None => Settings::load(),
    };

    let mut store = MeshStore::new(&settings.scene.asset_dir);
    let scene = scene::prepare(&settings, &mut store)?;

    info!(
        "Scene ready: {} meshes, {} props, {} vertices",
        store.mesh_count(),
        scene.props.len(),
        scene.vertex_count()
    );

    for prop in &scene.props {
        if let Some(texture) = store.get_texture(prop.texture) {
            info!(
                "Prop '{}': {} vertices, {}x{} {:?} texture",
                prop.name,
                prop.buffers.vertex_count(),
                texture.width,
                texture.height,
                texture.format
            );
        }
    }

    if let Some(path) = &settings.output.vertex_dump {
        write_vertices(path, &scene.face)?;
    }

    Ok(())
}

/// Write the blended face as packed `GpuVertex` bytes.
fn write_vertices(path: &Path, face: &BlendedMesh) -> Result<()> {
    let vertices = face.to_gpu_vertices();
    let bytes: &[u8] = bytemuck::cast_slice(&vertices);
    fs::write(path, bytes).with_context(|| format!("Failed to write {:?}", path))?;

    info!(
        "Wrote {} vertices ({} bytes, stride {}) to {:?}",
        vertices.len(),
        bytes.len(),
        GpuVertex::stride(),
        path
    );
    Ok(())
}
