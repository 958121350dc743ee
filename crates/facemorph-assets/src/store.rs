use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use facemorph_core::{Mesh, WeightVector};
use tracing::info;

use crate::error::LoadError;
use crate::handle::{AssetHandle, AssetId, IdAllocator};
use crate::obj_loader::{self, MeshSetPattern};
use crate::texture::{self, TextureAsset};
use crate::weights;

/// Owns every mesh and texture loaded for a session and hands out handles.
///
/// Meshes are stored behind `Arc` so consumers can share them read-only
/// without copying attribute arrays.
pub struct MeshStore {
    base_path: PathBuf,
    ids: IdAllocator,
    meshes: HashMap<AssetId, Arc<Mesh>>,
    textures: HashMap<AssetId, TextureAsset>,
    path_to_mesh: HashMap<PathBuf, AssetHandle<Mesh>>,
    path_to_texture: HashMap<PathBuf, AssetHandle<TextureAsset>>,
}

impl MeshStore {
    /// Create a new MeshStore rooted at the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        info!("MeshStore created with base path: {}", base_path.display());
        Self {
            base_path,
            ids: IdAllocator::new(),
            meshes: HashMap::new(),
            textures: HashMap::new(),
            path_to_mesh: HashMap::new(),
            path_to_texture: HashMap::new(),
        }
    }

    /// Resolve a relative asset path against the base path.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    fn insert_mesh(&mut self, path: PathBuf, mesh: Mesh) -> AssetHandle<Mesh> {
        if let Some(&handle) = self.path_to_mesh.get(&path) {
            return handle;
        }
        let handle = self.ids.next();
        self.meshes.insert(handle.id(), Arc::new(mesh));
        self.path_to_mesh.insert(path, handle);
        handle
    }

    /// Load an OBJ file. Subsequent loads of the same path return the cached
    /// handle.
    pub fn load_mesh(&mut self, path: &Path) -> Result<AssetHandle<Mesh>, LoadError> {
        let full_path = self.resolve(path);

        if let Some(&handle) = self.path_to_mesh.get(&full_path) {
            return Ok(handle);
        }

        let mesh = obj_loader::load_mesh(&full_path)?;
        Ok(self.insert_mesh(full_path, mesh))
    }

    /// Load meshes `0..count` of a numbered set.
    ///
    /// Nothing is registered unless every mesh in the set loads.
    pub fn load_mesh_set(
        &mut self,
        pattern: &MeshSetPattern,
        count: usize,
    ) -> Result<Vec<AssetHandle<Mesh>>, LoadError> {
        let pattern = MeshSetPattern::new(self.resolve(&pattern.dir), pattern.extension.clone());
        let meshes = obj_loader::load_mesh_set(&pattern, count)?;

        let handles = meshes
            .into_iter()
            .enumerate()
            .map(|(i, mesh)| self.insert_mesh(pattern.path(i), mesh))
            .collect::<Vec<_>>();

        info!(
            "Loaded mesh set '{}' ({} meshes)",
            pattern.dir.display(),
            handles.len()
        );
        Ok(handles)
    }

    /// Read a weights file relative to the base path. Weights are not cached.
    pub fn load_weights(&self, path: &Path) -> Result<WeightVector, LoadError> {
        weights::load_weights(&self.resolve(path))
    }

    /// Load an image file (PNG, JPEG, etc.) as a texture.
    /// Subsequent loads of the same path return the cached handle.
    pub fn load_texture(
        &mut self,
        path: &Path,
    ) -> Result<AssetHandle<TextureAsset>, LoadError> {
        let full_path = self.resolve(path);

        if let Some(&handle) = self.path_to_texture.get(&full_path) {
            return Ok(handle);
        }

        if !full_path.exists() {
            return Err(LoadError::NotFound(full_path));
        }

        let tex = texture::load_texture(&full_path)?;
        let handle = self.ids.next();
        self.textures.insert(handle.id(), tex);
        self.path_to_texture.insert(full_path, handle);

        Ok(handle)
    }

    /// Get a reference to a loaded mesh by its handle.
    pub fn get_mesh(&self, handle: AssetHandle<Mesh>) -> Option<&Mesh> {
        self.meshes.get(&handle.id()).map(Arc::as_ref)
    }

    /// Get a shared pointer to a loaded mesh, for consumers that outlive a
    /// borrow of the store.
    pub fn mesh_arc(&self, handle: AssetHandle<Mesh>) -> Option<Arc<Mesh>> {
        self.meshes.get(&handle.id()).cloned()
    }

    /// Get a reference to a loaded texture by its handle.
    pub fn get_texture(&self, handle: AssetHandle<TextureAsset>) -> Option<&TextureAsset> {
        self.textures.get(&handle.id())
    }

    /// Check if a mesh handle refers to a loaded asset.
    pub fn is_mesh_loaded(&self, handle: AssetHandle<Mesh>) -> bool {
        self.meshes.contains_key(&handle.id())
    }

    /// Number of distinct meshes held by the store.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}
