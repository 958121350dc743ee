//! facemorph assets - Mesh, weights and texture loading
//!
//! Provides OBJ loading (file-ordered, fan-triangulated, via obj-rs),
//! numbered mesh sets for morph targets, plain-text blend weights, texture
//! decoding and a handle-based store that owns everything loaded for a session.

mod error;
mod handle;
mod obj_loader;
mod store;
mod texture;
mod weights;

pub use error::LoadError;
pub use handle::{AssetHandle, AssetId};
pub use obj_loader::{load_mesh, load_mesh_set, MeshSetPattern};
pub use store::MeshStore;
pub use texture::{load_texture, TextureAsset, TextureFormat};
pub use weights::load_weights;
