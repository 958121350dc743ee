//! Session settings
//!
//! Looked up in order: the path given on the command line, `facemorph.toml`
//! in the working directory, then `~/.config/facemorph/settings.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// File name searched for in the working directory
const LOCAL_SETTINGS: &str = "facemorph.toml";

/// All session settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scene: SceneSettings,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<PropSettings>,
    pub output: OutputSettings,
}

impl Settings {
    /// Get the per-user settings file path
    fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("facemorph").join("settings.toml"))
    }

    /// Read and parse a settings file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings {:?}", path))?;
        let settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings {:?}", path))?;
        info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Load settings from the working directory or the config directory, or
    /// return defaults if neither has a usable file
    pub fn load() -> Self {
        let local = PathBuf::from(LOCAL_SETTINGS);
        let path = if local.exists() {
            local
        } else {
            let Some(path) = Self::settings_path() else {
                warn!("Could not determine config directory");
                return Self::default();
            };
            path
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }
}

/// The morphing face: a base mesh, its numbered targets and their weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Directory every other asset path is relative to
    pub asset_dir: PathBuf,
    /// Neutral mesh the targets deform
    pub base_mesh: PathBuf,
    /// Directory holding `0.<ext>`, `1.<ext>`, ...
    pub targets_dir: PathBuf,
    pub target_extension: String,
    /// Number of targets; defaults to the number of weights
    pub target_count: Option<usize>,
    /// Plain-text weights, one per target
    pub weights: PathBuf,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("asset"),
            base_mesh: PathBuf::from("neutral.obj"),
            targets_dir: PathBuf::from("blendshapes"),
            target_extension: "obj".to_string(),
            target_count: None,
            weights: PathBuf::from("weights.txt"),
        }
    }
}

/// A static textured mesh drawn next to the face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropSettings {
    pub mesh: PathBuf,
    pub texture: PathBuf,
}

/// Where prepared buffers are written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Packed f32 position/normal vertices of the blended face
    pub vertex_dump: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene() {
        let settings = Settings::default();
        assert_eq!(settings.scene.asset_dir, PathBuf::from("asset"));
        assert_eq!(settings.scene.target_extension, "obj");
        assert_eq!(settings.scene.target_count, None);
        assert!(settings.props.is_empty());
        assert!(settings.output.vertex_dump.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [scene]
            base_mesh = "face.obj"
            target_count = 4

            [[props]]
            mesh = "bucket.obj"
            texture = "bucket.jpg"
            "#,
        )
        .unwrap();

        assert_eq!(settings.scene.base_mesh, PathBuf::from("face.obj"));
        assert_eq!(settings.scene.target_count, Some(4));
        assert_eq!(settings.scene.weights, PathBuf::from("weights.txt"));
        assert_eq!(settings.props.len(), 1);
        assert_eq!(settings.props[0].texture, PathBuf::from("bucket.jpg"));
    }

    #[test]
    fn test_round_trip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facemorph.toml");
        let mut settings = Settings::default();
        settings.output.vertex_dump = Some(PathBuf::from("face.bin"));

        fs::write(&path, toml::to_string_pretty(&settings).unwrap()).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        assert!(Settings::load_from(Path::new("/nonexistent/facemorph.toml")).is_err());
    }
}
