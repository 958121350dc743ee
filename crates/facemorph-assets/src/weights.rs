use std::fs;
use std::path::Path;

use facemorph_core::WeightVector;
use tracing::debug;

use crate::error::LoadError;

/// Read a plain-text weights file: float tokens separated by whitespace or
/// newlines, one per target mesh, in target order.
pub fn load_weights(path: &Path) -> Result<WeightVector, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    let weights: WeightVector = text
        .parse()
        .map_err(|e| LoadError::Weights(path.to_path_buf(), e))?;

    debug!("Loaded {} weights from '{}'", weights.len(), path.display());
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj_loader::tests::write;

    #[test]
    fn test_loads_weights_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "weights.txt", "0.1\n0.2 0.3\n0\n");

        let weights = load_weights(&path).unwrap();
        assert_eq!(weights.as_slice(), &[0.1, 0.2, 0.3, 0.0]);
    }

    #[test]
    fn test_rejects_non_numeric_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "weights.txt", "0.1\nsmile\n");

        match load_weights(&path).unwrap_err() {
            LoadError::Weights(_, e) => {
                assert_eq!(e.index, 1);
                assert_eq!(e.token, "smile");
            }
            other => panic!("expected Weights error, got: {:?}", other),
        }
    }

    #[test]
    fn test_missing_weights_file() {
        let result = load_weights(Path::new("/nonexistent/weights.txt"));
        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }
}
