use crate::core::ArtifactSource;
use crate::utils::error::{PredictError, Result};
use std::path::PathBuf;

/// Artifacts read from the local filesystem, relative to `base_path`.
#[derive(Debug, Clone)]
pub struct LocalArtifacts {
    base_path: PathBuf,
}

impl LocalArtifacts {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl ArtifactSource for LocalArtifacts {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        tokio::fs::read(&full_path)
            .await
            .map_err(|e| PredictError::artifact_missing(full_path.to_string_lossy(), e))
    }

    fn describe(&self, path: &str) -> String {
        self.base_path.join(path).to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_relative_to_base_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("model.json"), b"{}").unwrap();

        let source = LocalArtifacts::new(dir.path());
        assert_eq!(source.read_file("model.json").await.unwrap(), b"{}");
    }

    #[tokio::test]
    async fn test_missing_file_is_artifact_missing() {
        let dir = TempDir::new().unwrap();
        let source = LocalArtifacts::new(dir.path());

        let err = source.read_file("model_dt.json").await.unwrap_err();
        match err {
            PredictError::ArtifactMissing { path, .. } => assert!(path.ends_with("model_dt.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
