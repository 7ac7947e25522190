use crate::graph::GraphSnapshot;
use crate::GraphError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// JSON file holding the latest completed build
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns whether a snapshot has been written
    pub async fn exists(&self) -> bool {
        tokio::fs::metadata(&self.path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    /// Overwrites the snapshot
    ///
    /// The document is written to a sibling temporary file and renamed into
    /// place, so readers see either the old or the new snapshot in full.
    pub async fn save(&self, snapshot: &GraphSnapshot) -> Result<(), GraphError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = snapshot.to_pretty_json()?;
        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!("Wrote snapshot to {}", self.path.display());
        Ok(())
    }

    /// Reads the snapshot bytes exactly as stored
    pub async fn load_raw(&self) -> Result<Vec<u8>, GraphError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| self.map_read_error(e))
    }

    /// Reads and decodes the snapshot
    pub async fn load(&self) -> Result<GraphSnapshot, GraphError> {
        let bytes = self.load_raw().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn map_read_error(&self, error: std::io::Error) -> GraphError {
        if error.kind() == ErrorKind::NotFound {
            GraphError::SnapshotMissing {
                path: self.path.clone(),
            }
        } else {
            GraphError::Io(error)
        }
    }
}
