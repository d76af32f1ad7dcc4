//! Filesystem-backed file store

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::application::ports::{FileStore, FileStoreError};

/// Subdirectory of the media root holding certification documents
pub const CERTIFICATIONS_DIR: &str = "certifications";

/// Writes uploads under `<root>/certifications/`. References are paths
/// relative to `root`, e.g. `certifications/1b0c…_licence.pdf`.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, reference: &str) -> Result<PathBuf, FileStoreError> {
        let rel = Path::new(reference);
        if rel.is_absolute() || rel.components().any(|c| c.as_os_str() == "..") {
            return Err(FileStoreError::InvalidName(reference.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

/// Strip any directory part a client may have sent
fn base_name(file_name: &str) -> Result<&str, FileStoreError> {
    Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| FileStoreError::InvalidName(file_name.to_string()))
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn put(&self, file_name: &str, bytes: &[u8]) -> Result<String, FileStoreError> {
        let name = base_name(file_name)?;
        let reference = format!("{}/{}_{}", CERTIFICATIONS_DIR, uuid::Uuid::new_v4(), name);
        let path = self.resolve(&reference)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        info!(reference = %reference, size = bytes.len(), "Stored upload");
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> Result<(), FileStoreError> {
        let path = self.resolve(reference)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(reference, "Upload already gone");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
