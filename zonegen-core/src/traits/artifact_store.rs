//! Artifact store abstract Trait

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};

/// Artifact Store Trait
///
/// Every file the generator reads or writes goes through this trait.
/// Writes replace the whole file.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Read a file, `None` when it does not exist
    async fn read(&self, path: &Path) -> CoreResult<Option<String>>;

    /// Whether a file exists
    async fn exists(&self, path: &Path) -> CoreResult<bool>;

    /// Write a file, creating missing parent directories
    async fn write(&self, path: &Path, content: &str) -> CoreResult<()>;
}

/// Filesystem-backed store.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsArtifactStore;

impl FsArtifactStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn storage_error(action: &str, path: &Path, e: &std::io::Error) -> CoreError {
    CoreError::StorageError(format!("Failed to {action} {}: {e}", path.display()))
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn read(&self, path: &Path) -> CoreResult<Option<String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error("read", path, &e)),
        }
    }

    async fn exists(&self, path: &Path) -> CoreResult<bool> {
        tokio::fs::try_exists(path)
            .await
            .map_err(|e| storage_error("check", path, &e))
    }

    async fn write(&self, path: &Path, content: &str) -> CoreResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error("create directory", parent, &e))?;
        }
        tokio::fs::write(path, content)
            .await
            .map_err(|e| storage_error("write", path, &e))?;
        log::debug!("Wrote {} ({} bytes)", path.display(), content.len());
        Ok(())
    }
}

/// In-memory store
///
/// Keeps files in a map; every write is also recorded in order.
#[derive(Clone, Default)]
pub struct InMemoryArtifactStore {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
    writes: Arc<RwLock<Vec<PathBuf>>>,
}

impl InMemoryArtifactStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file without recording a write
    pub async fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.write().await.insert(path.into(), content.into());
    }

    pub async fn get(&self, path: &Path) -> Option<String> {
        self.files.read().await.get(path).cloned()
    }

    /// Paths written so far, in write order
    pub async fn writes(&self) -> Vec<PathBuf> {
        self.writes.read().await.clone()
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn read(&self, path: &Path) -> CoreResult<Option<String>> {
        Ok(self.files.read().await.get(path).cloned())
    }

    async fn exists(&self, path: &Path) -> CoreResult<bool> {
        Ok(self.files.read().await.contains_key(path))
    }

    async fn write(&self, path: &Path, content: &str) -> CoreResult<()> {
        self.files
            .write()
            .await
            .insert(path.to_path_buf(), content.to_string());
        self.writes.write().await.push(path.to_path_buf());
        Ok(())
    }
}
