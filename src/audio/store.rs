use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to prepare recordings directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Allocates output locations for new capture sessions.
pub trait ArtifactStore: Send + Sync {
    /// Reserve a fresh, uniquely-named location with the given extension
    /// (including the leading dot). Locations are never reused.
    fn allocate(&self, extension: &str) -> Result<PathBuf, StoreError>;
}

/// Allocates UUID-named files under a recordings directory.
pub struct TempArtifactStore {
    dir: PathBuf,
}

impl TempArtifactStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Store rooted in the OS temp directory, matching the original plugin's
    /// cache-dir allocation.
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir().join("mic-session"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactStore for TempArtifactStore {
    fn allocate(&self, extension: &str) -> Result<PathBuf, StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let location = self
            .dir
            .join(format!("{}{}", uuid::Uuid::new_v4(), extension));
        debug!("allocated artifact location {}", location.display());
        Ok(location)
    }
}
