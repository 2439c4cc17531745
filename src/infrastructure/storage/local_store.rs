use std::io;
use std::path::{Path, PathBuf};

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::StoragePath;

/// Staging store backed by a directory on the local filesystem.
pub struct LocalStagingStore {
    root: PathBuf,
}

impl LocalStagingStore {
    pub fn new(root: PathBuf) -> Result<Self, StagingStoreError> {
        std::fs::create_dir_all(&root).map_err(StagingStoreError::Io)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &StoragePath) -> PathBuf {
        self.root.join(path.as_str())
    }
}

#[async_trait::async_trait]
impl StagingStore for LocalStagingStore {
    async fn store(&self, path: &StoragePath, data: &[u8]) -> Result<u64, StagingStoreError> {
        let target = self.resolve(path);

        if let Err(e) = tokio::fs::write(&target, data).await {
            // A partial write must not outlive the failed request.
            let _ = tokio::fs::remove_file(&target).await;
            tracing::warn!(file = %target.display(), error = %e, "Failed to write staged upload");
            return Err(StagingStoreError::UploadFailed(format!("{path}: {e}")));
        }

        Ok(data.len() as u64)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, StagingStoreError> {
        tokio::fs::read(self.resolve(path)).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StagingStoreError::NotFound(path.to_string()),
            _ => StagingStoreError::Io(e),
        })
    }

    fn delete(&self, path: &StoragePath) -> Result<(), StagingStoreError> {
        match std::fs::remove_file(self.resolve(path)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StagingStoreError::DeleteFailed(format!("{path}: {e}"))),
        }
    }
}
