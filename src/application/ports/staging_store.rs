use std::io;

use crate::domain::StoragePath;

/// Private on-disk home of uploaded documents for the lifetime of one request.
#[async_trait::async_trait]
pub trait StagingStore: Send + Sync {
    async fn store(&self, path: &StoragePath, data: &[u8]) -> Result<u64, StagingStoreError>;

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, StagingStoreError>;

    /// Synchronous so it can run from `Drop`. Deleting a missing object is not an error.
    fn delete(&self, path: &StoragePath) -> Result<(), StagingStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StagingStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
