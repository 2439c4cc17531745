use std::sync::Arc;

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::{Document, StoragePath};

/// An uploaded document spooled to the staging store. The staged copy is
/// deleted when the guard is dropped, whichever way the request ends.
pub struct StagedUpload {
    document: Document,
    path: StoragePath,
    store: Arc<dyn StagingStore>,
}

impl StagedUpload {
    pub async fn stage(
        store: Arc<dyn StagingStore>,
        document: Document,
        data: &[u8],
    ) -> Result<Self, StagingStoreError> {
        let path = StoragePath::new(&document.id, &document.filename);
        let written = store.store(&path, data).await?;

        tracing::debug!(
            document_id = %document.id.as_uuid(),
            origin = %document.origin,
            path = %path,
            bytes = written,
            "Upload staged"
        );

        Ok(Self {
            document,
            path,
            store,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub async fn read(&self) -> Result<Vec<u8>, StagingStoreError> {
        self.store.fetch(&self.path).await
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        match self.store.delete(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path, "Staged upload removed"),
            Err(e) => tracing::warn!(path = %self.path, error = %e, "Failed to remove staged upload"),
        }
    }
}

impl std::fmt::Debug for StagedUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedUpload")
            .field("document", &self.document)
            .field("path", &self.path)
            .finish()
    }
}
