use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

use super::{DocxAdapter, PdfAdapter, PlainTextAdapter};

/// Routes each document to the adapter registered for its content type.
pub struct CompositeFileLoader {
    adapters: HashMap<ContentType, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(ContentType, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// Plain text, PDF and DOCX.
    pub fn standard() -> Self {
        Self::new(vec![
            (ContentType::Text, Arc::new(PlainTextAdapter) as Arc<dyn FileLoader>),
            (ContentType::Pdf, Arc::new(PdfAdapter::new()) as Arc<dyn FileLoader>),
            (ContentType::Docx, Arc::new(DocxAdapter) as Arc<dyn FileLoader>),
        ])
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    #[tracing::instrument(
        skip(self, data, document),
        fields(
            document_id = %document.id.as_uuid(),
            origin = %document.origin,
            format = %document.format_label(),
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let adapter = document
            .content_type
            .and_then(|content_type| self.adapters.get(&content_type))
            .ok_or_else(|| FileLoaderError::UnsupportedFormat(document.format_label()))?;

        let text = adapter.extract_text(data, document).await?;
        tracing::debug!(chars = text.len(), "Document text extracted");
        Ok(text)
    }
}
