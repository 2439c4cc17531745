use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

/// Decodes the upload as UTF-8, verbatim.
pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != Some(ContentType::Text) {
            return Err(FileLoaderError::UnsupportedFormat(document.format_label()));
        }

        String::from_utf8(data.to_vec()).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("{} is not valid UTF-8: {e}", document.filename))
        })
    }
}
