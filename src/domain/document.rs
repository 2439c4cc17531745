use std::path::Path;

use super::{DocumentId, DocumentOrigin};

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub origin: DocumentOrigin,
    pub filename: String,
    /// `None` when neither the declared MIME type nor the extension is registered.
    pub content_type: Option<ContentType>,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Text,
    Pdf,
    Docx,
}

impl ContentType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/pdf" => Some(Self::Pdf),
            DOCX_MIME => Some(Self::Docx),
            "text/plain" | "text/markdown" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" | "text" | "md" => Some(Self::Text),
            _ => None,
        }
    }

    /// Declared MIME type wins; the filename extension is the fallback.
    pub fn detect(filename: &str, mime: Option<&str>) -> Option<Self> {
        mime.and_then(Self::from_mime)
            .or_else(|| extension_of(filename).and_then(Self::from_extension))
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Pdf => "application/pdf",
            Self::Docx => DOCX_MIME,
        }
    }
}

impl Document {
    pub fn new(
        origin: DocumentOrigin,
        filename: String,
        content_type: Option<ContentType>,
        size_bytes: u64,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            origin,
            filename,
            content_type,
            size_bytes,
        }
    }

    pub fn extension(&self) -> Option<&str> {
        extension_of(&self.filename)
    }

    /// Label used in unsupported-format errors.
    pub fn format_label(&self) -> String {
        match (self.content_type, self.extension()) {
            (Some(ct), _) => ct.as_mime().to_string(),
            (None, Some(ext)) => format!(".{}", ext.to_ascii_lowercase()),
            (None, None) => "unknown".to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size_bytes == 0
    }
}

fn extension_of(filename: &str) -> Option<&str> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
}
