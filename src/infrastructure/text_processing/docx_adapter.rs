use std::io::{Cursor, Read};

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

const MAIN_PART: &str = "word/document.xml";

/// Raw text of a WordprocessingML (`.docx`) document: one line per paragraph,
/// tabs and manual breaks preserved, formatting dropped.
pub struct DocxAdapter;

impl DocxAdapter {
    fn read_main_part(data: &[u8]) -> Result<String, FileLoaderError> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("not a DOCX container: {e}"))
        })?;
        let mut part = archive.by_name(MAIN_PART).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("missing {MAIN_PART}: {e}"))
        })?;

        let mut xml = String::new();
        part.read_to_string(&mut xml).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read {MAIN_PART}: {e}"))
        })?;
        Ok(xml)
    }

    fn collect_text(xml: &str) -> Result<String, FileLoaderError> {
        let mut reader = Reader::from_str(xml);
        let mut text = String::new();
        let mut in_run_text = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_run_text = true,
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"t" => in_run_text = false,
                    b"p" => text.push('\n'),
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                    b"tab" => text.push('\t'),
                    b"br" | b"cr" | b"p" => text.push('\n'),
                    _ => {}
                },
                Ok(Event::Text(e)) if in_run_text => {
                    let run = e.unescape().map_err(|err| {
                        FileLoaderError::ExtractionFailed(format!("invalid text run: {err}"))
                    })?;
                    text.push_str(&run);
                }
                Ok(Event::CData(e)) if in_run_text => {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(FileLoaderError::ExtractionFailed(format!(
                        "malformed {MAIN_PART} at byte {}: {e}",
                        reader.buffer_position()
                    )));
                }
                Ok(_) => {}
            }
        }

        Ok(text.trim_end().to_string())
    }
}

#[async_trait]
impl FileLoader for DocxAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != Some(ContentType::Docx) {
            return Err(FileLoaderError::UnsupportedFormat(document.format_label()));
        }

        let xml = Self::read_main_part(data)?;
        let text = Self::collect_text(&xml)?;

        if text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        tracing::info!(chars = text.len(), "DOCX text extraction complete");
        Ok(text)
    }
}
