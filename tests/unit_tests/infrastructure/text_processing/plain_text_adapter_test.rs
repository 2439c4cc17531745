use rfq_compliance::application::ports::{FileLoader, FileLoaderError};
use rfq_compliance::domain::{ContentType, Document, DocumentOrigin};
use rfq_compliance::infrastructure::text_processing::PlainTextAdapter;

fn text_document(filename: &str, size: usize) -> Document {
    Document::new(
        DocumentOrigin::Rfq,
        filename.to_string(),
        Some(ContentType::Text),
        size as u64,
    )
}

#[tokio::test]
async fn given_utf8_bytes_when_extracting_then_returns_text_verbatim() {
    let data = "Lieferzeit: 30 Tage\n  • TLS 1.2".as_bytes();

    let text = PlainTextAdapter
        .extract_text(data, &text_document("rfq.txt", data.len()))
        .await
        .unwrap();

    assert_eq!(text, "Lieferzeit: 30 Tage\n  • TLS 1.2");
}

#[tokio::test]
async fn given_invalid_utf8_when_extracting_then_extraction_failed() {
    let data = [0xff, 0xfe, 0x00, 0x41];

    let result = PlainTextAdapter
        .extract_text(&data, &text_document("rfq.txt", data.len()))
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_pdf_document_when_extracting_as_text_then_unsupported() {
    let document = Document::new(
        DocumentOrigin::Rfq,
        "rfq.pdf".to_string(),
        Some(ContentType::Pdf),
        4,
    );

    let result = PlainTextAdapter.extract_text(b"%PDF", &document).await;

    assert!(matches!(result, Err(FileLoaderError::UnsupportedFormat(_))));
}
