use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use rfq_compliance::application::ports::{
    FileLoader, FileLoaderError, LlmClient, LlmClientError, StagingStore,
};
use rfq_compliance::application::services::{
    ComparisonRequest, ComplianceError, ComplianceService, DocumentPayload, StagedUpload,
};
use rfq_compliance::domain::{
    AnalysisMode, CompliancePrompt, ComplianceResult, ContentType, Document, DocumentOrigin,
};
use rfq_compliance::infrastructure::storage::LocalStagingStore;
use rfq_compliance::infrastructure::text_processing::CompositeFileLoader;

struct MockLlmClient {
    reply: Value,
    delay: Option<Duration>,
    calls: AtomicUsize,
    staged_files_at_call: Mutex<Option<usize>>,
    staging_dir: Option<std::path::PathBuf>,
}

impl MockLlmClient {
    fn replying(text: &str) -> Self {
        Self {
            reply: json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }),
            delay: None,
            calls: AtomicUsize::new(0),
            staged_files_at_call: Mutex::new(None),
            staging_dir: None,
        }
    }

    fn watching(mut self, staging_dir: &Path) -> Self {
        self.staging_dir = Some(staging_dir.to_path_buf());
        self
    }

    fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate_content(&self, _prompt: &CompliancePrompt) -> Result<Value, LlmClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(dir) = &self.staging_dir {
            *self.staged_files_at_call.lock().unwrap() = Some(count_files(dir));
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.reply.clone())
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

fn service(llm_client: Arc<MockLlmClient>) -> ComplianceService {
    let file_loader: Arc<dyn FileLoader> = Arc::new(CompositeFileLoader::standard());
    ComplianceService::new(file_loader, llm_client, Duration::from_secs(5))
}

fn staging() -> (tempfile::TempDir, Arc<dyn StagingStore>) {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn StagingStore> =
        Arc::new(LocalStagingStore::new(dir.path().to_path_buf()).unwrap());
    (dir, store)
}

async fn staged(
    store: &Arc<dyn StagingStore>,
    origin: DocumentOrigin,
    filename: &str,
    data: &[u8],
) -> DocumentPayload {
    let content_type = ContentType::detect(filename, None);
    let document = Document::new(origin, filename.to_string(), content_type, data.len() as u64);
    let upload = StagedUpload::stage(Arc::clone(store), document, data)
        .await
        .unwrap();
    DocumentPayload::Staged(upload)
}

#[tokio::test]
async fn given_both_texts_when_checking_then_returns_freeform_answer() {
    let llm = Arc::new(MockLlmClient::replying("All requirements met."));
    let service = service(Arc::clone(&llm));

    let result = service
        .check(
            ComparisonRequest::inline(Some("Must support TLS 1.2".into()), Some("TLS 1.3".into())),
            AnalysisMode::Freeform,
        )
        .await
        .unwrap();

    assert_eq!(
        result,
        ComplianceResult::Freeform("All requirements met.".to_string())
    );
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn given_missing_rfq_or_proposal_when_checking_then_validation_error_without_model_call() {
    let llm = Arc::new(MockLlmClient::replying("unused"));
    let service = service(Arc::clone(&llm));

    let cases = [
        (None, Some("proposal".to_string())),
        (Some("rfq".to_string()), None),
        (Some("".to_string()), Some("proposal".to_string())),
        (Some("rfq".to_string()), Some(" \n\t".to_string())),
    ];

    for (rfq, proposal) in cases {
        let err = service
            .check(ComparisonRequest::inline(rfq, proposal), AnalysisMode::Freeform)
            .await
            .unwrap_err();

        assert!(matches!(err, ComplianceError::Validation(ref m) if m == "Missing RFQ or Proposal text"));
        assert!(err.is_client_error());
    }
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn given_missing_upload_when_checking_then_reports_missing_file() {
    let (_dir, store) = staging();
    let llm = Arc::new(MockLlmClient::replying("unused"));
    let service = service(Arc::clone(&llm));

    let rfq = staged(&store, DocumentOrigin::Rfq, "rfq.txt", b"Need TLS").await;
    let err = service
        .check(ComparisonRequest::uploaded(Some(rfq), None), AnalysisMode::Freeform)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Missing RFQ or Proposal file");
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn given_staged_uploads_when_checking_then_files_removed_before_model_call() {
    let (dir, store) = staging();
    let llm = Arc::new(MockLlmClient::replying("fine").watching(dir.path()));
    let service = service(Arc::clone(&llm));

    let rfq = staged(&store, DocumentOrigin::Rfq, "rfq.txt", b"Need TLS").await;
    let proposal = staged(&store, DocumentOrigin::Proposal, "proposal.md", b"We have TLS").await;
    assert_eq!(count_files(dir.path()), 2);

    let result = service
        .check(
            ComparisonRequest::uploaded(Some(rfq), Some(proposal)),
            AnalysisMode::Freeform,
        )
        .await;

    assert!(result.is_ok());
    assert_eq!(*llm.staged_files_at_call.lock().unwrap(), Some(0));
    assert_eq!(count_files(dir.path()), 0);
}

#[tokio::test]
async fn given_unsupported_upload_when_checking_then_extraction_error_and_cleanup() {
    let (dir, store) = staging();
    let llm = Arc::new(MockLlmClient::replying("unused"));
    let service = service(Arc::clone(&llm));

    let rfq = staged(&store, DocumentOrigin::Rfq, "rfq.xyz", b"????").await;
    let proposal = staged(&store, DocumentOrigin::Proposal, "proposal.txt", b"We comply").await;

    let err = service
        .check(
            ComparisonRequest::uploaded(Some(rfq), Some(proposal)),
            AnalysisMode::Freeform,
        )
        .await
        .unwrap_err();

    match &err {
        ComplianceError::Extraction { origin, source } => {
            assert_eq!(*origin, DocumentOrigin::Rfq);
            assert!(matches!(source, FileLoaderError::UnsupportedFormat(label) if label == ".xyz"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_client_error());
    assert_eq!(llm.calls(), 0);
    assert_eq!(count_files(dir.path()), 0);
}

#[tokio::test]
async fn given_upload_with_no_text_when_checking_then_validation_error() {
    let (_dir, store) = staging();
    let llm = Arc::new(MockLlmClient::replying("unused"));
    let service = service(Arc::clone(&llm));

    let rfq = staged(&store, DocumentOrigin::Rfq, "rfq.txt", b"Need TLS").await;
    let proposal = staged(&store, DocumentOrigin::Proposal, "proposal.txt", b"   \n  ").await;

    let err = service
        .check(
            ComparisonRequest::uploaded(Some(rfq), Some(proposal)),
            AnalysisMode::Freeform,
        )
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "The Proposal document contains no readable text"
    );
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn given_slow_model_when_checking_then_times_out() {
    let llm = Arc::new(MockLlmClient::replying("late").slow(Duration::from_millis(500)));
    let file_loader: Arc<dyn FileLoader> = Arc::new(CompositeFileLoader::standard());
    let service = ComplianceService::new(
        file_loader,
        Arc::clone(&llm) as Arc<dyn LlmClient>,
        Duration::from_millis(20),
    );

    let err = service
        .check(
            ComparisonRequest::inline(Some("rfq".into()), Some("proposal".into())),
            AnalysisMode::Freeform,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ComplianceError::Timeout(_)));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn given_structured_mode_when_model_returns_findings_then_parses_them() {
    let findings = json!([
        {
            "requirement_summary": "TLS 1.2",
            "proposal_excerpt": "TLS 1.3 supported",
            "compliance_status": "COMPLIANT"
        },
        {
            "requirement_summary": "24/7 support",
            "proposal_excerpt": "Business hours support",
            "compliance_status": "PARTIALLY COMPLIANT",
            "actionable_insight": "Offer round-the-clock support."
        }
    ]);
    let llm = Arc::new(MockLlmClient::replying(&findings.to_string()));
    let service = service(Arc::clone(&llm));

    let result = service
        .check(
            ComparisonRequest::inline(Some("rfq".into()), Some("proposal".into())),
            AnalysisMode::Structured,
        )
        .await
        .unwrap();

    let ComplianceResult::Structured(findings) = result else {
        panic!("expected structured result");
    };
    assert_eq!(findings.len(), 2);
    assert_eq!(
        findings[1].actionable_insight.as_deref(),
        Some("Offer round-the-clock support.")
    );
}

#[tokio::test]
async fn given_structured_mode_when_model_returns_prose_then_malformed_output() {
    let llm = Arc::new(MockLlmClient::replying("I think it is mostly fine."));
    let service = service(Arc::clone(&llm));

    let err = service
        .check(
            ComparisonRequest::inline(Some("rfq".into()), Some("proposal".into())),
            AnalysisMode::Structured,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ComplianceError::MalformedOutput(_)));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn given_model_reply_without_text_when_checking_then_returns_sentinel() {
    let llm = Arc::new(MockLlmClient {
        reply: json!({ "candidates": [] }),
        ..MockLlmClient::replying("")
    });
    let service = service(Arc::clone(&llm));

    let result = service
        .check(
            ComparisonRequest::inline(Some("rfq".into()), Some("proposal".into())),
            AnalysisMode::Freeform,
        )
        .await
        .unwrap();

    assert_eq!(
        result,
        ComplianceResult::Freeform("No text returned from AI".to_string())
    );
}
