use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{FileLoader, FileLoaderError, LlmClient, LlmClientError};
use crate::domain::{AnalysisMode, ComplianceResult, DocumentOrigin};
use crate::infrastructure::observability::sanitize_prompt;

use super::prompt_builder::build_prompt;
use super::response_normalizer::{normalize_reply, parse_findings};
use super::staged_upload::StagedUpload;

const MISSING_TEXT_MESSAGE: &str = "Missing RFQ or Proposal text";
const MISSING_FILE_MESSAGE: &str = "Missing RFQ or Proposal file";

/// One side of a comparison as it arrived at the boundary.
#[derive(Debug)]
pub enum DocumentPayload {
    /// Text sent directly in a JSON body or a plain multipart field.
    Inline(String),
    /// A file part spooled to the staging store.
    Staged(StagedUpload),
}

impl DocumentPayload {
    fn is_empty(&self) -> bool {
        match self {
            DocumentPayload::Inline(text) => text.trim().is_empty(),
            DocumentPayload::Staged(upload) => upload.document().is_empty(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transport {
    Json,
    Multipart,
}

/// An RFQ and a Proposal to compare. Either side may be missing; that is
/// reported by [`ComplianceService::check`] before any model call.
#[derive(Debug)]
pub struct ComparisonRequest {
    rfq: Option<DocumentPayload>,
    proposal: Option<DocumentPayload>,
    transport: Transport,
}

impl ComparisonRequest {
    /// Texts from a JSON body.
    pub fn inline(rfq: Option<String>, proposal: Option<String>) -> Self {
        Self {
            rfq: rfq.map(DocumentPayload::Inline),
            proposal: proposal.map(DocumentPayload::Inline),
            transport: Transport::Json,
        }
    }

    /// Parts of a multipart form.
    pub fn uploaded(rfq: Option<DocumentPayload>, proposal: Option<DocumentPayload>) -> Self {
        Self {
            rfq,
            proposal,
            transport: Transport::Multipart,
        }
    }

    fn into_payloads(self) -> Result<(DocumentPayload, DocumentPayload), ComplianceError> {
        let message = match self.transport {
            Transport::Json => MISSING_TEXT_MESSAGE,
            Transport::Multipart => MISSING_FILE_MESSAGE,
        };

        match (self.rfq, self.proposal) {
            (Some(rfq), Some(proposal)) if !rfq.is_empty() && !proposal.is_empty() => {
                Ok((rfq, proposal))
            }
            _ => Err(ComplianceError::Validation(message.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ComplianceError {
    #[error("{0}")]
    Validation(String),
    #[error("{origin} document: {source}")]
    Extraction {
        origin: DocumentOrigin,
        source: FileLoaderError,
    },
    #[error("model request failed: {0}")]
    Upstream(#[from] LlmClientError),
    #[error("model request timed out after {0:?}")]
    Timeout(Duration),
    #[error("model returned a malformed analysis: {0}")]
    MalformedOutput(#[source] serde_json::Error),
}

impl ComplianceError {
    /// Whether the failure stems from the caller's input rather than the model.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ComplianceError::Validation(_) | ComplianceError::Extraction { .. }
        )
    }
}

pub struct ComplianceService {
    file_loader: Arc<dyn FileLoader>,
    llm_client: Arc<dyn LlmClient>,
    request_timeout: Duration,
}

impl ComplianceService {
    pub fn new(
        file_loader: Arc<dyn FileLoader>,
        llm_client: Arc<dyn LlmClient>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            file_loader,
            llm_client,
            request_timeout,
        }
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn check(
        &self,
        request: ComparisonRequest,
        mode: AnalysisMode,
    ) -> Result<ComplianceResult, ComplianceError> {
        let (rfq, proposal) = request.into_payloads()?;

        let rfq_text = self.read_text(rfq, DocumentOrigin::Rfq).await?;
        let proposal_text = self.read_text(proposal, DocumentOrigin::Proposal).await?;

        let prompt = build_prompt(&rfq_text, &proposal_text, mode);
        tracing::debug!(
            prompt = %sanitize_prompt(prompt.text()),
            prompt_chars = prompt.text().len(),
            "Sending compliance prompt"
        );

        let reply = tokio::time::timeout(
            self.request_timeout,
            self.llm_client.generate_content(&prompt),
        )
        .await
        .map_err(|_| ComplianceError::Timeout(self.request_timeout))??;

        let text = normalize_reply(&reply);

        match mode {
            AnalysisMode::Freeform => {
                tracing::info!(answer_chars = text.len(), "Compliance analysis complete");
                Ok(ComplianceResult::Freeform(text))
            }
            AnalysisMode::Structured => {
                let findings = parse_findings(&text).map_err(|e| {
                    tracing::warn!(
                        error = %e,
                        reply = %sanitize_prompt(&text),
                        "Structured reply did not match the finding schema"
                    );
                    ComplianceError::MalformedOutput(e)
                })?;
                tracing::info!(findings = findings.len(), "Compliance analysis complete");
                Ok(ComplianceResult::Structured(findings))
            }
        }
    }

    /// Staged uploads are consumed here, so their files are gone before the
    /// model is called.
    async fn read_text(
        &self,
        payload: DocumentPayload,
        origin: DocumentOrigin,
    ) -> Result<String, ComplianceError> {
        let text = match payload {
            DocumentPayload::Inline(text) => text,
            DocumentPayload::Staged(upload) => {
                let data = upload.read().await.map_err(|e| ComplianceError::Extraction {
                    origin,
                    source: FileLoaderError::ExtractionFailed(format!(
                        "failed to read staged upload: {e}"
                    )),
                })?;

                self.file_loader
                    .extract_text(&data, upload.document())
                    .await
                    .map_err(|source| ComplianceError::Extraction { origin, source })?
            }
        };

        if text.trim().is_empty() {
            return Err(ComplianceError::Validation(format!(
                "The {} document contains no readable text",
                origin.label()
            )));
        }

        Ok(text)
    }
}
