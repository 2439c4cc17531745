use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::application::services::{ComparisonRequest, DocumentPayload, StagedUpload};
use crate::domain::{ContentType, Document, DocumentOrigin};
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ComparisonBody {
    #[serde(default)]
    pub rfq: Option<String>,
    #[serde(default)]
    pub proposal: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Invalid JSON body: {message}")]
    Json { status: StatusCode, message: String },
    #[error("Invalid multipart body: {message}")]
    Multipart { status: StatusCode, message: String },
    #[error("Expected exactly two files, got {0}")]
    FileCount(usize),
    #[error("Failed to stage upload: {0}")]
    Staging(#[from] StagingStoreError),
}

impl FormError {
    pub fn status(&self) -> StatusCode {
        match self {
            FormError::Json { status, .. } | FormError::Multipart { status, .. } => *status,
            FormError::FileCount(_) => StatusCode::BAD_REQUEST,
            FormError::Staging(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for FormError {
    fn from(rejection: JsonRejection) -> Self {
        FormError::Json {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartRejection> for FormError {
    fn from(rejection: MultipartRejection) -> Self {
        FormError::Multipart {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for FormError {
    fn from(error: MultipartError) -> Self {
        FormError::Multipart {
            status: error.status(),
            message: error.body_text(),
        }
    }
}

#[derive(Clone, Copy)]
enum Slot {
    Rfq,
    Proposal,
    Files,
}

impl Slot {
    fn from_field_name(name: &str) -> Option<Self> {
        match name {
            "rfq" | "rfq_file" => Some(Slot::Rfq),
            "proposal" | "proposal_file" => Some(Slot::Proposal),
            "files" | "files[]" => Some(Slot::Files),
            _ => None,
        }
    }
}

/// Reads either a JSON body `{rfq, proposal}` or a multipart form. Any upload
/// staged before a failure is released when its guard drops.
pub async fn read_comparison(
    state: &AppState,
    request: Request,
) -> Result<ComparisonRequest, FormError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.to_ascii_lowercase().starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(request, state).await?;
        read_multipart(&state.staging_store, multipart).await
    } else {
        let Json(body) = Json::<ComparisonBody>::from_request(request, state).await?;
        Ok(ComparisonRequest::inline(body.rfq, body.proposal))
    }
}

async fn read_multipart(
    store: &Arc<dyn StagingStore>,
    mut multipart: Multipart,
) -> Result<ComparisonRequest, FormError> {
    let mut rfq = None;
    let mut proposal = None;
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let Some(slot) = Slot::from_field_name(&name) else {
            tracing::debug!(field = %name, "Ignoring unknown form field");
            continue;
        };

        match slot {
            Slot::Rfq => rfq = Some(read_field(store, field, DocumentOrigin::Rfq).await?),
            Slot::Proposal => {
                proposal = Some(read_field(store, field, DocumentOrigin::Proposal).await?)
            }
            Slot::Files => {
                let origin = match files.len() {
                    0 => DocumentOrigin::Rfq,
                    1 => DocumentOrigin::Proposal,
                    n => return Err(FormError::FileCount(n + 1)),
                };
                files.push(read_field(store, field, origin).await?);
            }
        }
    }

    if !files.is_empty() {
        if files.len() != 2 {
            return Err(FormError::FileCount(files.len()));
        }
        let mut files = files.into_iter();
        rfq = rfq.or(files.next());
        proposal = proposal.or(files.next());
    }

    Ok(ComparisonRequest::uploaded(rfq, proposal))
}

/// Plain form fields become inline text; file parts are staged.
async fn read_field(
    store: &Arc<dyn StagingStore>,
    field: Field<'_>,
    origin: DocumentOrigin,
) -> Result<DocumentPayload, FormError> {
    let Some(filename) = field.file_name().map(str::to_string) else {
        let text = field.text().await?;
        return Ok(DocumentPayload::Inline(text));
    };

    let declared_mime = field.content_type().map(str::to_string);
    let data = field.bytes().await?;

    let content_type = ContentType::detect(&filename, declared_mime.as_deref());
    tracing::debug!(
        origin = %origin,
        filename = %filename,
        declared_mime = ?declared_mime,
        content_type = ?content_type,
        bytes = data.len(),
        "Received document upload"
    );

    let document = Document::new(origin, filename, content_type, data.len() as u64);
    let upload = StagedUpload::stage(Arc::clone(store), document, &data).await?;
    Ok(DocumentPayload::Staged(upload))
}
