use async_trait::async_trait;
use serde_json::Value;

use crate::domain::CompliancePrompt;

/// Content-generation operation of the hosted model.
///
/// The reply is returned undecoded: its shape is not contractually fixed and
/// is normalized by the caller.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_content(&self, prompt: &CompliancePrompt) -> Result<Value, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("client initialization failed: {0}")]
    InitializationFailed(String),
}
