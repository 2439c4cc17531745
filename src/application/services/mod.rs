mod client_resolver;
mod compliance_service;
mod prompt_builder;
mod response_normalizer;
mod staged_upload;

pub use client_resolver::{ClientResolver, GOOGLE_GENERATIVE_AI_EXPORT, LookupStrategy, ResolveError};
pub use compliance_service::{ComparisonRequest, ComplianceError, ComplianceService, DocumentPayload};
pub use prompt_builder::{build_prompt, compliance_schema};
pub use response_normalizer::{ModelReply, NO_TEXT_SENTINEL, normalize_reply, parse_findings};
pub use staged_upload::StagedUpload;
