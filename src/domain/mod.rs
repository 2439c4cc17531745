mod analysis_mode;
mod compliance;
mod compliance_prompt;
mod document;
mod document_id;
mod document_origin;
mod storage_path;

pub use analysis_mode::AnalysisMode;
pub use compliance::{ComplianceFinding, ComplianceResult, ComplianceStatus};
pub use compliance_prompt::CompliancePrompt;
pub use document::{ContentType, Document};
pub use document_id::DocumentId;
pub use document_origin::DocumentOrigin;
pub use storage_path::StoragePath;
