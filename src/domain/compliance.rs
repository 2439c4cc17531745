use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    #[serde(rename = "COMPLIANT")]
    Compliant,
    #[serde(
        rename = "PARTIALLY COMPLIANT",
        alias = "PARTIALLY_COMPLIANT",
        alias = "PARTIALLY-COMPLIANT"
    )]
    PartiallyCompliant,
    #[serde(
        rename = "NON-COMPLIANT",
        alias = "NON_COMPLIANT",
        alias = "NON COMPLIANT"
    )]
    NonCompliant,
}

/// One judgment linking an RFQ requirement to the proposal's evidence.
///
/// The model is asked to fill `actionable_insight` only for findings that are
/// not fully compliant; that is not checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceFinding {
    pub requirement_summary: String,
    #[serde(default)]
    pub proposal_excerpt: String,
    pub compliance_status: ComplianceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actionable_insight: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComplianceResult {
    Freeform(String),
    Structured(Vec<ComplianceFinding>),
}
