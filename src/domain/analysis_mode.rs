use serde::Deserialize;

/// Shape of the answer requested from the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Prose compliance analysis.
    #[default]
    Freeform,
    /// A JSON array of [`ComplianceFinding`](super::ComplianceFinding)s.
    Structured,
}
