use serde_json::{Value, json};

use crate::domain::{AnalysisMode, CompliancePrompt};

const PREAMBLE: &str =
    "Compare the following RFQ and Proposal documents for compliance, gaps, and improvement suggestions.";

const FREEFORM_INSTRUCTION: &str = "Provide a detailed compliance analysis.";

const STRUCTURED_INSTRUCTION: &str = "\
Identify every requirement stated in the RFQ and assess how the Proposal addresses it.
Respond with ONLY a JSON array and no surrounding prose or Markdown. Each element must be an object with exactly these fields:
- \"requirement_summary\": a short summary of the RFQ requirement.
- \"proposal_excerpt\": the passage of the Proposal that addresses the requirement, or an empty string if none does.
- \"compliance_status\": one of \"COMPLIANT\", \"PARTIALLY COMPLIANT\", \"NON-COMPLIANT\".
- \"actionable_insight\": what the Proposal must change to become compliant. Leave it empty when the status is \"COMPLIANT\".";

/// Composes the comparison request. The output depends only on the arguments,
/// and neither document is truncated.
pub fn build_prompt(rfq_text: &str, proposal_text: &str, mode: AnalysisMode) -> CompliancePrompt {
    let body = format!("{PREAMBLE}\n\nRFQ:\n{rfq_text}\n\nProposal:\n{proposal_text}\n\n");

    match mode {
        AnalysisMode::Freeform => CompliancePrompt::freeform(body + FREEFORM_INSTRUCTION),
        AnalysisMode::Structured => {
            CompliancePrompt::structured(body + STRUCTURED_INSTRUCTION, compliance_schema())
        }
    }
}

/// Response schema for structured mode, in the Generative Language API's
/// OpenAPI subset.
pub fn compliance_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "requirement_summary": { "type": "STRING" },
                "proposal_excerpt": { "type": "STRING" },
                "compliance_status": {
                    "type": "STRING",
                    "enum": ["COMPLIANT", "PARTIALLY COMPLIANT", "NON-COMPLIANT"]
                },
                "actionable_insight": { "type": "STRING" }
            },
            "required": ["requirement_summary", "proposal_excerpt", "compliance_status"]
        }
    })
}
