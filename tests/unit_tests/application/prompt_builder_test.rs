use rfq_compliance::application::services::{build_prompt, compliance_schema};
use rfq_compliance::domain::AnalysisMode;

#[test]
fn given_same_inputs_when_building_twice_then_prompts_are_identical() {
    let first = build_prompt("Must support TLS 1.2", "We support TLS 1.3", AnalysisMode::Freeform);
    let second = build_prompt("Must support TLS 1.2", "We support TLS 1.3", AnalysisMode::Freeform);

    assert_eq!(first, second);
}

#[test]
fn given_freeform_mode_when_building_then_prompt_has_sections_in_order() {
    let prompt = build_prompt("RFQ BODY", "PROPOSAL BODY", AnalysisMode::Freeform);
    let text = prompt.text();

    assert!(text.starts_with(
        "Compare the following RFQ and Proposal documents for compliance, gaps, and improvement suggestions."
    ));
    let rfq_at = text.find("RFQ:\nRFQ BODY").unwrap();
    let proposal_at = text.find("Proposal:\nPROPOSAL BODY").unwrap();
    assert!(rfq_at < proposal_at);
    assert!(text.ends_with("Provide a detailed compliance analysis."));
    assert!(prompt.response_schema().is_none());
}

#[test]
fn given_long_documents_when_building_then_nothing_is_truncated() {
    let rfq = "requirement ".repeat(20_000);
    let proposal = "answer ".repeat(20_000);

    let prompt = build_prompt(&rfq, &proposal, AnalysisMode::Freeform);

    assert!(prompt.text().contains(&rfq));
    assert!(prompt.text().contains(&proposal));
}

#[test]
fn given_structured_mode_when_building_then_prompt_names_fields_and_statuses() {
    let prompt = build_prompt("RFQ BODY", "PROPOSAL BODY", AnalysisMode::Structured);
    let text = prompt.text();

    for field in [
        "requirement_summary",
        "proposal_excerpt",
        "compliance_status",
        "actionable_insight",
    ] {
        assert!(text.contains(field), "missing field {field}");
    }
    for status in ["\"COMPLIANT\"", "\"PARTIALLY COMPLIANT\"", "\"NON-COMPLIANT\""] {
        assert!(text.contains(status), "missing status {status}");
    }
    assert_eq!(prompt.response_schema(), Some(&compliance_schema()));
}

#[test]
fn given_schema_when_inspected_then_status_enum_matches_labels() {
    let schema = compliance_schema();

    assert_eq!(schema["type"], "ARRAY");
    assert_eq!(
        schema["items"]["properties"]["compliance_status"]["enum"],
        serde_json::json!(["COMPLIANT", "PARTIALLY COMPLIANT", "NON-COMPLIANT"])
    );
}
