use rfq_compliance::infrastructure::text_processing::sanitize_extracted_text;

#[test]
fn given_hyphenated_line_break_when_sanitizing_then_word_is_joined() {
    assert_eq!(
        sanitize_extracted_text("The vendor shall pro-\nvide support."),
        "The vendor shall provide support."
    );
}

#[test]
fn given_repeated_whitespace_when_sanitizing_then_collapsed() {
    assert_eq!(
        sanitize_extracted_text("Delivery    within\t\t30   days"),
        "Delivery within 30 days"
    );
}

#[test]
fn given_blank_line_runs_when_sanitizing_then_single_paragraph_break() {
    assert_eq!(
        sanitize_extracted_text("Section 1\n\n\n\nSection 2\nline two"),
        "Section 1\n\nSection 2\nline two"
    );
}

#[test]
fn given_ligatures_and_soft_hyphens_when_sanitizing_then_normalized() {
    assert_eq!(sanitize_extracted_text("\u{FB01}nal of\u{00AD}fer"), "final offer");
}

#[test]
fn given_control_characters_when_sanitizing_then_removed() {
    assert_eq!(sanitize_extracted_text("TLS\u{0007} 1.2\u{0000}"), "TLS 1.2");
}

#[test]
fn given_only_whitespace_when_sanitizing_then_empty() {
    assert_eq!(sanitize_extracted_text(" \n\t \n"), "");
}
