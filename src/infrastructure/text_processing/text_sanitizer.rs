use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<head>\w)-[ \t]*\r?\n[ \t]*(?P<tail>\w)").expect("valid hyphenation pattern")
});

const SOFT_HYPHEN: char = '\u{00AD}';

/// Cleans page text produced by PDF extraction: NFKC normalization, words
/// re-joined across hyphenated line breaks, runs of whitespace collapsed,
/// blank-line runs reduced to one paragraph break.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw
        .nfkc()
        .filter(|c| *c != SOFT_HYPHEN && (!c.is_control() || matches!(c, '\n' | '\r' | '\t')))
        .collect();
    let joined = HYPHEN_LINE_BREAK.replace_all(&normalized, "$head$tail");

    let mut paragraphs: Vec<Vec<String>> = vec![Vec::new()];
    for line in joined.lines() {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            if paragraphs.last().is_some_and(|p| !p.is_empty()) {
                paragraphs.push(Vec::new());
            }
        } else if let Some(current) = paragraphs.last_mut() {
            current.push(words.join(" "));
        }
    }

    paragraphs
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(|p| p.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}
