use serde::Deserialize;
use serde_json::Value;

use crate::domain::ComplianceFinding;

pub const NO_TEXT_SENTINEL: &str = "No text returned from AI";

/// The reply shapes a content-generation call is known to produce.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ModelReply {
    /// A bare JSON string.
    Bare(String),
    /// `{ "text": "..." }`
    Text { text: String },
    /// `{ "response": <reply> }`
    Wrapped { response: Box<ModelReply> },
    /// `{ "candidates": [{ "content": { "parts": [{ "text": "..." }] } }] }`
    Candidates { candidates: Vec<Candidate> },
    #[serde(skip)]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

impl ModelReply {
    /// Never fails: anything unrecognised decodes to [`ModelReply::Empty`].
    pub fn decode(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or(ModelReply::Empty)
    }

    /// The first non-empty text carried by the reply.
    pub fn into_text(self) -> Option<String> {
        match self {
            ModelReply::Bare(text) | ModelReply::Text { text } => non_empty(text),
            ModelReply::Wrapped { response } => response.into_text(),
            ModelReply::Candidates { candidates } => {
                candidates.into_iter().find_map(Candidate::into_text)
            }
            ModelReply::Empty => None,
        }
    }
}

impl Candidate {
    fn into_text(self) -> Option<String> {
        self.content?
            .parts
            .into_iter()
            .find_map(|part| part.text.and_then(non_empty))
    }
}

pub fn normalize_reply(value: &Value) -> String {
    ModelReply::decode(value)
        .into_text()
        .unwrap_or_else(|| NO_TEXT_SENTINEL.to_string())
}

/// Parses structured-mode output. A surrounding Markdown code fence is tolerated.
pub fn parse_findings(text: &str) -> Result<Vec<ComplianceFinding>, serde_json::Error> {
    serde_json::from_str(strip_code_fence(text))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() { None } else { Some(text) }
}
