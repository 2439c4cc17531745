use serde_json::Value;

/// A fully composed model request. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CompliancePrompt {
    text: String,
    response_schema: Option<Value>,
}

impl CompliancePrompt {
    pub fn freeform(text: String) -> Self {
        Self {
            text,
            response_schema: None,
        }
    }

    pub fn structured(text: String, response_schema: Value) -> Self {
        Self {
            text,
            response_schema: Some(response_schema),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn response_schema(&self) -> Option<&Value> {
        self.response_schema.as_ref()
    }

    pub fn is_structured(&self) -> bool {
        self.response_schema.is_some()
    }
}
