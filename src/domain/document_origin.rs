use std::fmt;

/// Which side of the comparison a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentOrigin {
    Rfq,
    Proposal,
}

impl DocumentOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentOrigin::Rfq => "rfq",
            DocumentOrigin::Proposal => "proposal",
        }
    }

    /// Human-facing name, as used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentOrigin::Rfq => "RFQ",
            DocumentOrigin::Proposal => "Proposal",
        }
    }
}

impl fmt::Display for DocumentOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
