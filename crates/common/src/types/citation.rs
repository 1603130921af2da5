use serde::{Deserialize, Serialize};

/// Categories of legal citation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationType {
    FederalCase,
    StateCase,
    Statute,
    Regulation,
    Constitutional,
    Unknown,
}

/// Structured representation of a parsed legal citation.
///
/// An unparseable citation is kept with `is_valid = false` and a low
/// confidence rather than discarded, so callers can still inspect the raw
/// text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParsedCitation {
    pub raw: String,
    pub citation_type: CitationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Page reference within the cited case, narrower than `page`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_name: Option<String>,
    pub is_valid: bool,
    pub confidence: f64,
}

impl ParsedCitation {
    /// An unrecognized citation with fixed zero confidence.
    pub fn unknown(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            citation_type: CitationType::Unknown,
            volume: None,
            reporter: None,
            page: None,
            pinpoint: None,
            year: None,
            court: None,
            jurisdiction: None,
            case_name: None,
            is_valid: false,
            confidence: 0.0,
        }
    }
}

/// Batch validation report over a set of citations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CitationReport {
    pub total: usize,
    pub valid: usize,
    pub invalid: Vec<InvalidCitation>,
    /// Percentage of valid citations, 0.0 when the input is empty.
    pub validation_rate: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvalidCitation {
    pub raw: String,
    pub reason: String,
}
