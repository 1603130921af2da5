use serde::{Deserialize, Serialize};

/// Closed taxonomy of contract clause categories.
///
/// Every variant carries a static keyword set and risk-indicator set in the
/// engine's pattern tables; `Unknown` is the fallback when no category
/// scores above zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseType {
    Indemnification,
    LiabilityLimitation,
    Confidentiality,
    Termination,
    PaymentTerms,
    IntellectualProperty,
    DisputeResolution,
    GoverningLaw,
    ForceMajeure,
    Warranty,
    NonCompete,
    Assignment,
    Notice,
    Severability,
    EntireAgreement,
    Amendment,
    Arbitration,
    AutomaticRenewal,
    ChangeOfControl,
    DataProtection,
    Unknown,
}

impl ClauseType {
    /// All variants, in declaration order.
    pub const ALL: [ClauseType; 21] = [
        ClauseType::Indemnification,
        ClauseType::LiabilityLimitation,
        ClauseType::Confidentiality,
        ClauseType::Termination,
        ClauseType::PaymentTerms,
        ClauseType::IntellectualProperty,
        ClauseType::DisputeResolution,
        ClauseType::GoverningLaw,
        ClauseType::ForceMajeure,
        ClauseType::Warranty,
        ClauseType::NonCompete,
        ClauseType::Assignment,
        ClauseType::Notice,
        ClauseType::Severability,
        ClauseType::EntireAgreement,
        ClauseType::Amendment,
        ClauseType::Arbitration,
        ClauseType::AutomaticRenewal,
        ClauseType::ChangeOfControl,
        ClauseType::DataProtection,
        ClauseType::Unknown,
    ];

    /// Stable snake_case name used in search terms and persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indemnification => "indemnification",
            Self::LiabilityLimitation => "liability_limitation",
            Self::Confidentiality => "confidentiality",
            Self::Termination => "termination",
            Self::PaymentTerms => "payment_terms",
            Self::IntellectualProperty => "intellectual_property",
            Self::DisputeResolution => "dispute_resolution",
            Self::GoverningLaw => "governing_law",
            Self::ForceMajeure => "force_majeure",
            Self::Warranty => "warranty",
            Self::NonCompete => "non_compete",
            Self::Assignment => "assignment",
            Self::Notice => "notice",
            Self::Severability => "severability",
            Self::EntireAgreement => "entire_agreement",
            Self::Amendment => "amendment",
            Self::Arbitration => "arbitration",
            Self::AutomaticRenewal => "automatic_renewal",
            Self::ChangeOfControl => "change_of_control",
            Self::DataProtection => "data_protection",
            Self::Unknown => "unknown",
        }
    }
}

/// Risk level bands over the 0–10 score scale. Thresholds are fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Minimal,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Pure function from score to band: critical ≥ 8, high ≥ 6,
    /// medium ≥ 4, low ≥ 2, else minimal.
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            Self::Critical
        } else if score >= 6.0 {
            Self::High
        } else if score >= 4.0 {
            Self::Medium
        } else if score >= 2.0 {
            Self::Low
        } else {
            Self::Minimal
        }
    }

    /// High or critical — the bands that trigger precedent lookups and
    /// the document-level boost.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }

    pub fn as_db_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// A clause extracted and classified from contract text.
///
/// Immutable once produced. Offsets are absolute character positions into
/// the original document for traceability.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractedClause {
    pub clause_type: ClauseType,
    pub text: String,
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    /// Classification confidence in [0, 1].
    pub confidence: f64,
    #[serde(default)]
    pub keywords_matched: Vec<String>,
    /// Risk-indicator phrases found verbatim in the clause text.
    #[serde(default)]
    pub risk_indicators: Vec<String>,
}

/// An extracted clause plus its risk score.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RiskedClause {
    #[serde(flatten)]
    pub clause: ExtractedClause,
    /// Confidence-adjusted risk score, clamped to [0, 10].
    pub risk_score: f64,
    /// Derived from `risk_score` via the fixed thresholds.
    pub risk_level: RiskLevel,
    /// Static weight for the clause type before indicator adjustment.
    pub base_risk: f64,
}
