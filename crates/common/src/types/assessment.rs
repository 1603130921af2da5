use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ids::{AssessmentId, DocumentId};
use crate::types::{ClauseType, RankedPrecedent, RiskLevel, RiskedClause};

/// Caller-supplied document metadata. Read-only to the pipeline.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub id: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
}

/// Recommendation priority, ordered from lowest to highest urgency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// A risk-mitigation recommendation emitted by the fixed rule table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub text: String,
}

/// Document-level risk assessment. Created once per analysis run and
/// superseded, not mutated, by re-analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentRiskAssessment {
    pub id: AssessmentId,
    pub document_id: DocumentId,
    /// Boosted average clause risk, clamped to [0, 10].
    pub overall_score: f64,
    pub overall_level: RiskLevel,
    pub clauses: Vec<RiskedClause>,
    pub clause_count: usize,
    pub high_risk_count: usize,
    pub recommendations: Vec<Recommendation>,
    /// Empty when no lookup ran or the search degraded.
    pub supporting_precedents: Vec<RankedPrecedent>,
    pub analyzed_at: DateTime<Utc>,
}

impl DocumentRiskAssessment {
    /// Histogram of clause risk levels. The counts always sum to
    /// `clause_count`.
    pub fn level_histogram(&self) -> HashMap<RiskLevel, usize> {
        let mut histogram = HashMap::new();
        for clause in &self.clauses {
            *histogram.entry(clause.risk_level).or_insert(0) += 1;
        }
        histogram
    }
}

/// Summary statistics over a set of extracted clauses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClauseSummary {
    pub total_clauses: usize,
    pub clause_types: HashMap<ClauseType, usize>,
    /// Clauses with confidence ≥ 0.8.
    pub high_confidence_count: usize,
    pub clauses_with_risk_indicators: usize,
    pub total_risk_indicators: usize,
    /// 0.0 when the input is empty.
    pub average_confidence: f64,
}
