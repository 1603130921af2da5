use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a historical case resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlaintiffWin,
    DefendantWin,
    Settlement,
    Dismissed,
    Unknown,
}

/// Court level derived from the court name. Used to weight precedent
/// strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtLevel {
    Supreme,
    Appellate,
    District,
    Other,
}

/// A historical case-law record sourced from the precedent store or an
/// external case-law API. Read-only to the pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CasePrecedent {
    /// External/provider case identifier.
    pub case_id: String,
    pub case_name: String,
    pub citation: String,
    pub court: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filing_date: Option<DateTime<Utc>>,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    /// Raw relevance score supplied by the search provider.
    #[serde(default)]
    pub relevance_score: f64,
    /// Provider's precedential status marker (e.g. "Published").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precedent_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CasePrecedent {
    /// Court level inferred from the court name string.
    pub fn court_level(&self) -> CourtLevel {
        if self.court.contains("Supreme") {
            CourtLevel::Supreme
        } else if self.court.contains("Circuit") || self.court.contains("Appeal") {
            CourtLevel::Appellate
        } else if self.court.contains("District") {
            CourtLevel::District
        } else {
            CourtLevel::Other
        }
    }

    /// Whether the decision is within `years` of `now`.
    pub fn decided_within_years(&self, now: DateTime<Utc>, years: f64) -> bool {
        match self.decision_date {
            Some(decided) => {
                let age_days = (now - decided).num_days() as f64;
                age_days / 365.0 < years
            }
            None => false,
        }
    }
}

/// A precedent scored and ordered against a query context. Recomputed per
/// query; never cached across contexts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RankedPrecedent {
    pub precedent: CasePrecedent,
    pub final_score: f64,
    /// 1-indexed position after the stable descending sort.
    pub rank: usize,
    pub relevance_factors: Vec<String>,
}

/// Parameters for a precedent store/search query.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PrecedentQuery {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
    pub limit: u32,
}

impl PrecedentQuery {
    /// Cache key covering every field that changes the result set.
    pub fn signature(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}|{}",
            self.query,
            self.practice_area.as_deref().unwrap_or(""),
            self.jurisdiction.as_deref().unwrap_or(""),
            self.case_type.as_deref().unwrap_or(""),
            self.date_from.map(|d| d.to_rfc3339()).unwrap_or_default(),
            self.date_to.map(|d| d.to_rfc3339()).unwrap_or_default(),
            self.limit,
        )
    }
}
