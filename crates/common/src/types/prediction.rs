use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::PredictionId;
use crate::types::Outcome;

/// Probability distribution over litigation outcomes.
///
/// Invariant: whenever non-empty, values are non-negative and sum to 1.0
/// within 1e-6.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct OutcomeProbabilities {
    pub plaintiff_victory: f64,
    pub defendant_victory: f64,
    pub settlement: f64,
    pub dismissed: f64,
}

impl OutcomeProbabilities {
    /// Uniform-ish default when no precedent population exists.
    pub fn uniform_default() -> Self {
        Self {
            plaintiff_victory: 0.33,
            defendant_victory: 0.33,
            settlement: 0.34,
            dismissed: 0.0,
        }
    }

    pub fn sum(&self) -> f64 {
        self.plaintiff_victory + self.defendant_victory + self.settlement + self.dismissed
    }

    /// Rescale so the distribution sums to 1.0. No-op on a zero-sum
    /// distribution.
    pub fn normalize(&mut self) {
        let total = self.sum();
        if total > 0.0 {
            self.plaintiff_victory /= total;
            self.defendant_victory /= total;
            self.settlement /= total;
            self.dismissed /= total;
        }
    }

    /// The most probable outcome and its probability.
    pub fn dominant(&self) -> (Outcome, f64) {
        let pairs = [
            (Outcome::PlaintiffWin, self.plaintiff_victory),
            (Outcome::DefendantWin, self.defendant_victory),
            (Outcome::Settlement, self.settlement),
            (Outcome::Dismissed, self.dismissed),
        ];
        pairs
            .into_iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap_or((Outcome::Unknown, 0.0))
    }
}

/// Confidence tier derived from sample size: high ≥ 20, medium ≥ 10,
/// else low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_sample_count(count: usize) -> Self {
        if count >= 20 {
            Self::High
        } else if count >= 10 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Order statistics over a settlement-amount population.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettlementStats {
    pub min: f64,
    pub p10: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub p90: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Low/expected/high settlement band presented to the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettlementRange {
    pub low: f64,
    pub expected: f64,
    pub high: f64,
}

/// Settlement estimation result. `range` is `None` when no qualifying
/// precedents carry settlement data — an explicit no-data result, never a
/// fabricated number.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettlementEstimate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<SettlementRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<SettlementStats>,
    pub confidence: ConfidenceTier,
    pub based_on_cases: usize,
    pub recommendation: String,
}

/// Litigation stage; the fraction estimates remaining time from that
/// stage to resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStage {
    Filing,
    Discovery,
    PreTrial,
    Trial,
    PostTrial,
}

impl CaseStage {
    pub fn remaining_fraction(&self) -> f64 {
        match self {
            Self::Filing => 1.0,
            Self::Discovery => 0.7,
            Self::PreTrial => 0.4,
            Self::Trial => 0.2,
            Self::PostTrial => 0.1,
        }
    }
}

/// Optimistic/expected/pessimistic figures in a single unit.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TimelineFigures {
    pub optimistic: f64,
    pub expected: f64,
    pub pessimistic: f64,
}

/// A named fraction of the expected remaining duration, anchored to an
/// absolute calendar date.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    pub days_from_now: i64,
    pub estimated_date: NaiveDate,
}

/// Case timeline estimate from the given stage to resolution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimelineEstimate {
    pub days: TimelineFigures,
    pub months: TimelineFigures,
    pub based_on_cases: usize,
    /// True when the practice-area default table was used instead of
    /// historical day-delta data.
    pub default_estimate: bool,
    pub milestones: Vec<Milestone>,
}

/// Which side the strength assessment is computed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perspective {
    Plaintiff,
    Defendant,
}

/// Case strength bands over the 0–10 score scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthCategory {
    #[serde(rename = "Very Strong")]
    VeryStrong,
    Strong,
    Moderate,
    Weak,
    #[serde(rename = "Very Weak")]
    VeryWeak,
}

impl StrengthCategory {
    /// Fixed bands: ≥8 very strong, ≥6.5 strong, ≥5 moderate, ≥3.5 weak,
    /// else very weak.
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            Self::VeryStrong
        } else if score >= 6.5 {
            Self::Strong
        } else if score >= 5.0 {
            Self::Moderate
        } else if score >= 3.5 {
            Self::Weak
        } else {
            Self::VeryWeak
        }
    }
}

/// Case strength assessment from one side's perspective.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseStrength {
    pub score: f64,
    pub category: StrengthCategory,
    pub perspective: Perspective,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub key_factors: Vec<String>,
    pub recommendation: String,
    /// Confidence of the underlying outcome prediction, 0–10.
    pub confidence: f64,
}

/// Outcome prediction over a filtered precedent population.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutcomePrediction {
    pub probabilities: OutcomeProbabilities,
    /// Prediction confidence in [0, 10].
    pub confidence: f64,
    pub based_on_cases: usize,
    pub key_factors: Vec<String>,
    pub recommendation: String,
}

/// Combined prediction product saved by the persistence sink.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PredictionResult {
    pub id: PredictionId,
    pub outcome: OutcomePrediction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement: Option<SettlementEstimate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<TimelineEstimate>,
}
