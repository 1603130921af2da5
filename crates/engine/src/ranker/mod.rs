//! Precedent ranking and relevance analysis.
//!
//! Ranking is a pure function of the precedent list and a query context;
//! nothing here performs I/O. Scores recompute per context and are never
//! reused across queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lexrisk_common::types::{CasePrecedent, CourtLevel, RankedPrecedent};

/// Query-side context a precedent is scored against.
#[derive(Clone, Copy, Debug)]
pub struct RankContext<'a> {
    pub practice_area: Option<&'a str>,
    pub jurisdiction: Option<&'a str>,
    pub now: DateTime<Utc>,
}

/// Detailed relevance breakdown for one precedent against a case
/// description.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelevanceAnalysis {
    /// Composite relevance on the 0–10 scale.
    pub score: f64,
    pub factors: Vec<String>,
    pub recommendation: String,
}

/// Stateless ranking engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrecedentRanker;

impl PrecedentRanker {
    pub fn new() -> Self {
        Self
    }

    /// Order precedents by boosted relevance, descending. The sort is
    /// stable, so provider order breaks exact ties. Ranks are 1-indexed.
    pub fn rank(&self, precedents: Vec<CasePrecedent>, ctx: &RankContext) -> Vec<RankedPrecedent> {
        let mut ranked: Vec<RankedPrecedent> = precedents
            .into_iter()
            .map(|precedent| {
                let (final_score, relevance_factors) = self.boosted_score(&precedent, ctx);
                RankedPrecedent {
                    precedent,
                    final_score,
                    rank: 0,
                    relevance_factors,
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
        for (i, entry) in ranked.iter_mut().enumerate() {
            entry.rank = i + 1;
        }
        ranked
    }

    /// Provider relevance plus fixed boosts for practice-area mention,
    /// recency, and jurisdiction affinity.
    fn boosted_score(&self, precedent: &CasePrecedent, ctx: &RankContext) -> (f64, Vec<String>) {
        let mut score = precedent.relevance_score;
        let mut factors = Vec::new();

        if let Some(area) = ctx.practice_area {
            if !area.is_empty()
                && precedent
                    .case_name
                    .to_lowercase()
                    .contains(&area.to_lowercase())
            {
                score += 10.0;
                factors.push(format!("Practice area match: {area}"));
            }
        }

        if precedent.decided_within_years(ctx.now, 5.0) {
            score += 5.0;
            factors.push("Recent decision (within 5 years)".to_string());
        }

        if let (Some(query_juris), Some(case_juris)) = (ctx.jurisdiction, &precedent.jurisdiction) {
            if jurisdictions_related(query_juris, case_juris) {
                score += 8.0;
                factors.push(format!("Jurisdiction affinity: {case_juris}"));
            }
        }

        (score, factors)
    }

    /// Composite 0–10 relevance of one precedent against a free-text case
    /// description, with the contributing factors spelled out.
    pub fn analyze_relevance(
        &self,
        precedent: &CasePrecedent,
        ctx: &RankContext,
        description: &str,
    ) -> RelevanceAnalysis {
        let mut score = 0.0;
        let mut factors = Vec::new();

        if let (Some(area), Some(case_area)) = (ctx.practice_area, &precedent.practice_area) {
            if area.eq_ignore_ascii_case(case_area) {
                score += 0.25;
                factors.push("Same practice area".to_string());
            }
        }

        if let (Some(query_juris), Some(case_juris)) = (ctx.jurisdiction, &precedent.jurisdiction) {
            if jurisdictions_related(query_juris, case_juris) {
                score += 0.20;
                factors.push("Related jurisdiction".to_string());
            }
        }

        if precedent.decided_within_years(ctx.now, 5.0) {
            score += 0.15;
            factors.push("Decided within the last 5 years".to_string());
        } else if precedent.decided_within_years(ctx.now, 10.0) {
            score += 0.10;
            factors.push("Decided within the last 10 years".to_string());
        }

        let provider = (precedent.relevance_score / 100.0).min(0.30);
        if provider > 0.0 {
            score += provider;
            factors.push("Search relevance".to_string());
        }

        if shared_significant_words(description, precedent.summary.as_deref().unwrap_or("")) > 2 {
            score += 0.10;
            factors.push("Overlapping case facts".to_string());
        }

        let score = (score * 10.0).min(10.0);
        let recommendation = if score >= 8.0 {
            "Highly relevant - Review immediately"
        } else if score >= 6.0 {
            "Relevant - Include in analysis"
        } else if score >= 4.0 {
            "Possibly relevant - Consider for context"
        } else {
            "Low relevance - Optional reference"
        };

        RelevanceAnalysis {
            score,
            factors,
            recommendation: recommendation.to_string(),
        }
    }

    /// Precedential weight on the 0–10 scale: court level, jurisdiction
    /// match, recency, and published status.
    pub fn precedent_strength(&self, precedent: &CasePrecedent, ctx: &RankContext) -> f64 {
        let mut strength: f64 = 5.0;

        strength += match precedent.court_level() {
            CourtLevel::Supreme => 3.0,
            CourtLevel::Appellate => 2.0,
            CourtLevel::District => 1.0,
            CourtLevel::Other => 0.0,
        };

        if let (Some(query_juris), Some(case_juris)) = (ctx.jurisdiction, &precedent.jurisdiction) {
            if query_juris.eq_ignore_ascii_case(case_juris) {
                strength += 2.0;
            }
        }

        if precedent.decided_within_years(ctx.now, 5.0) {
            strength += 1.0;
        }

        if precedent
            .precedent_value
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("published"))
        {
            strength += 1.0;
        }

        strength.min(10.0)
    }
}

/// Two jurisdictions relate when they match exactly, are both federal, or
/// one's name contains the other's.
fn jurisdictions_related(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a == b || (a.contains("federal") && b.contains("federal")) || a.contains(&b) || b.contains(&a)
}

/// Count distinct words longer than three characters appearing in both
/// texts.
fn shared_significant_words(a: &str, b: &str) -> usize {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let b_words: std::collections::HashSet<&str> = b_lower
        .split_whitespace()
        .filter(|w| w.len() > 3)
        .collect();

    let mut seen = std::collections::HashSet::new();
    a_lower
        .split_whitespace()
        .filter(|w| w.len() > 3 && b_words.contains(w))
        .filter(|w| seen.insert(*w))
        .count()
}
