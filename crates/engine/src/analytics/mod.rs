//! Statistical predictions over a historical precedent population:
//! outcome probabilities, settlement ranges, timelines, and case strength.
//!
//! Every estimate is grounded in the fetched population or an explicit
//! documented default. A filter that matches nothing produces an explicit
//! low-confidence result, never a fabricated number presented as real.

mod stats;

pub use stats::{mean, percentile, std_dev};

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use lexrisk_common::api::PrecedentSource;
use lexrisk_common::config::SearchConfig;
use lexrisk_common::types::{
    CasePrecedent, CaseStage, CaseStrength, ConfidenceTier, Milestone, Outcome,
    OutcomePrediction, OutcomeProbabilities, Perspective, PrecedentQuery, SettlementEstimate,
    SettlementRange, SettlementStats, StrengthCategory, TimelineEstimate, TimelineFigures,
};

/// Filter criteria describing the case a prediction is for.
#[derive(Clone, Debug, Default)]
pub struct CaseProfile {
    pub practice_area: String,
    pub case_type: Option<String>,
    pub jurisdiction: Option<String>,
}

/// Fixed timeline defaults in days, used only when the population carries
/// no usable filing/decision date pairs.
fn default_timeline_days(practice_area: &str) -> f64 {
    match practice_area.to_lowercase().as_str() {
        "personal_injury" => 365.0,
        "corporate" => 540.0,
        "employment" => 270.0,
        "real_estate" => 180.0,
        "intellectual_property" => 450.0,
        _ => 365.0,
    }
}

pub struct PredictiveAnalytics {
    source: Arc<dyn PrecedentSource>,
    search: SearchConfig,
}

impl PredictiveAnalytics {
    pub fn new(source: Arc<dyn PrecedentSource>, search: SearchConfig) -> Self {
        Self { source, search }
    }

    /// Fetch the precedent population for a profile. Source failures and
    /// timeouts degrade to an empty population.
    async fn fetch_population(&self, profile: &CaseProfile) -> Vec<CasePrecedent> {
        let query = PrecedentQuery {
            query: profile.practice_area.clone(),
            practice_area: Some(profile.practice_area.clone()),
            jurisdiction: profile.jurisdiction.clone(),
            case_type: profile.case_type.clone(),
            limit: self.search.population_limit,
            ..Default::default()
        };

        let timeout = Duration::from_millis(self.search.timeout_ms);
        let population = match tokio::time::timeout(timeout, self.source.search(query)).await {
            Ok(Ok(population)) => population,
            Ok(Err(err)) => {
                metrics::counter!("analytics.population_fetch_failures").increment(1);
                tracing::warn!(
                    practice_area = %profile.practice_area,
                    error = %err,
                    "Precedent population fetch failed; predicting from empty population"
                );
                return Vec::new();
            }
            Err(_) => {
                metrics::counter!("analytics.population_fetch_timeouts").increment(1);
                tracing::warn!(
                    practice_area = %profile.practice_area,
                    timeout_ms = self.search.timeout_ms,
                    "Precedent population fetch timed out; predicting from empty population"
                );
                return Vec::new();
            }
        };

        // The provider already saw the filters; re-apply them locally only
        // where the record carries the field, so sparse provider data does
        // not empty the population.
        population
            .into_iter()
            .filter(|p| match (&profile.case_type, &p.case_type) {
                (Some(wanted), Some(actual)) => wanted.eq_ignore_ascii_case(actual),
                _ => true,
            })
            .collect()
    }

    /// Outcome probabilities from historical outcome frequencies,
    /// optionally shifted by a document risk score.
    pub async fn predict_outcome(
        &self,
        profile: &CaseProfile,
        risk_score: Option<f64>,
    ) -> OutcomePrediction {
        let population = self.fetch_population(profile).await;
        self.predict_outcome_from(profile, &population, risk_score)
    }

    /// Pure core of `predict_outcome`, computed over an already-fetched
    /// population.
    pub fn predict_outcome_from(
        &self,
        profile: &CaseProfile,
        population: &[CasePrecedent],
        risk_score: Option<f64>,
    ) -> OutcomePrediction {
        // Records without a recorded outcome carry no frequency signal;
        // they stay out of the denominator so the distribution still sums
        // to one.
        let classified = population
            .iter()
            .filter(|p| p.outcome != Outcome::Unknown)
            .count();

        let mut probabilities = if classified == 0 {
            OutcomeProbabilities::uniform_default()
        } else {
            let total = classified as f64;
            let count = |outcome: Outcome| {
                population.iter().filter(|p| p.outcome == outcome).count() as f64 / total
            };
            OutcomeProbabilities {
                plaintiff_victory: count(Outcome::PlaintiffWin),
                defendant_victory: count(Outcome::DefendantWin),
                settlement: count(Outcome::Settlement),
                dismissed: count(Outcome::Dismissed),
            }
        };

        if let Some(risk) = risk_score {
            apply_risk_shift(&mut probabilities, risk);
        }

        let confidence = self.confidence(population, risk_score.is_some(), profile);
        let based_on_cases = population.len();

        let mut key_factors = vec![format!("Analysis based on {based_on_cases} historical cases")];
        if let Some(jurisdiction) = &profile.jurisdiction {
            key_factors.push(format!("Jurisdiction: {jurisdiction}"));
        }
        if let Some(risk) = risk_score {
            let direction = if risk > 5.0 {
                "increases settlement likelihood"
            } else {
                "favors the plaintiff position"
            };
            key_factors.push(format!("Document risk score {risk:.1} {direction}"));
        }

        let (dominant, p) = probabilities.dominant();
        let recommendation = match dominant {
            Outcome::Settlement if p >= 0.5 => {
                "Settlement is the most likely outcome; consider early settlement negotiations"
            }
            Outcome::PlaintiffWin if p >= 0.5 => "Historical outcomes favor the plaintiff position",
            Outcome::DefendantWin if p >= 0.5 => "Historical outcomes favor the defendant position",
            Outcome::Dismissed if p >= 0.5 => {
                "High dismissal rate in comparable cases; review procedural posture"
            }
            _ => "No dominant outcome in comparable cases; prepare for multiple scenarios",
        };

        OutcomePrediction {
            probabilities,
            confidence,
            based_on_cases,
            key_factors,
            recommendation: recommendation.to_string(),
        }
    }

    /// Settlement range from the positive settlement amounts in the
    /// population, optionally rescaled to a claim amount.
    pub async fn estimate_settlement(
        &self,
        profile: &CaseProfile,
        claim_amount: Option<f64>,
    ) -> SettlementEstimate {
        let population = self.fetch_population(profile).await;
        estimate_settlement_from(&population, claim_amount)
    }

    /// Timeline to resolution from historical filing-to-decision day
    /// deltas, falling back to the practice-area default table.
    pub async fn predict_timeline(
        &self,
        profile: &CaseProfile,
        stage: CaseStage,
        now: DateTime<Utc>,
    ) -> TimelineEstimate {
        let population = self.fetch_population(profile).await;
        predict_timeline_from(&population, &profile.practice_area, stage, now)
    }

    /// Case strength from one side's perspective, derived from the outcome
    /// prediction and an optional document risk score.
    pub async fn assess_case_strength(
        &self,
        profile: &CaseProfile,
        perspective: Perspective,
        risk_score: Option<f64>,
    ) -> CaseStrength {
        let population = self.fetch_population(profile).await;
        let prediction = self.predict_outcome_from(profile, &population, risk_score);

        let favorable = match perspective {
            Perspective::Plaintiff => prediction.probabilities.plaintiff_victory,
            Perspective::Defendant => prediction.probabilities.defendant_victory,
        };

        let mut score = favorable * 10.0;
        if let Some(risk) = risk_score {
            // Same dampening direction as the outcome shift: riskier
            // documents weaken the position.
            score *= 0.7 + 0.3 * (10.0 - risk.clamp(0.0, 10.0)) / 10.0;
        }
        let score = score.clamp(0.0, 10.0);

        let mut strengths = Vec::new();
        let mut weaknesses = Vec::new();

        if favorable > 0.5 {
            strengths.push("Historical outcomes favor this position".to_string());
        } else if favorable < 0.3 {
            weaknesses.push("Historical outcomes disfavor this position".to_string());
        }
        if let Some(risk) = risk_score {
            if risk < 4.0 {
                strengths.push("Low document risk profile".to_string());
            } else if risk > 7.0 {
                weaknesses.push("High document risk profile".to_string());
            }
        }
        if prediction.based_on_cases < 10 {
            weaknesses.push("Limited historical data for this case profile".to_string());
        }
        if prediction.probabilities.settlement > 0.5 {
            strengths.push("High settlement rate in comparable cases".to_string());
        }

        let recommendation = if score >= 7.5 {
            "Strong position - favorable for an assertive strategy"
        } else if score >= 5.5 {
            "Moderate position - proceed with standard strategy"
        } else if score >= 3.5 {
            "Weak position - consider settlement options"
        } else {
            "Very weak position - strongly consider settlement or alternative resolution"
        };

        CaseStrength {
            score,
            category: StrengthCategory::from_score(score),
            perspective,
            strengths,
            weaknesses,
            key_factors: prediction.key_factors,
            recommendation: recommendation.to_string(),
            confidence: prediction.confidence,
        }
    }

    /// Prediction confidence on the 0–10 scale: sample size, presence of a
    /// risk assessment, and how often the population's jurisdiction matches
    /// the profile's.
    fn confidence(
        &self,
        population: &[CasePrecedent],
        has_risk: bool,
        profile: &CaseProfile,
    ) -> f64 {
        let sample_factor = (population.len() as f64 / 50.0).min(1.0);

        let jurisdiction_match_rate = match &profile.jurisdiction {
            Some(wanted) if !population.is_empty() => {
                let matched = population
                    .iter()
                    .filter(|p| {
                        p.jurisdiction
                            .as_deref()
                            .is_some_and(|j| j.eq_ignore_ascii_case(wanted))
                    })
                    .count();
                matched as f64 / population.len() as f64
            }
            _ => 0.5,
        };

        let risk_factor = if has_risk { 1.0 } else { 0.0 };
        ((sample_factor * 0.5 + 0.2 * risk_factor + 0.3 * jurisdiction_match_rate) * 10.0)
            .min(10.0)
    }
}

/// Linear shift of probability mass by document risk. High risk moves mass
/// toward settlement and defendant victory; low risk moves it toward the
/// plaintiff. Values clamp at zero before renormalizing.
fn apply_risk_shift(probabilities: &mut OutcomeProbabilities, risk_score: f64) {
    let risk_factor = (risk_score.clamp(0.0, 10.0) - 5.0) / 10.0;

    if risk_factor > 0.0 {
        probabilities.settlement += risk_factor * 0.10;
        probabilities.defendant_victory += risk_factor * 0.05;
        probabilities.plaintiff_victory -= risk_factor * 0.15;
    } else if risk_factor < 0.0 {
        let magnitude = -risk_factor;
        probabilities.plaintiff_victory += magnitude * 0.10;
        probabilities.defendant_victory -= magnitude * 0.05;
        probabilities.settlement -= magnitude * 0.05;
    }

    probabilities.plaintiff_victory = probabilities.plaintiff_victory.max(0.0);
    probabilities.defendant_victory = probabilities.defendant_victory.max(0.0);
    probabilities.settlement = probabilities.settlement.max(0.0);
    probabilities.dismissed = probabilities.dismissed.max(0.0);
    probabilities.normalize();
}

/// Pure settlement estimation over an already-fetched population.
pub fn estimate_settlement_from(
    population: &[CasePrecedent],
    claim_amount: Option<f64>,
) -> SettlementEstimate {
    let mut amounts: Vec<f64> = population
        .iter()
        .filter_map(|p| p.settlement_amount)
        .filter(|a| *a > 0.0)
        .collect();

    if amounts.is_empty() {
        return SettlementEstimate {
            range: None,
            statistics: None,
            confidence: ConfidenceTier::Low,
            based_on_cases: 0,
            recommendation: "No settlement data available for comparable cases; obtain a \
                             case-specific valuation"
                .to_string(),
        };
    }

    amounts.sort_by(|a, b| a.total_cmp(b));

    let mut statistics = SettlementStats {
        min: amounts[0],
        p10: percentile(&amounts, 0.10),
        p25: percentile(&amounts, 0.25),
        median: percentile(&amounts, 0.50),
        p75: percentile(&amounts, 0.75),
        p90: percentile(&amounts, 0.90),
        max: amounts[amounts.len() - 1],
        mean: mean(&amounts),
        std_dev: std_dev(&amounts),
    };

    // Historical settlements average 55% of claim value; rescale all
    // statistics proportionally to the supplied claim.
    if let Some(claim) = claim_amount {
        if claim > 0.0 && statistics.median > 0.0 {
            let ratio = claim / (statistics.median / 0.55);
            statistics.min *= ratio;
            statistics.p10 *= ratio;
            statistics.p25 *= ratio;
            statistics.median *= ratio;
            statistics.p75 *= ratio;
            statistics.p90 *= ratio;
            statistics.max *= ratio;
            statistics.mean *= ratio;
            statistics.std_dev *= ratio;
        }
    }

    let range = SettlementRange {
        low: statistics.p25,
        expected: statistics.median,
        high: statistics.p75,
    };
    let recommendation = format!(
        "Expected settlement near ${:.0}, with a typical range of ${:.0} to ${:.0}",
        range.expected, range.low, range.high
    );

    SettlementEstimate {
        confidence: ConfidenceTier::from_sample_count(amounts.len()),
        based_on_cases: amounts.len(),
        range: Some(range),
        statistics: Some(statistics),
        recommendation,
    }
}

/// Pure timeline estimation over an already-fetched population.
pub fn predict_timeline_from(
    population: &[CasePrecedent],
    practice_area: &str,
    stage: CaseStage,
    now: DateTime<Utc>,
) -> TimelineEstimate {
    let mut deltas: Vec<f64> = population
        .iter()
        .filter_map(|p| match (p.filing_date, p.decision_date) {
            (Some(filed), Some(decided)) => {
                let days = (decided - filed).num_days();
                (days > 0).then_some(days as f64)
            }
            _ => None,
        })
        .collect();

    let (optimistic, expected, pessimistic, based_on_cases, default_estimate) = if deltas.is_empty()
    {
        let base = default_timeline_days(practice_area);
        (base * 0.7, base, base * 1.3, 0, true)
    } else {
        deltas.sort_by(|a, b| a.total_cmp(b));
        (
            percentile(&deltas, 0.25),
            percentile(&deltas, 0.50),
            percentile(&deltas, 0.75),
            deltas.len(),
            false,
        )
    };

    let fraction = stage.remaining_fraction();
    let days = TimelineFigures {
        optimistic: optimistic * fraction,
        expected: expected * fraction,
        pessimistic: pessimistic * fraction,
    };
    let months = TimelineFigures {
        optimistic: days.optimistic / 30.0,
        expected: days.expected / 30.0,
        pessimistic: days.pessimistic / 30.0,
    };

    let milestone_fractions: [(&str, f64); 4] = [
        ("Discovery Completion", 0.40),
        ("Pre-Trial Motions", 0.60),
        ("Mediation/Settlement Conference", 0.75),
        ("Trial/Resolution", 1.00),
    ];
    let today = now.date_naive();
    let milestones = milestone_fractions
        .iter()
        .map(|(name, frac)| {
            let days_from_now = (days.expected * frac).round() as i64;
            Milestone {
                name: name.to_string(),
                days_from_now,
                estimated_date: today + chrono::Duration::days(days_from_now),
            }
        })
        .collect();

    TimelineEstimate {
        days,
        months,
        based_on_cases,
        default_estimate,
        milestones,
    }
}
