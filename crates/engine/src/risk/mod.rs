//! Clause and document risk scoring.
//!
//! Scores are confidence-weighted so a tentative classification cannot
//! dominate an assessment. Precedent lookups are strictly best-effort:
//! any search failure or timeout degrades to an assessment without
//! supporting precedents.

pub mod recommendations;
mod weights;

pub use recommendations::build_recommendations;
pub use weights::base_weight;

use std::time::Duration;

use chrono::{DateTime, Utc};

use lexrisk_common::api::PrecedentSource;
use lexrisk_common::config::{RiskConfig, SearchConfig};
use lexrisk_common::ids::AssessmentId;
use lexrisk_common::types::{
    DocumentMeta, DocumentRiskAssessment, ExtractedClause, PrecedentQuery, RankedPrecedent,
    RiskLevel, RiskedClause,
};

use crate::ranker::{PrecedentRanker, RankContext};

/// Per-indicator increment on top of the base weight.
const INDICATOR_INCREMENT: f64 = 0.5;

pub struct RiskScorer {
    risk: RiskConfig,
    search: SearchConfig,
    ranker: PrecedentRanker,
}

impl RiskScorer {
    pub fn new(risk: RiskConfig, search: SearchConfig) -> Self {
        Self {
            risk,
            search,
            ranker: PrecedentRanker::new(),
        }
    }

    /// Score a single clause: base weight plus 0.5 per risk indicator,
    /// capped at 10, then scaled by classification confidence.
    pub fn score_clause(&self, clause: ExtractedClause) -> RiskedClause {
        let base_risk = base_weight(clause.clause_type);
        let adjusted =
            (base_risk + INDICATOR_INCREMENT * clause.risk_indicators.len() as f64).min(10.0);
        let risk_score = adjusted * clause.confidence;

        RiskedClause {
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            base_risk,
            clause,
        }
    }

    /// Aggregate clause scores into a document assessment.
    ///
    /// The overall score is the mean clause score plus a boost per
    /// high/critical clause, capped by configuration and clamped to 10.
    /// A document with no clauses scores 0 with no recommendations.
    pub async fn assess_document(
        &self,
        meta: &DocumentMeta,
        clauses: Vec<ExtractedClause>,
        source: Option<&dyn PrecedentSource>,
        now: DateTime<Utc>,
    ) -> DocumentRiskAssessment {
        let risked: Vec<RiskedClause> = clauses
            .into_iter()
            .map(|clause| self.score_clause(clause))
            .collect();

        let clause_count = risked.len();
        let high_risk_count = risked.iter().filter(|c| c.risk_level.is_elevated()).count();

        let overall_score = if risked.is_empty() {
            0.0
        } else {
            let mean = risked.iter().map(|c| c.risk_score).sum::<f64>() / clause_count as f64;
            let boost = (self.risk.boost_per_high_risk_clause * high_risk_count as f64)
                .min(self.risk.max_boost);
            (mean + boost).min(10.0)
        };
        let overall_level = RiskLevel::from_score(overall_score);

        let supporting_precedents = match source {
            Some(source) if high_risk_count > 0 => {
                self.find_supporting_precedents(meta, &risked, source, now)
                    .await
            }
            _ => Vec::new(),
        };

        let recommendations = build_recommendations(&risked, high_risk_count);

        metrics::counter!("risk.assessments").increment(1);
        tracing::info!(
            document_id = %meta.id,
            overall_score,
            clause_count,
            high_risk_count,
            precedents = supporting_precedents.len(),
            "Document risk assessment complete"
        );

        DocumentRiskAssessment {
            id: AssessmentId::new(),
            document_id: meta.id,
            overall_score,
            overall_level,
            clauses: risked,
            clause_count,
            high_risk_count,
            recommendations,
            supporting_precedents,
            analyzed_at: now,
        }
    }

    /// One precedent search per assessment, keyed on the distinct elevated
    /// clause types. Failures and timeouts degrade to an empty list.
    async fn find_supporting_precedents(
        &self,
        meta: &DocumentMeta,
        risked: &[RiskedClause],
        source: &dyn PrecedentSource,
        now: DateTime<Utc>,
    ) -> Vec<RankedPrecedent> {
        let mut terms: Vec<&str> = Vec::new();
        for clause in risked.iter().filter(|c| c.risk_level.is_elevated()) {
            let name = clause.clause.clause_type.as_str();
            if !terms.contains(&name) {
                terms.push(name);
            }
        }

        let query = PrecedentQuery {
            query: terms.join(" "),
            practice_area: meta.practice_area.clone(),
            jurisdiction: meta.jurisdiction.clone(),
            limit: self.search.result_limit,
            ..Default::default()
        };

        let timeout = Duration::from_millis(self.search.timeout_ms);
        let precedents = match tokio::time::timeout(timeout, source.search(query)).await {
            Ok(Ok(precedents)) => precedents,
            Ok(Err(err)) => {
                metrics::counter!("risk.precedent_search_failures").increment(1);
                tracing::warn!(
                    document_id = %meta.id,
                    error = %err,
                    "Precedent search failed; continuing without precedents"
                );
                return Vec::new();
            }
            Err(_) => {
                metrics::counter!("risk.precedent_search_timeouts").increment(1);
                tracing::warn!(
                    document_id = %meta.id,
                    timeout_ms = self.search.timeout_ms,
                    "Precedent search timed out; continuing without precedents"
                );
                return Vec::new();
            }
        };

        let ctx = RankContext {
            practice_area: meta.practice_area.as_deref(),
            jurisdiction: meta.jurisdiction.as_deref(),
            now,
        };
        let mut ranked = self.ranker.rank(precedents, &ctx);
        ranked.truncate(self.risk.max_supporting_precedents);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexrisk_common::api::BoxFuture;
    use lexrisk_common::types::{CasePrecedent, ClauseType, Outcome};
    use lexrisk_common::{LexRiskError, Result};

    fn scorer() -> RiskScorer {
        RiskScorer::new(
            RiskConfig {
                boost_per_high_risk_clause: 0.5,
                max_boost: 3.0,
                max_supporting_precedents: 5,
            },
            SearchConfig {
                result_limit: 20,
                population_limit: 50,
                timeout_ms: 200,
            },
        )
    }

    fn clause(clause_type: ClauseType, confidence: f64, indicators: &[&str]) -> ExtractedClause {
        ExtractedClause {
            clause_type,
            text: "x".repeat(60),
            start: 0,
            end: 60,
            section_number: None,
            section_title: None,
            confidence,
            keywords_matched: Vec::new(),
            risk_indicators: indicators.iter().map(|s| s.to_string()).collect(),
        }
    }

    struct FailingSource;

    impl PrecedentSource for FailingSource {
        fn search(&self, _query: PrecedentQuery) -> BoxFuture<'_, Result<Vec<CasePrecedent>>> {
            Box::pin(async { Err(LexRiskError::Search("provider unavailable".into())) })
        }
    }

    struct StubSource(Vec<CasePrecedent>);

    impl PrecedentSource for StubSource {
        fn search(&self, _query: PrecedentQuery) -> BoxFuture<'_, Result<Vec<CasePrecedent>>> {
            let results = self.0.clone();
            Box::pin(async move { Ok(results) })
        }
    }

    fn precedent(case_id: &str) -> CasePrecedent {
        CasePrecedent {
            case_id: case_id.into(),
            case_name: format!("Case {case_id} v. Other"),
            citation: "1 F.3d 1".into(),
            court: "Ninth Circuit".into(),
            jurisdiction: Some("federal".into()),
            decision_date: None,
            filing_date: None,
            outcome: Outcome::Unknown,
            settlement_amount: None,
            practice_area: None,
            case_type: None,
            relevance_score: 1.0,
            precedent_value: None,
            summary: None,
            url: None,
        }
    }

    #[test]
    fn clause_score_is_confidence_weighted() {
        let scored = scorer().score_clause(clause(ClauseType::Indemnification, 0.5, &["unlimited"]));
        // (8.5 + 0.5) * 0.5
        assert!((scored.risk_score - 4.5).abs() < 1e-9);
        assert_eq!(scored.risk_level, RiskLevel::Medium);
        assert!((scored.base_risk - 8.5).abs() < 1e-9);
    }

    #[test]
    fn indicator_adjustment_caps_at_ten() {
        let indicators: Vec<&str> = vec!["a"; 10];
        let scored = scorer().score_clause(clause(ClauseType::Indemnification, 1.0, &indicators));
        assert!((scored.risk_score - 10.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_document_scores_zero() {
        let assessment = scorer()
            .assess_document(&DocumentMeta::default(), Vec::new(), None, Utc::now())
            .await;
        assert_eq!(assessment.clause_count, 0);
        assert_eq!(assessment.overall_score, 0.0);
        assert_eq!(assessment.overall_level, RiskLevel::Minimal);
        assert!(assessment.recommendations.is_empty());
        assert!(assessment.supporting_precedents.is_empty());
    }

    #[tokio::test]
    async fn high_risk_boost_is_capped() {
        let clauses: Vec<ExtractedClause> = (0..10)
            .map(|_| clause(ClauseType::Indemnification, 1.0, &[]))
            .collect();
        let assessment = scorer()
            .assess_document(&DocumentMeta::default(), clauses, None, Utc::now())
            .await;
        // mean 8.5 + boost capped at 3.0, clamped to 10.
        assert!((assessment.overall_score - 10.0).abs() < 1e-9);
        assert_eq!(assessment.high_risk_count, 10);
    }

    #[tokio::test]
    async fn search_failure_degrades_to_no_precedents() {
        let clauses = vec![clause(ClauseType::Indemnification, 1.0, &[])];
        let assessment = scorer()
            .assess_document(
                &DocumentMeta::default(),
                clauses,
                Some(&FailingSource),
                Utc::now(),
            )
            .await;
        assert!(assessment.supporting_precedents.is_empty());
        assert_eq!(assessment.clause_count, 1);
        assert!(assessment.overall_score > 0.0);
    }

    #[tokio::test]
    async fn supporting_precedents_are_capped_and_ranked() {
        let source = StubSource((0..8).map(|i| precedent(&i.to_string())).collect());
        let clauses = vec![clause(ClauseType::Indemnification, 1.0, &[])];
        let assessment = scorer()
            .assess_document(&DocumentMeta::default(), clauses, Some(&source), Utc::now())
            .await;
        assert_eq!(assessment.supporting_precedents.len(), 5);
        for (i, ranked) in assessment.supporting_precedents.iter().enumerate() {
            assert_eq!(ranked.rank, i + 1);
        }
    }

    #[tokio::test]
    async fn no_search_without_elevated_clauses() {
        // A source that panics if called would fail the test; the stub
        // returning results must stay unused for low-risk documents.
        struct PanicSource;
        impl PrecedentSource for PanicSource {
            fn search(&self, _query: PrecedentQuery) -> BoxFuture<'_, Result<Vec<CasePrecedent>>> {
                panic!("search must not run for documents without elevated clauses");
            }
        }

        let clauses = vec![clause(ClauseType::Severability, 1.0, &[])];
        let assessment = scorer()
            .assess_document(
                &DocumentMeta::default(),
                clauses,
                Some(&PanicSource),
                Utc::now(),
            )
            .await;
        assert!(assessment.supporting_precedents.is_empty());
    }
}
