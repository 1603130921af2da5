//! End-to-end pipeline tests with in-memory collaborators.

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use lexrisk_common::api::{AssessmentSink, BoxFuture, PrecedentSource};
use lexrisk_common::config::PipelineConfig;
use lexrisk_common::ids::DocumentId;
use lexrisk_common::types::{
    CasePrecedent, CaseStage, ClauseType, ConfidenceTier, DocumentMeta, DocumentRiskAssessment,
    Outcome, PrecedentQuery, PredictionResult, RiskedClause,
};
use lexrisk_common::{LexRiskError, Result};

use lexrisk_engine::analytics::CaseProfile;
use lexrisk_engine::pipeline::{AnalysisPipeline, PredictRequest};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

const CONTRACT: &str = "\
1. INDEMNIFICATION\n\
The Seller shall indemnify, defend and hold harmless the Buyer, as the \
indemnified party, from any and all claims, including unlimited indirect losses.\n\
\n\
2. LIMITATION OF LIABILITY\n\
In no event shall either party's aggregate liability exceed the fees paid, except \
that consequential damages are excluded with no limit on direct damages.\n\
\n\
3. GOVERNING LAW\n\
This agreement shall be governed by the laws of the State of Delaware, and the \
parties consent to the exclusive jurisdiction and venue of its courts.\n";

struct InMemorySource {
    precedents: Vec<CasePrecedent>,
    queries: Mutex<Vec<PrecedentQuery>>,
}

impl InMemorySource {
    fn new(precedents: Vec<CasePrecedent>) -> Self {
        Self {
            precedents,
            queries: Mutex::new(Vec::new()),
        }
    }
}

impl PrecedentSource for InMemorySource {
    fn search(&self, query: PrecedentQuery) -> BoxFuture<'_, Result<Vec<CasePrecedent>>> {
        self.queries.lock().unwrap().push(query);
        let results = self.precedents.clone();
        Box::pin(async move { Ok(results) })
    }
}

struct FailingSource;

impl PrecedentSource for FailingSource {
    fn search(&self, _query: PrecedentQuery) -> BoxFuture<'_, Result<Vec<CasePrecedent>>> {
        Box::pin(async { Err(LexRiskError::Search("provider down".into())) })
    }
}

#[derive(Default)]
struct RecordingSink {
    assessments: Mutex<Vec<DocumentRiskAssessment>>,
    clauses: Mutex<Vec<(DocumentId, Vec<RiskedClause>)>>,
    predictions: Mutex<Vec<PredictionResult>>,
    fail: bool,
}

impl AssessmentSink for RecordingSink {
    fn save_assessment(&self, assessment: DocumentRiskAssessment) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            if self.fail {
                return Err(LexRiskError::Persistence("sink down".into()));
            }
            self.assessments.lock().unwrap().push(assessment);
            Ok(())
        })
    }

    fn save_clauses(
        &self,
        document_id: DocumentId,
        clauses: Vec<RiskedClause>,
    ) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            if self.fail {
                return Err(LexRiskError::Persistence("sink down".into()));
            }
            self.clauses.lock().unwrap().push((document_id, clauses));
            Ok(())
        })
    }

    fn save_prediction(&self, prediction: PredictionResult) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            if self.fail {
                return Err(LexRiskError::Persistence("sink down".into()));
            }
            self.predictions.lock().unwrap().push(prediction);
            Ok(())
        })
    }
}

fn precedent(name: &str, outcome: Outcome, settlement: Option<f64>) -> CasePrecedent {
    CasePrecedent {
        case_id: name.into(),
        case_name: name.into(),
        citation: "1 F.3d 1".into(),
        court: "Court of Appeals".into(),
        jurisdiction: Some("delaware".into()),
        decision_date: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
        filing_date: Some(Utc.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap()),
        outcome,
        settlement_amount: settlement,
        practice_area: Some("corporate".into()),
        case_type: None,
        relevance_score: 3.0,
        precedent_value: Some("Published".into()),
        summary: None,
        url: None,
    }
}

fn config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.extraction.min_confidence = 0.3;
    config.search.timeout_ms = 500;
    config
}

fn meta() -> DocumentMeta {
    DocumentMeta {
        id: DocumentId::new(),
        practice_area: Some("corporate".into()),
        jurisdiction: Some("delaware".into()),
        case_type: None,
    }
}

#[tokio::test]
async fn full_analysis_produces_scored_clauses_and_precedents() {
    init_tracing();
    let source = Arc::new(InMemorySource::new(vec![
        precedent("Alpha v. Beta", Outcome::Settlement, Some(200_000.0)),
        precedent("Gamma v. Delta", Outcome::PlaintiffWin, None),
    ]));
    let sink = Arc::new(RecordingSink::default());
    let pipeline = AnalysisPipeline::new(config(), Some(source.clone()), Some(sink.clone()));

    let assessment = pipeline.analyze_document(&meta(), CONTRACT).await;

    assert_eq!(assessment.clause_count, 3);
    assert!(assessment
        .clauses
        .iter()
        .any(|c| c.clause.clause_type == ClauseType::Indemnification));
    assert!(assessment.high_risk_count >= 1);
    assert!(assessment.overall_score > 0.0 && assessment.overall_score <= 10.0);
    assert!(!assessment.supporting_precedents.is_empty());
    assert!(!assessment.recommendations.is_empty());

    // One precedent search, keyed on the elevated clause types.
    let queries = source.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert!(queries[0].query.contains("indemnification"));
    assert_eq!(queries[0].practice_area.as_deref(), Some("corporate"));

    // Persistence recorded both products.
    assert_eq!(sink.assessments.lock().unwrap().len(), 1);
    assert_eq!(sink.clauses.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn histogram_counts_sum_to_clause_count() {
    let pipeline = AnalysisPipeline::new(config(), None, None);
    let assessment = pipeline.analyze_document(&meta(), CONTRACT).await;

    let histogram = assessment.level_histogram();
    assert_eq!(histogram.values().sum::<usize>(), assessment.clause_count);
}

#[tokio::test]
async fn empty_document_is_an_empty_result_not_an_error() {
    let pipeline = AnalysisPipeline::new(config(), None, None);
    let assessment = pipeline.analyze_document(&meta(), "").await;

    assert_eq!(assessment.clause_count, 0);
    assert_eq!(assessment.overall_score, 0.0);
    assert!(assessment.clauses.is_empty());
    assert!(assessment.recommendations.is_empty());
}

#[tokio::test]
async fn analysis_is_deterministic_across_calls() {
    let pipeline = AnalysisPipeline::new(config(), None, None);
    let first = pipeline.analyze_document(&meta(), CONTRACT).await;
    let second = pipeline.analyze_document(&meta(), CONTRACT).await;

    assert_eq!(first.clause_count, second.clause_count);
    assert_eq!(first.high_risk_count, second.high_risk_count);
    assert!((first.overall_score - second.overall_score).abs() < 1e-12);
    for (a, b) in first.clauses.iter().zip(&second.clauses) {
        assert_eq!(a.clause.clause_type, b.clause.clause_type);
        assert_eq!(a.clause.start, b.clause.start);
        assert!((a.risk_score - b.risk_score).abs() < 1e-12);
    }
}

#[tokio::test]
async fn search_failure_degrades_instead_of_failing() {
    init_tracing();
    let pipeline = AnalysisPipeline::new(config(), Some(Arc::new(FailingSource)), None);
    let assessment = pipeline.analyze_document(&meta(), CONTRACT).await;

    assert_eq!(assessment.clause_count, 3);
    assert!(assessment.supporting_precedents.is_empty());
    assert!(assessment.overall_score > 0.0);
}

#[tokio::test]
async fn sink_failure_still_returns_the_result() {
    let sink = Arc::new(RecordingSink {
        fail: true,
        ..Default::default()
    });
    let pipeline = AnalysisPipeline::new(config(), None, Some(sink.clone()));
    let assessment = pipeline.analyze_document(&meta(), CONTRACT).await;

    assert_eq!(assessment.clause_count, 3);
    assert!(sink.assessments.lock().unwrap().is_empty());
}

#[tokio::test]
async fn prediction_combines_outcome_settlement_and_timeline() {
    let mut precedents: Vec<CasePrecedent> = (0..6)
        .map(|i| {
            precedent(
                &format!("Settle {i}"),
                Outcome::Settlement,
                Some(100_000.0 + 50_000.0 * i as f64),
            )
        })
        .collect();
    precedents.extend((0..2).map(|i| precedent(&format!("P {i}"), Outcome::PlaintiffWin, None)));
    precedents.extend((0..2).map(|i| precedent(&format!("D {i}"), Outcome::DefendantWin, None)));

    let sink = Arc::new(RecordingSink::default());
    let pipeline = AnalysisPipeline::new(
        config(),
        Some(Arc::new(InMemorySource::new(precedents))),
        Some(sink.clone()),
    );

    let result = pipeline
        .predict(PredictRequest {
            profile: CaseProfile {
                practice_area: "corporate".into(),
                case_type: None,
                jurisdiction: Some("delaware".into()),
            },
            risk_score: None,
            claim_amount: None,
            stage: Some(CaseStage::Trial),
        })
        .await
        .unwrap();

    let probs = result.outcome.probabilities;
    assert!((probs.settlement - 0.6).abs() < 1e-9);
    assert!((probs.plaintiff_victory - 0.2).abs() < 1e-9);
    assert!((probs.defendant_victory - 0.2).abs() < 1e-9);
    assert!((probs.sum() - 1.0).abs() < 1e-6);

    let settlement = result.settlement.as_ref().unwrap();
    assert_eq!(settlement.based_on_cases, 6);
    assert!(settlement.range.is_some());

    let timeline = result.timeline.as_ref().unwrap();
    assert!(!timeline.default_estimate);
    // Trial stage keeps 20% of the historical median.
    assert!((timeline.days.expected - 365.0 * 0.2).abs() < 1.0);

    assert_eq!(sink.predictions.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn prediction_without_precedent_data_is_explicitly_low_confidence() {
    let pipeline = AnalysisPipeline::new(
        config(),
        Some(Arc::new(InMemorySource::new(Vec::new()))),
        None,
    );

    let result = pipeline
        .predict(PredictRequest {
            profile: CaseProfile {
                practice_area: "employment".into(),
                case_type: None,
                jurisdiction: None,
            },
            risk_score: None,
            claim_amount: None,
            stage: None,
        })
        .await
        .unwrap();

    assert_eq!(result.outcome.based_on_cases, 0);
    assert!((result.outcome.probabilities.sum() - 1.0).abs() < 1e-6);

    let settlement = result.settlement.as_ref().unwrap();
    assert!(settlement.range.is_none());
    assert_eq!(settlement.confidence, ConfidenceTier::Low);
    assert!(result.timeline.is_none());
}

#[tokio::test]
async fn prediction_requires_a_source() {
    let pipeline = AnalysisPipeline::new(config(), None, None);
    let err = pipeline.predict(PredictRequest::default()).await.unwrap_err();
    assert!(matches!(err, LexRiskError::Config(_)));
}
