//! Document analysis pipeline: extraction, risk scoring, precedent
//! support, predictions, and fire-and-forget persistence.

use std::sync::Arc;

use chrono::Utc;

use lexrisk_common::api::{AssessmentSink, PrecedentSource};
use lexrisk_common::config::PipelineConfig;
use lexrisk_common::ids::PredictionId;
use lexrisk_common::types::{
    CaseStage, DocumentMeta, DocumentRiskAssessment, PredictionResult,
};
use lexrisk_common::{LexRiskError, Result};

use crate::analytics::{CaseProfile, PredictiveAnalytics};
use crate::extraction::ClauseExtractor;
use crate::risk::RiskScorer;

/// Parameters for a prediction run.
#[derive(Clone, Debug, Default)]
pub struct PredictRequest {
    pub profile: CaseProfile,
    /// Document risk score applied as a probability shift, if an
    /// assessment exists.
    pub risk_score: Option<f64>,
    /// Claim amount for settlement rescaling.
    pub claim_amount: Option<f64>,
    /// Current litigation stage; omitted means no timeline estimate.
    pub stage: Option<CaseStage>,
}

/// The analysis entry point the surrounding system calls into.
///
/// Extraction and scoring are pure and synchronous; precedent lookups are
/// the only suspension points. Persistence is best-effort and never blocks
/// a result from being returned.
pub struct AnalysisPipeline {
    config: PipelineConfig,
    extractor: ClauseExtractor,
    scorer: RiskScorer,
    source: Option<Arc<dyn PrecedentSource>>,
    sink: Option<Arc<dyn AssessmentSink>>,
}

impl AnalysisPipeline {
    pub fn new(
        config: PipelineConfig,
        source: Option<Arc<dyn PrecedentSource>>,
        sink: Option<Arc<dyn AssessmentSink>>,
    ) -> Self {
        let extractor = ClauseExtractor::new(config.extraction.clone());
        let scorer = RiskScorer::new(config.risk.clone(), config.search.clone());
        Self {
            config,
            extractor,
            scorer,
            source,
            sink,
        }
    }

    /// Full document analysis: extract clauses, score them, attach
    /// supporting precedents, and persist the result.
    ///
    /// Analysis is at-most-once per call; re-analysis supersedes rather
    /// than mutates earlier assessments.
    pub async fn analyze_document(
        &self,
        meta: &DocumentMeta,
        text: &str,
    ) -> DocumentRiskAssessment {
        let clauses = self
            .extractor
            .extract_clauses(text, self.config.extraction.min_confidence);

        let assessment = self
            .scorer
            .assess_document(meta, clauses, self.source.as_deref(), Utc::now())
            .await;

        if let Some(sink) = &self.sink {
            self.persist_assessment(sink.as_ref(), &assessment).await;
        }

        metrics::counter!("pipeline.documents_analyzed").increment(1);
        assessment
    }

    /// Statistical predictions for a case profile. Outcome, settlement,
    /// and timeline estimates run concurrently against the same source.
    pub async fn predict(&self, request: PredictRequest) -> Result<PredictionResult> {
        let source = self.source.clone().ok_or_else(|| {
            LexRiskError::Config("no precedent source configured for predictions".into())
        })?;

        let analytics = PredictiveAnalytics::new(source, self.config.search.clone());
        let now = Utc::now();

        let outcome_fut = analytics.predict_outcome(&request.profile, request.risk_score);
        let settlement_fut = analytics.estimate_settlement(&request.profile, request.claim_amount);
        let timeline_fut = async {
            match request.stage {
                Some(stage) => Some(
                    analytics
                        .predict_timeline(&request.profile, stage, now)
                        .await,
                ),
                None => None,
            }
        };

        let (outcome, settlement, timeline) =
            tokio::join!(outcome_fut, settlement_fut, timeline_fut);

        let result = PredictionResult {
            id: PredictionId::new(),
            outcome,
            settlement: Some(settlement),
            timeline,
        };

        if let Some(sink) = &self.sink {
            if let Err(err) = sink.save_prediction(result.clone()).await {
                metrics::counter!("pipeline.persistence_failures").increment(1);
                tracing::warn!(
                    prediction_id = %result.id,
                    error = %err,
                    "Failed to persist prediction; returning in-memory result"
                );
            }
        }

        metrics::counter!("pipeline.predictions").increment(1);
        Ok(result)
    }

    async fn persist_assessment(
        &self,
        sink: &dyn AssessmentSink,
        assessment: &DocumentRiskAssessment,
    ) {
        if let Err(err) = sink.save_assessment(assessment.clone()).await {
            metrics::counter!("pipeline.persistence_failures").increment(1);
            tracing::warn!(
                assessment_id = %assessment.id,
                error = %err,
                "Failed to persist assessment; returning in-memory result"
            );
        }
        if let Err(err) = sink
            .save_clauses(assessment.document_id, assessment.clauses.clone())
            .await
        {
            metrics::counter!("pipeline.persistence_failures").increment(1);
            tracing::warn!(
                document_id = %assessment.document_id,
                error = %err,
                "Failed to persist clauses; returning in-memory result"
            );
        }
    }
}
