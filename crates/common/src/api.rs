//! Collaborator traits at the pipeline's interface boundary.
//!
//! The HTTP layer, storage, and the external case-law provider live outside
//! this workspace; the pipeline only sees these traits. Boxed future return
//! types keep the traits object-safe for dyn dispatch.

use std::future::Future;
use std::pin::Pin;

use crate::error::Result;
use crate::ids::DocumentId;
use crate::types::{CasePrecedent, DocumentRiskAssessment, PrecedentQuery, PredictionResult, RiskedClause};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A precedent store or search provider. May be backed by a local database
/// and/or a remote case-law API. Failures must be catchable and non-fatal
/// to the caller.
pub trait PrecedentSource: Send + Sync {
    fn search(&self, query: PrecedentQuery) -> BoxFuture<'_, Result<Vec<CasePrecedent>>>;
}

/// Persistence sink for analysis products. Fire-and-forget from the
/// pipeline's perspective: the in-memory result is returned regardless of
/// whether persistence succeeds.
pub trait AssessmentSink: Send + Sync {
    fn save_assessment(&self, assessment: DocumentRiskAssessment) -> BoxFuture<'_, Result<()>>;
    fn save_clauses(
        &self,
        document_id: DocumentId,
        clauses: Vec<RiskedClause>,
    ) -> BoxFuture<'_, Result<()>>;
    fn save_prediction(&self, prediction: PredictionResult) -> BoxFuture<'_, Result<()>>;
}
