use thiserror::Error;

/// Top-level error type for LexRisk pipeline operations.
#[derive(Debug, Error)]
pub enum LexRiskError {
    // --- Collaborator errors (pipeline degrades, never aborts) ---
    #[error("Precedent search error: {0}")]
    Search(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    // --- Operational errors ---
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Too few historical precedents to compute a statistic. Distinct from
    /// a real zero-valued result.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("{0}")]
    Internal(String),
}

impl LexRiskError {
    /// Whether this error comes from a collaborator whose failure the
    /// pipeline absorbs by proceeding with empty/partial input.
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            Self::Search(_) | Self::Persistence(_) | Self::Timeout(_)
        )
    }

    /// Whether this error means the historical population was too small,
    /// as opposed to a computation failing outright.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData(_))
    }
}

/// Result type alias for LexRisk operations.
pub type Result<T> = std::result::Result<T, LexRiskError>;
