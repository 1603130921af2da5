use serde::{Deserialize, Serialize};

/// Top-level pipeline configuration, deserialized from pipeline.toml.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub extraction: ExtractionConfig,
    pub risk: RiskConfig,
    pub search: SearchConfig,
    pub cache: CacheConfig,
}

/// Clause extraction tunables.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Clauses classified below this confidence are discarded.
    pub min_confidence: f64,
    /// Paragraphs shorter than this are skipped as noise.
    pub min_paragraph_chars: usize,
}

/// Risk scoring tunables.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Document-level boost added per high/critical clause.
    pub boost_per_high_risk_clause: f64,
    /// Cap on the total high-risk boost.
    pub max_boost: f64,
    /// Max supporting precedents attached to an assessment.
    pub max_supporting_precedents: usize,
}

/// Precedent search parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Max results requested per precedent search.
    pub result_limit: u32,
    /// Precedent population cap for statistical predictions.
    pub population_limit: u32,
    /// Caller-driven timeout on a single search call. Expiry degrades to
    /// the no-precedents path, not a hard failure.
    pub timeout_ms: u64,
}

/// Cache TTL configuration for the research client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Search response cache TTL in seconds.
    pub search_ttl_seconds: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig {
                min_confidence: 0.5,
                min_paragraph_chars: 50,
            },
            risk: RiskConfig {
                boost_per_high_risk_clause: 0.5,
                max_boost: 3.0,
                max_supporting_precedents: 5,
            },
            search: SearchConfig {
                result_limit: 20,
                population_limit: 50,
                timeout_ms: 5_000,
            },
            cache: CacheConfig {
                search_ttl_seconds: 86_400,
            },
        }
    }
}
