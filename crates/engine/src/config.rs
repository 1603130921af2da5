//! Pipeline configuration loading and validation.
//!
//! Validation is fail-loud: a config that would silently disable scoring
//! or hang searches is rejected at startup, not worked around at runtime.

use std::path::Path;

use lexrisk_common::config::PipelineConfig;
use lexrisk_common::{LexRiskError, Result};

/// Load configuration from a TOML file, falling back to defaults when the
/// file does not exist.
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let config = if path.exists() {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| LexRiskError::Config(format!("failed to read {}: {e}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|e| LexRiskError::Config(format!("failed to parse {}: {e}", path.display())))?
    } else {
        tracing::info!(path = %path.display(), "Config file not found, using defaults");
        PipelineConfig::default()
    };

    validate(&config)?;
    Ok(config)
}

/// Reject configurations that cannot produce meaningful results.
pub fn validate(config: &PipelineConfig) -> Result<()> {
    if !(0.0..=1.0).contains(&config.extraction.min_confidence) {
        return Err(LexRiskError::Config(format!(
            "extraction.min_confidence must be in [0, 1], got {}",
            config.extraction.min_confidence
        )));
    }
    if config.extraction.min_paragraph_chars == 0 {
        return Err(LexRiskError::Config(
            "extraction.min_paragraph_chars must be positive".into(),
        ));
    }
    if config.risk.boost_per_high_risk_clause < 0.0 || config.risk.max_boost < 0.0 {
        return Err(LexRiskError::Config(
            "risk boost values must be non-negative".into(),
        ));
    }
    if config.risk.max_supporting_precedents == 0 {
        return Err(LexRiskError::Config(
            "risk.max_supporting_precedents must be positive".into(),
        ));
    }
    if config.search.result_limit == 0 || config.search.population_limit == 0 {
        return Err(LexRiskError::Config(
            "search limits must be positive".into(),
        ));
    }
    if config.search.timeout_ms < 100 {
        return Err(LexRiskError::Config(format!(
            "search.timeout_ms must be at least 100, got {}",
            config.search.timeout_ms
        )));
    }
    if config.cache.search_ttl_seconds == 0 {
        return Err(LexRiskError::Config(
            "cache.search_ttl_seconds must be positive".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(validate(&PipelineConfig::default()).is_ok());
    }

    #[test]
    fn out_of_range_confidence_is_rejected() {
        let mut config = PipelineConfig::default();
        config.extraction.min_confidence = 1.5;
        assert!(matches!(
            validate(&config),
            Err(LexRiskError::Config(_))
        ));
    }

    #[test]
    fn tiny_timeout_is_rejected() {
        let mut config = PipelineConfig::default();
        config.search.timeout_ms = 10;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("/nonexistent/pipeline.toml")).unwrap();
        assert_eq!(config.search.result_limit, 20);
    }

    #[test]
    fn parses_partial_overrides() {
        let raw = r#"
            [extraction]
            min_confidence = 0.4
            min_paragraph_chars = 80

            [risk]
            boost_per_high_risk_clause = 0.25
            max_boost = 2.0
            max_supporting_precedents = 3

            [search]
            result_limit = 10
            population_limit = 40
            timeout_ms = 2000

            [cache]
            search_ttl_seconds = 3600
        "#;
        let config: PipelineConfig = toml::from_str(raw).unwrap();
        assert!(validate(&config).is_ok());
        assert_eq!(config.extraction.min_paragraph_chars, 80);
        assert_eq!(config.risk.max_supporting_precedents, 3);
    }
}
