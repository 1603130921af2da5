//! CourtListener-style opinion search client.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;

use lexrisk_common::api::{BoxFuture, PrecedentSource};
use lexrisk_common::types::{CasePrecedent, Outcome, PrecedentQuery};
use lexrisk_common::LexRiskError;

use crate::cache::SearchCache;
use crate::circuit_breaker::CircuitBreaker;

/// Two case names this similar are treated as the same case appearing
/// twice in the result set.
const DEDUP_SIMILARITY: f64 = 0.95;

#[derive(Debug, Error)]
pub enum ResearchError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Unexpected response status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response parse error: {0}")]
    Parse(String),

    #[error("Circuit breaker open for {0}")]
    CircuitOpen(String),

    #[error("Client build error: {0}")]
    Build(String),
}

impl From<ResearchError> for LexRiskError {
    fn from(err: ResearchError) -> Self {
        LexRiskError::Search(err.to_string())
    }
}

/// Connection settings for the case-law provider.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    /// Optional API token; anonymous access is rate-limited but works.
    pub api_token: Option<String>,
    pub timeout_ms: u64,
    pub cache_ttl_seconds: u64,
    pub failure_threshold: u32,
    pub cooldown_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.courtlistener.com/api/rest/v3".into(),
            api_token: None,
            timeout_ms: 10_000,
            cache_ttl_seconds: 86_400,
            failure_threshold: 5,
            cooldown_seconds: 60,
        }
    }
}

/// Client for a CourtListener-style search API, fronted by a TTL cache
/// and a circuit breaker.
pub struct CaseLawClient {
    http: reqwest::Client,
    config: ClientConfig,
    /// std Mutex: only locked before and after the request, never across
    /// an await.
    cache: Mutex<SearchCache>,
    breaker: CircuitBreaker,
}

impl CaseLawClient {
    pub fn new(config: ClientConfig) -> Result<Self, ResearchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ResearchError::Build(e.to_string()))?;

        Ok(Self {
            http,
            cache: Mutex::new(SearchCache::new(Duration::from_secs(
                config.cache_ttl_seconds,
            ))),
            breaker: CircuitBreaker::new(
                "caselaw",
                config.failure_threshold,
                config.cooldown_seconds,
            ),
            config,
        })
    }

    /// Search published opinions matching the query. Results are cached by
    /// the query signature for the configured TTL.
    pub async fn search_cases(
        &self,
        query: &PrecedentQuery,
    ) -> Result<Vec<CasePrecedent>, ResearchError> {
        let key = query.signature();
        if let Some(cached) = self.cache.lock().unwrap().get(&key) {
            return Ok(cached);
        }

        if !self.breaker.allow() {
            return Err(ResearchError::CircuitOpen(self.breaker.name().to_string()));
        }

        let start = Instant::now();
        let params = build_params(query);

        let mut request = self
            .http
            .get(format!("{}/search/", self.config.base_url))
            .query(&params);
        if let Some(token) = &self.config.api_token {
            request = request.header("Authorization", format!("Token {token}"));
        }

        let response = request.send().await.map_err(|e| {
            self.breaker.record_failure();
            ResearchError::Http(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            self.breaker.record_failure();
            let body = response.text().await.unwrap_or_default();
            return Err(ResearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: SearchResponse = response.json().await.map_err(|e| {
            self.breaker.record_failure();
            ResearchError::Parse(e.to_string())
        })?;
        self.breaker.record_success();
        metrics::histogram!("research.request.latency").record(start.elapsed().as_secs_f64());

        let precedents: Vec<CasePrecedent> = payload
            .results
            .into_iter()
            .take(query.limit as usize)
            .map(|result| map_result(result, query))
            .collect();
        let precedents = dedup_similar(precedents);

        tracing::debug!(
            query = %query.query,
            results = precedents.len(),
            "Case-law search complete"
        );

        self.cache.lock().unwrap().insert(key, precedents.clone());
        Ok(precedents)
    }
}

impl PrecedentSource for CaseLawClient {
    fn search(
        &self,
        query: PrecedentQuery,
    ) -> BoxFuture<'_, lexrisk_common::Result<Vec<CasePrecedent>>> {
        Box::pin(async move { self.search_cases(&query).await.map_err(Into::into) })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResult {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default, rename = "caseName")]
    case_name: String,
    #[serde(default)]
    citation: Option<Vec<String>>,
    #[serde(default)]
    court: String,
    #[serde(default, rename = "dateFiled")]
    date_filed: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    absolute_url: Option<String>,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    jurisdiction: Option<String>,
}

fn build_params(query: &PrecedentQuery) -> Vec<(&'static str, String)> {
    // Fold the practice area into the search terms unless it's already
    // part of the query text.
    let mut q = query.query.clone();
    if let Some(area) = &query.practice_area {
        if !q.to_lowercase().contains(&area.to_lowercase()) {
            q = format!("{q} {area}").trim().to_string();
        }
    }

    let mut params = vec![
        ("q", q),
        ("type", "o".to_string()),
        ("order_by", "score desc".to_string()),
        ("stat_Precedential", "Published".to_string()),
    ];
    if let Some(jurisdiction) = &query.jurisdiction {
        params.push(("court_jurisdiction", jurisdiction.clone()));
    }
    if let Some(from) = query.date_from {
        params.push(("filed_after", from.format("%Y-%m-%d").to_string()));
    }
    if let Some(to) = query.date_to {
        params.push(("filed_before", to.format("%Y-%m-%d").to_string()));
    }
    params
}

fn map_result(result: SearchResult, query: &PrecedentQuery) -> CasePrecedent {
    let case_id = match result.id {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    CasePrecedent {
        case_id,
        case_name: result.case_name,
        citation: result
            .citation
            .and_then(|c| c.into_iter().next())
            .unwrap_or_default(),
        court: result.court,
        jurisdiction: result.jurisdiction.or_else(|| query.jurisdiction.clone()),
        decision_date: result.date_filed.as_deref().and_then(parse_date),
        filing_date: None,
        // Search results don't carry outcomes; enrichment happens at the
        // opinion-detail level outside this pipeline.
        outcome: Outcome::Unknown,
        settlement_amount: None,
        practice_area: query.practice_area.clone(),
        case_type: query.case_type.clone(),
        relevance_score: result.score,
        precedent_value: Some("Published".into()),
        summary: result.snippet,
        url: result.absolute_url,
    }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Drop results whose case name is a near-duplicate of an earlier,
/// higher-ranked result.
fn dedup_similar(precedents: Vec<CasePrecedent>) -> Vec<CasePrecedent> {
    let mut kept: Vec<CasePrecedent> = Vec::with_capacity(precedents.len());
    for candidate in precedents {
        let duplicate = kept.iter().any(|existing| {
            strsim::jaro_winkler(
                &existing.case_name.to_lowercase(),
                &candidate.case_name.to_lowercase(),
            ) > DEDUP_SIMILARITY
        });
        if !duplicate {
            kept.push(candidate);
        }
    }
    kept
}
