use std::collections::HashMap;
use std::time::{Duration, Instant};

use lexrisk_common::types::CasePrecedent;

/// In-memory search-response cache with TTL-based expiration, keyed by the
/// query signature.
pub struct SearchCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
}

struct CacheEntry {
    precedents: Vec<CasePrecedent>,
    inserted_at: Instant,
}

impl SearchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Get a cached result set if it exists and hasn't expired.
    pub fn get(&self, key: &str) -> Option<Vec<CasePrecedent>> {
        if let Some(entry) = self.entries.get(key) {
            if entry.inserted_at.elapsed() < self.ttl {
                metrics::counter!("research.cache.hit").increment(1);
                return Some(entry.precedents.clone());
            }
        }
        metrics::counter!("research.cache.miss").increment(1);
        None
    }

    /// Insert a result set, evicting expired entries.
    pub fn insert(&mut self, key: String, precedents: Vec<CasePrecedent>) {
        self.entries
            .retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);

        self.entries.insert(
            key,
            CacheEntry {
                precedents,
                inserted_at: Instant::now(),
            },
        );
    }
}
