//! In-memory TTL cache for search responses.
//!
//! Caches complete responses keyed by (normalised query, result limit,
//! date filter). One cache per [`crate::SearchService`] instance — no
//! process-wide globals, so tests get independent caches. Uses [`moka`]
//! for async-friendly caching with TTL and automatic eviction.

use std::time::Duration;

use moka::future::Cache;

use crate::types::{DateFilter, SearchResponse};

/// Maximum number of cached responses.
const MAX_CACHE_ENTRIES: u64 = 100;

/// Composite cache key: normalised query + call parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Lowercased, trimmed query string.
    query: String,
    /// Requested result cap — different caps are different entries.
    max_results: usize,
    /// Recency filter, if any.
    date_filter: Option<DateFilter>,
}

impl CacheKey {
    /// Build a deterministic cache key from call parameters.
    pub fn new(query: &str, max_results: usize, date_filter: Option<DateFilter>) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            max_results,
            date_filter,
        }
    }
}

/// Per-service response cache. A TTL of zero disables caching entirely.
pub struct ResponseCache {
    inner: Option<Cache<CacheKey, SearchResponse>>,
}

impl ResponseCache {
    /// Create a cache with the given TTL in seconds (0 disables).
    pub fn new(ttl_seconds: u64) -> Self {
        let inner = (ttl_seconds > 0).then(|| {
            Cache::builder()
                .max_capacity(MAX_CACHE_ENTRIES)
                .time_to_live(Duration::from_secs(ttl_seconds))
                .build()
        });
        Self { inner }
    }

    /// Look up a cached response. Always a miss when caching is disabled.
    pub async fn get(&self, key: &CacheKey) -> Option<SearchResponse> {
        match self.inner {
            Some(ref cache) => cache.get(key).await,
            None => None,
        }
    }

    /// Insert a response. No-op when caching is disabled.
    pub async fn insert(&self, key: CacheKey, response: SearchResponse) {
        if let Some(ref cache) = self.inner {
            cache.insert(key, response).await;
        }
    }
}
