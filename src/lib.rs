//! # tandem-search
//!
//! Embedded two-provider web search with automatic fallback.
//!
//! This crate keeps a "search" capability available on top of two public
//! search result pages with no official API and aggressive undocumented
//! rate limits. It scrapes DuckDuckGo's HTML endpoint as the primary
//! provider and falls back to Bing when the primary fails or looks
//! blocked — no API keys, no external services, no user setup required.
//!
//! ## Design
//!
//! - A shared request governor paces every outbound request: a sliding
//!   window cap, minimum spacing, random jitter, User-Agent rotation,
//!   and probabilistic extra headers
//! - A suspension state machine benches the primary provider with
//!   capped exponential backoff when it fails or returns a soft block
//!   (an HTTP 200 landing page instead of results)
//! - Queries are enhanced with `site:` targeting from a keyword→site
//!   mapping before they reach the providers
//! - In-memory TTL response cache per service instance
//!
//! All cross-request state lives in an explicitly constructed
//! [`SearchService`] — no global singletons, so tests can run multiple
//! independent instances.
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - No network listeners — this is a library, not a server
//! - Search queries are logged only at trace level

pub mod cache;
pub mod config;
pub mod enhance;
pub mod error;
pub mod extract;
pub mod governor;
pub mod http;
pub mod orchestrator;
pub mod provider;
pub mod providers;
pub mod types;

pub use config::{SearchConfig, MAX_RESULTS_LIMIT};
pub use error::{Result, SearchError};
pub use governor::RequestGovernor;
pub use provider::ProviderBackend;
pub use types::{DateFilter, Provider, ProviderUsed, SearchResponse, SearchResult};

use cache::{CacheKey, ResponseCache};
use enhance::QueryEnhancer;
use orchestrator::Orchestrator;
use providers::{BingProvider, DuckDuckGoProvider};
use std::sync::Arc;
use std::time::Duration;

/// The search front door: owns all cross-request state.
///
/// Create one per process (or several in tests — instances are fully
/// independent). Each service holds the shared pacing governor, the
/// primary-provider suspension state, the query enhancer, and the
/// response cache, living for the service's lifetime and never
/// persisted.
pub struct SearchService {
    enhancer: QueryEnhancer,
    cache: ResponseCache,
    orchestrator: Orchestrator<DuckDuckGoProvider, BingProvider>,
}

impl SearchService {
    /// Build a service from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidArgument`] if the configuration is
    /// invalid.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;

        let governor = Arc::new(RequestGovernor::new());
        let primary = DuckDuckGoProvider::new(Arc::clone(&governor), config.clone());
        let secondary = BingProvider::new(governor, config.clone());
        let orchestrator = Orchestrator::new(
            primary,
            secondary,
            Duration::from_secs(config.suspension_base_secs),
        );

        Ok(Self {
            enhancer: QueryEnhancer::from_config(&config),
            cache: ResponseCache::new(config.cache_ttl_seconds),
            orchestrator,
        })
    }

    /// Build a service with default configuration.
    ///
    /// # Errors
    ///
    /// Same as [`SearchService::new`] (defaults always validate).
    pub fn with_defaults() -> Result<Self> {
        Self::new(SearchConfig::default())
    }

    /// Execute one search call.
    ///
    /// The query is enhanced with `site:` targeting, routed to the
    /// primary provider (or the secondary when the primary is failing
    /// or suspended), and the normalized results are returned in the
    /// provider's native ranking, capped at `max_results`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidArgument`] if `query` is empty or
    ///   `max_results` is 0 or greater than [`MAX_RESULTS_LIMIT`] —
    ///   raised before any network activity
    /// - [`SearchError::AllProvidersFailed`] if both providers fail
    ///   within this call; individual provider failures recovered by
    ///   fallback are not surfaced
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> tandem_search::Result<()> {
    /// let service = tandem_search::SearchService::with_defaults()?;
    /// let response = service.execute_search("rust programming", 10, None).await?;
    /// for result in &response.results {
    ///     println!("{}: {}", result.title, result.url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute_search(
        &self,
        query: &str,
        max_results: usize,
        date_filter: Option<DateFilter>,
    ) -> Result<SearchResponse> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidArgument(
                "query must not be empty".into(),
            ));
        }
        if max_results == 0 {
            return Err(SearchError::InvalidArgument(
                "max_results must be greater than 0".into(),
            ));
        }
        if max_results > MAX_RESULTS_LIMIT {
            return Err(SearchError::InvalidArgument(format!(
                "max_results must be <= {MAX_RESULTS_LIMIT}"
            )));
        }

        let enhanced = self.enhancer.enhance(query);
        tracing::trace!(query = %enhanced, max_results, "executing search");

        let key = CacheKey::new(&enhanced, max_results, date_filter);
        if let Some(hit) = self.cache.get(&key).await {
            tracing::debug!(query = %enhanced, "cache hit");
            return Ok(hit);
        }

        let (provider_used, results) = self
            .orchestrator
            .run(&enhanced, max_results, date_filter)
            .await?;

        let response = SearchResponse {
            query: enhanced,
            total_results: results.len(),
            provider_used,
            results,
        };
        self.cache.insert(key, response.clone()).await;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_construction_with_defaults() {
        assert!(SearchService::with_defaults().is_ok());
    }

    #[test]
    fn service_rejects_invalid_config() {
        let config = SearchConfig {
            max_results: 0,
            ..Default::default()
        };
        let result = SearchService::new(config);
        assert!(matches!(result, Err(SearchError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn empty_query_rejected_before_network() {
        let service = SearchService::with_defaults().expect("service");
        let err = service.execute_search("", 10, None).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
        assert!(err.to_string().contains("query"));

        let err = service.execute_search("   ", 10, None).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn oversized_max_results_rejected_before_network() {
        let service = SearchService::with_defaults().expect("service");
        let err = service
            .execute_search("rust", MAX_RESULTS_LIMIT + 1, None)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
        assert!(err.to_string().contains("max_results"));
    }

    #[tokio::test]
    async fn zero_max_results_rejected() {
        let service = SearchService::with_defaults().expect("service");
        let err = service.execute_search("rust", 0, None).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
    }
}
