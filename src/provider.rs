//! Trait definition for pluggable search provider backends.
//!
//! Each provider (DuckDuckGo, Bing) implements [`ProviderBackend`] to
//! give the orchestrator a uniform interface for one search round-trip.
//! Selector logic is fragile coupling to an external site's markup, so
//! it stays behind this seam — providers can be swapped without touching
//! the orchestrator.

use crate::error::{Result, SearchError};
use crate::types::{DateFilter, Provider, SearchResult};

/// Minimum body size (bytes) at which a zero-result response is treated
/// as a soft block rather than a genuinely empty result set.
///
/// A real results page for a no-match query is small; a block disguised
/// as success comes back as a full landing page, typically tens of
/// kilobytes of boilerplate.
pub(crate) const SOFT_BLOCK_MIN_BYTES: usize = 4096;

/// A pluggable search provider backend.
///
/// Implementors perform exactly one search round-trip: pace the request
/// through the shared [`crate::governor::RequestGovernor`]
/// (`admit()` then `jitter()`), dispatch it with a rotated identity, and
/// normalise the raw markup into [`SearchResult`] values. Each provider
/// handles its own:
///
/// - query shaping (provider-specific reformatting that must preserve
///   every `site:` target)
/// - URL construction with query encoding
/// - HTML parsing via CSS selectors
/// - failure classification (non-2xx status, soft blocks)
///
/// All implementations must be `Send + Sync` for concurrent calls.
pub trait ProviderBackend: Send + Sync {
    /// Perform one search round-trip and return parsed results,
    /// truncated to `max_results`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::ProviderHttp`] on any non-2xx response
    ///   (429/503/403 are strong blocking signals)
    /// - [`SearchError::SoftBlock`] on a 200 response whose large body
    ///   yields zero results
    /// - [`SearchError::Http`] on transport failures, including timeouts
    /// - [`SearchError::Parse`] when the markup cannot be processed
    fn search(
        &self,
        query: &str,
        max_results: usize,
        date_filter: Option<DateFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<SearchResult>>> + Send;

    /// Returns which [`Provider`] this implementation represents.
    fn provider(&self) -> Provider;
}

/// Classify a response that parsed to zero results.
///
/// A small body means the query genuinely matched nothing; a large body
/// with no result markers is a block disguised as success. The two must
/// stay distinguishable — only the latter may suspend the provider.
pub(crate) fn classify_empty_response(body: &str) -> Result<Vec<SearchResult>> {
    if body.len() >= SOFT_BLOCK_MIN_BYTES {
        Err(SearchError::SoftBlock {
            body_bytes: body.len(),
        })
    } else {
        Ok(Vec::new())
    }
}
