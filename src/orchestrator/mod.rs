//! Provider orchestration: primary-first routing with suspension fallback.
//!
//! Owns the suspension state machine, selects a provider per call,
//! interprets provider failures as likely-blocked events, and falls back
//! to the secondary. Provider-level failures are always recovered
//! locally by falling back; only total exhaustion of both providers
//! propagates, as [`SearchError::AllProvidersFailed`].

pub mod suspension;

use crate::error::{Result, SearchError};
use crate::provider::ProviderBackend;
use crate::types::{DateFilter, ProviderUsed, SearchResult};
use std::time::Duration;
use suspension::Suspension;

/// Routes each search call to the primary or secondary provider.
///
/// Generic over the backend types so tests can inject scripted mocks;
/// production wiring uses the DuckDuckGo/Bing scrapers.
#[derive(Debug)]
pub struct Orchestrator<P, S> {
    primary: P,
    secondary: S,
    suspension: Suspension,
}

impl<P: ProviderBackend, S: ProviderBackend> Orchestrator<P, S> {
    /// Create an orchestrator with the primary initially active.
    pub fn new(primary: P, secondary: S, suspension_base: Duration) -> Self {
        Self {
            primary,
            secondary,
            suspension: Suspension::new(suspension_base),
        }
    }

    /// The suspension state machine (for diagnostics and tests).
    pub fn suspension(&self) -> &Suspension {
        &self.suspension
    }

    /// The primary and secondary backends, in that order.
    pub fn backends(&self) -> (&P, &S) {
        (&self.primary, &self.secondary)
    }

    /// Execute one search call with fallback.
    ///
    /// 1. If the primary is active, attempt it. Success (including a
    ///    genuine empty result set) returns labeled [`ProviderUsed::Primary`]
    ///    and resets the failure count. Any failure — HTTP error, soft
    ///    block, timeout — suspends the primary and falls back.
    /// 2. If the primary is suspended, route directly to the secondary
    ///    without attempting the primary at all.
    /// 3. If the secondary also fails, the whole call fails; there is
    ///    no tertiary fallback.
    pub async fn run(
        &self,
        query: &str,
        max_results: usize,
        date_filter: Option<DateFilter>,
    ) -> Result<(ProviderUsed, Vec<SearchResult>)> {
        if !self.suspension.primary_available() {
            tracing::debug!(
                provider = %self.primary.provider(),
                "primary suspended, routing to secondary"
            );
            return self
                .try_secondary(query, max_results, date_filter, ProviderUsed::SecondaryPrimarySuspended, None)
                .await;
        }

        match self.primary.search(query, max_results, date_filter).await {
            Ok(results) => {
                self.suspension.record_success();
                Ok((ProviderUsed::Primary, results))
            }
            Err(err) => {
                let (count, duration) = self.suspension.record_failure();
                tracing::warn!(
                    provider = %self.primary.provider(),
                    error = %err,
                    strong_block_signal = err.is_block_signal(),
                    backoff_tier = count,
                    suspended_secs = duration.as_secs(),
                    "primary failed, suspending and falling back"
                );
                self.try_secondary(
                    query,
                    max_results,
                    date_filter,
                    ProviderUsed::SecondaryAfterPrimaryFailure,
                    Some(err),
                )
                .await
            }
        }
    }

    /// Attempt the secondary provider, aggregating failures into
    /// [`SearchError::AllProvidersFailed`] when it also fails.
    async fn try_secondary(
        &self,
        query: &str,
        max_results: usize,
        date_filter: Option<DateFilter>,
        label: ProviderUsed,
        primary_error: Option<SearchError>,
    ) -> Result<(ProviderUsed, Vec<SearchResult>)> {
        match self.secondary.search(query, max_results, date_filter).await {
            Ok(results) => Ok((label, results)),
            Err(err) => {
                let primary_part = match primary_error {
                    Some(e) => format!("{}: {e}", self.primary.provider()),
                    None => format!("{}: suspended", self.primary.provider()),
                };
                Err(SearchError::AllProvidersFailed(format!(
                    "{primary_part}; {}: {err}",
                    self.secondary.provider()
                )))
            }
        }
    }
}
