//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls result limits, timeouts, caching, suspension
//! backoff, and query enhancement. The defaults are tuned for reliable,
//! polite scraping.

use crate::error::SearchError;
use std::path::PathBuf;

/// Hard upper bound on the number of results a caller may request.
pub const MAX_RESULTS_LIMIT: usize = 50;

/// Configuration for a search service instance.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Default number of results when a call does not specify one.
    /// Must be in `1..=50`.
    pub max_results: usize,
    /// Per-request HTTP timeout in seconds. A timed-out request counts
    /// as a generic provider failure.
    pub timeout_seconds: u64,
    /// How long to cache responses in seconds. Set to 0 to disable caching.
    pub cache_ttl_seconds: u64,
    /// Base suspension duration in seconds. The backoff ladder is
    /// `base * min(2^(count-1), 6)`.
    pub suspension_base_secs: u64,
    /// Optional path to a JSON keyword→site mapping for query
    /// enhancement. `None` uses the built-in mapping.
    pub site_map_path: Option<PathBuf>,
    /// Custom User-Agent string. If `None`, rotates through a built-in
    /// list of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 10,
            timeout_seconds: 8,
            cache_ttl_seconds: 600,
            suspension_base_secs: 20 * 60,
            site_map_path: None,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results` must be in `1..=50`
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::InvalidArgument(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.max_results > MAX_RESULTS_LIMIT {
            return Err(SearchError::InvalidArgument(format!(
                "max_results must be <= {MAX_RESULTS_LIMIT}"
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::InvalidArgument(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.max_results, 10);
        assert_eq!(config.timeout_seconds, 8);
        assert_eq!(config.cache_ttl_seconds, 600);
        assert_eq!(config.suspension_base_secs, 1200);
        assert!(config.site_map_path.is_none());
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn valid_config_passes_validation() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_max_results_rejected() {
        let config = SearchConfig {
            max_results: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn oversized_max_results_rejected() {
        let config = SearchConfig {
            max_results: 51,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("<= 50"));
    }

    #[test]
    fn max_results_at_limit_valid() {
        let config = SearchConfig {
            max_results: 50,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn custom_user_agent() {
        let config = SearchConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        assert_eq!(config.user_agent.as_deref(), Some("CustomBot/1.0"));
        assert!(config.validate().is_ok());
    }
}
