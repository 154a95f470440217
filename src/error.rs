//! Error types for the tandem-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Provider-level failures (HTTP errors, soft
//! blocks) are normally recovered internally by falling back to the
//! secondary provider; callers only see [`SearchError::AllProvidersFailed`]
//! when every provider fails within a single call.

/// Errors that can occur during web search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Caller input violated a stated constraint. Never retried.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An upstream search provider returned a non-2xx status.
    ///
    /// 429/503/403 are strong blocking signals; any other non-2xx is a
    /// generic failure. Both trigger suspension and fallback.
    #[error("provider HTTP error: {status} {status_text}")]
    ProviderHttp {
        /// The HTTP status code returned by the provider.
        status: u16,
        /// The canonical reason phrase for the status, if any.
        status_text: String,
    },

    /// A 200 response whose content indicates the request was refused —
    /// a large body with zero parseable results (e.g. a landing page
    /// served instead of a results page).
    #[error("soft block detected: {body_bytes} byte body with no results")]
    SoftBlock {
        /// Size of the response body that was classified as a block.
        body_bytes: usize,
    },

    /// Both providers failed within a single call. The only
    /// provider-related failure mode visible to end callers.
    #[error("all search providers failed: {0}")]
    AllProvidersFailed(String),

    /// An HTTP request failed at the transport level (including timeouts).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a provider response or configuration input.
    #[error("parse error: {0}")]
    Parse(String),
}

impl SearchError {
    /// Whether this error is a strong blocking signal (rate limiting or
    /// bot detection) rather than a generic failure.
    ///
    /// Informational only — the orchestrator treats every provider
    /// failure the same way; this distinction affects log output.
    pub fn is_block_signal(&self) -> bool {
        match self {
            Self::ProviderHttp { status, .. } => matches!(status, 429 | 503 | 403),
            Self::SoftBlock { .. } => true,
            _ => false,
        }
    }
}

/// Convenience type alias for tandem-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_argument() {
        let err = SearchError::InvalidArgument("max_results must be <= 50".into());
        assert_eq!(
            err.to_string(),
            "invalid argument: max_results must be <= 50"
        );
    }

    #[test]
    fn display_provider_http() {
        let err = SearchError::ProviderHttp {
            status: 429,
            status_text: "Too Many Requests".into(),
        };
        assert_eq!(err.to_string(), "provider HTTP error: 429 Too Many Requests");
    }

    #[test]
    fn display_soft_block() {
        let err = SearchError::SoftBlock { body_bytes: 12000 };
        assert_eq!(
            err.to_string(),
            "soft block detected: 12000 byte body with no results"
        );
    }

    #[test]
    fn display_all_providers_failed() {
        let err = SearchError::AllProvidersFailed("duckduckgo: 429; bing: timeout".into());
        assert_eq!(
            err.to_string(),
            "all search providers failed: duckduckgo: 429; bing: timeout"
        );
    }

    #[test]
    fn block_signal_classification() {
        let strong = SearchError::ProviderHttp {
            status: 429,
            status_text: "Too Many Requests".into(),
        };
        assert!(strong.is_block_signal());

        let forbidden = SearchError::ProviderHttp {
            status: 403,
            status_text: "Forbidden".into(),
        };
        assert!(forbidden.is_block_signal());

        let generic = SearchError::ProviderHttp {
            status: 500,
            status_text: "Internal Server Error".into(),
        };
        assert!(!generic.is_block_signal());

        assert!(SearchError::SoftBlock { body_bytes: 9000 }.is_block_signal());
        assert!(!SearchError::Http("connection refused".into()).is_block_signal());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
