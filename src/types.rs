//! Core types for search results, responses, and provider identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single search result returned from a provider.
///
/// Immutable once produced — built per call and never mutated after
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the search result page.
    pub title: String,
    /// The URL of the search result.
    pub url: String,
    /// Ranked keywords extracted from the title and snippet.
    pub keywords: Vec<String>,
    /// A short summary of the page built from the provider's snippet.
    pub summary: String,
}

/// The complete response for one search call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query as submitted to the provider (annotated with any
    /// site-targeting enhancement that was applied).
    pub query: String,
    /// Number of results in `results`.
    pub total_results: usize,
    /// Which provider produced these results, and under what circumstances.
    pub provider_used: ProviderUsed,
    /// Results in the provider's native ranking order, capped at the
    /// caller's requested maximum.
    pub results: Vec<SearchResult>,
}

/// The two upstream search providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    /// DuckDuckGo HTML endpoint — the preferred (primary) provider.
    DuckDuckGo,
    /// Bing — the fallback (secondary) provider.
    Bing,
}

impl Provider {
    /// Returns the human-readable name of this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Bing => "Bing",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the responding provider was selected for a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderUsed {
    /// The primary provider answered normally.
    Primary,
    /// The primary failed during this call; the secondary answered.
    SecondaryAfterPrimaryFailure,
    /// The primary was under suspension and was not attempted.
    SecondaryPrimarySuspended,
}

impl ProviderUsed {
    /// Stable label for this selection mode.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::SecondaryAfterPrimaryFailure => "secondary (primary failed)",
            Self::SecondaryPrimarySuspended => "secondary (primary suspended)",
        }
    }
}

impl fmt::Display for ProviderUsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Recency filter forwarded to providers that support one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateFilter {
    /// Results from the past day.
    Day,
    /// Results from the past week.
    Week,
    /// Results from the past month.
    Month,
    /// Results from the past year.
    Year,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_result_construction() {
        let result = SearchResult {
            title: "Example".into(),
            url: "https://example.com".into(),
            keywords: vec!["example".into()],
            summary: "An example page".into(),
        };
        assert_eq!(result.title, "Example");
        assert_eq!(result.keywords.len(), 1);
    }

    #[test]
    fn search_result_serde_round_trip() {
        let result = SearchResult {
            title: "Test".into(),
            url: "https://test.com".into(),
            keywords: vec!["test".into(), "page".into()],
            summary: "summary".into(),
        };
        let json = serde_json::to_string(&result).expect("serialize");
        let decoded: SearchResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded.title, "Test");
        assert_eq!(decoded.keywords, vec!["test", "page"]);
    }

    #[test]
    fn search_response_serde_round_trip() {
        let response = SearchResponse {
            query: "rust (site:docs.rs)".into(),
            total_results: 0,
            provider_used: ProviderUsed::Primary,
            results: vec![],
        };
        let json = serde_json::to_string(&response).expect("serialize");
        let decoded: SearchResponse = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded.query, "rust (site:docs.rs)");
        assert_eq!(decoded.provider_used, ProviderUsed::Primary);
    }

    #[test]
    fn provider_display() {
        assert_eq!(Provider::DuckDuckGo.to_string(), "DuckDuckGo");
        assert_eq!(Provider::Bing.to_string(), "Bing");
    }

    #[test]
    fn provider_used_labels() {
        assert_eq!(ProviderUsed::Primary.label(), "primary");
        assert_eq!(
            ProviderUsed::SecondaryAfterPrimaryFailure.label(),
            "secondary (primary failed)"
        );
        assert_eq!(
            ProviderUsed::SecondaryPrimarySuspended.label(),
            "secondary (primary suspended)"
        );
    }

    #[test]
    fn provider_equality_and_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Provider::DuckDuckGo);
        set.insert(Provider::DuckDuckGo);
        assert_eq!(set.len(), 1);
        set.insert(Provider::Bing);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn date_filter_serde_round_trip() {
        let filter = DateFilter::Week;
        let json = serde_json::to_string(&filter).expect("serialize");
        let decoded: DateFilter = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, DateFilter::Week);
    }
}
