//! Bing search provider — the secondary (fallback) upstream.
//!
//! Queried only when DuckDuckGo fails or is under suspension. Bing
//! tolerates parenthesised operator groups, so enhanced queries pass
//! through unchanged.

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::extract;
use crate::governor::RequestGovernor;
use crate::http;
use crate::provider::{classify_empty_response, ProviderBackend};
use crate::types::{DateFilter, Provider, SearchResult};
use scraper::{Html, Selector};
use std::sync::Arc;

/// Keywords extracted per result.
const KEYWORD_LIMIT: usize = 5;

/// Bing HTML search scraper.
///
/// Fallback provider with a different index from DuckDuckGo's sources.
pub struct BingProvider {
    governor: Arc<RequestGovernor>,
    config: SearchConfig,
}

impl BingProvider {
    /// Create a provider sharing the given pacing governor.
    pub fn new(governor: Arc<RequestGovernor>, config: SearchConfig) -> Self {
        Self { governor, config }
    }

    /// Map a recency filter to Bing's `filters` freshness parameter.
    fn freshness_param(filter: DateFilter) -> &'static str {
        match filter {
            DateFilter::Day => "ex1:\"ez1\"",
            DateFilter::Week => "ex1:\"ez2\"",
            DateFilter::Month => "ex1:\"ez3\"",
            DateFilter::Year => "ex1:\"ez5\"",
        }
    }
}

impl ProviderBackend for BingProvider {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        date_filter: Option<DateFilter>,
    ) -> Result<Vec<SearchResult>> {
        tracing::trace!(query, "Bing search");

        self.governor.admit().await;
        self.governor.jitter().await;

        let client = http::build_client(&self.config, self.governor.identity())?;

        let mut params = vec![("q", query), ("setlang", "en")];
        if let Some(filter) = date_filter {
            params.push(("filters", Self::freshness_param(filter)));
        }

        let mut request = client
            .get("https://www.bing.com/search")
            .query(&params)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "en-US,en;q=0.9");
        for (name, value) in self.governor.extra_headers() {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("Bing request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::ProviderHttp {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_owned(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("Bing response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "Bing response received");

        let results = parse_bing_html(&html, max_results)?;
        if results.is_empty() {
            return classify_empty_response(&html);
        }
        Ok(results)
    }

    fn provider(&self) -> Provider {
        Provider::Bing
    }
}

/// Parse Bing HTML response into search results.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_bing_html(html: &str, max_results: usize) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);

    // Bing uses li.b_algo containers for organic search results
    let result_sel = Selector::parse("li.b_algo")
        .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse("h2")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let link_sel = Selector::parse("a")
        .map_err(|e| SearchError::Parse(format!("invalid link selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".b_caption p, .b_lineclamp2")
        .map_err(|e| SearchError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut results = Vec::new();

    for element in document.select(&result_sel) {
        let title_el = match element.select(&title_sel).next() {
            Some(el) => el,
            None => continue,
        };

        let title = title_el.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }

        // Extract URL from h2 > a[href]
        let url = title_el
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|h| h.to_string());

        let url = match url {
            Some(u) if !u.is_empty() => u,
            _ => continue,
        };

        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let keywords = extract::extract_keywords(&title, &snippet, KEYWORD_LIMIT);
        let summary = extract::summarize(&title, &snippet, &url);

        results.push(SearchResult {
            title,
            url,
            keywords,
            summary,
        });

        if results.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = results.len(), "Bing results parsed");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_BING_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<ol id="b_results">
<li class="b_algo">
  <h2><a href="https://www.rust-lang.org/" h="ID=SERP">Rust Programming Language</a></h2>
  <div class="b_caption"><p>A language empowering everyone to build reliable and efficient software.</p></div>
</li>
<li class="b_algo">
  <h2><a href="https://doc.rust-lang.org/book/" h="ID=SERP">The Rust Programming Language Book</a></h2>
  <div class="b_caption"><p>An introductory book about Rust.</p></div>
</li>
<li class="b_algo">
  <h2><a href="https://en.wikipedia.org/wiki/Rust_(programming_language)" h="ID=SERP">Rust (programming language) - Wikipedia</a></h2>
  <div class="b_caption"><p>Rust is a multi-paradigm programming language.</p></div>
</li>
</ol>
</body>
</html>"#;

    #[test]
    fn parse_mock_html_returns_results() {
        let results = parse_bing_html(MOCK_BING_HTML, 10);
        assert!(results.is_ok());
        let results = results.expect("should parse");
        assert_eq!(results.len(), 3);

        assert_eq!(results[0].title, "Rust Programming Language");
        assert_eq!(results[0].url, "https://www.rust-lang.org/");
        assert!(results[0].summary.contains("reliable and efficient software"));
        assert!(results[0].keywords.contains(&"rust".to_string()));

        assert_eq!(results[1].url, "https://doc.rust-lang.org/book/");

        assert!(results[2].url.contains("wikipedia.org"));
    }

    #[test]
    fn parse_respects_max_results() {
        let results = parse_bing_html(MOCK_BING_HTML, 2);
        assert!(results.is_ok());
        assert_eq!(results.expect("should parse").len(), 2);
    }

    #[test]
    fn parse_empty_html_returns_empty() {
        let results = parse_bing_html("<html><body></body></html>", 10);
        assert!(results.is_ok());
        assert!(results.expect("should parse").is_empty());
    }

    #[test]
    fn keywords_capped_per_result() {
        let results = parse_bing_html(MOCK_BING_HTML, 10).expect("should parse");
        for r in &results {
            assert!(r.keywords.len() <= KEYWORD_LIMIT);
        }
    }

    #[test]
    fn freshness_params() {
        assert_eq!(BingProvider::freshness_param(DateFilter::Day), "ex1:\"ez1\"");
        assert_eq!(BingProvider::freshness_param(DateFilter::Week), "ex1:\"ez2\"");
        assert_eq!(BingProvider::freshness_param(DateFilter::Month), "ex1:\"ez3\"");
        assert_eq!(BingProvider::freshness_param(DateFilter::Year), "ex1:\"ez5\"");
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BingProvider>();
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_bing_search() {
        let provider = BingProvider::new(
            Arc::new(RequestGovernor::new()),
            SearchConfig::default(),
        );
        let results = provider.search("rust programming", 10, None).await;
        assert!(results.is_ok());
        let results = results.expect("live search should work");
        assert!(!results.is_empty());
        for r in &results {
            assert!(!r.title.is_empty());
            assert!(!r.url.is_empty());
        }
    }
}
