//! DuckDuckGo search provider — the primary upstream.
//!
//! Uses the HTML-only version at `https://html.duckduckgo.com/html/`
//! which requires no JavaScript. DuckDuckGo degrades gracefully when it
//! blocks a client: it returns HTTP 200 with a generic landing page
//! instead of an error, so the zero-results-on-large-body soft-block
//! classification matters most here.

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::extract;
use crate::governor::RequestGovernor;
use crate::http;
use crate::provider::{classify_empty_response, ProviderBackend};
use crate::types::{DateFilter, Provider, SearchResult};
use scraper::{Html, Selector};
use std::sync::Arc;
use url::Url;

/// Keywords extracted per result.
const KEYWORD_LIMIT: usize = 5;

/// DuckDuckGo HTML search scraper.
///
/// Preferred provider — the HTML endpoint is the most tolerant of
/// automated requests. Uses a POST request so the query never appears
/// in a URL path.
pub struct DuckDuckGoProvider {
    governor: Arc<RequestGovernor>,
    config: SearchConfig,
}

impl DuckDuckGoProvider {
    /// Create a provider sharing the given pacing governor.
    pub fn new(governor: Arc<RequestGovernor>, config: SearchConfig) -> Self {
        Self { governor, config }
    }

    /// Reformat an enhanced query for DuckDuckGo submission.
    ///
    /// The HTML endpoint mishandles parenthesised operator groups, so
    /// the parentheses around a `site:` OR-group are stripped. Every
    /// `site:` target must survive unchanged.
    pub(crate) fn shape_query(query: &str) -> String {
        let Some(start) = query.find("(site:") else {
            return query.to_owned();
        };
        let Some(rel_end) = query[start..].find(')') else {
            return query.to_owned();
        };
        let end = start + rel_end;

        let mut shaped = String::with_capacity(query.len());
        shaped.push_str(&query[..start]);
        shaped.push_str(&query[start + 1..end]);
        shaped.push_str(&query[end + 1..]);
        shaped
    }

    /// Extract the actual URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps URLs like: `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`
    /// We parse out the `uddg` query parameter and URL-decode it.
    fn extract_url(href: &str) -> Option<String> {
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&full_href).ok()?;

        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(full_href)
        }
    }

    /// Map a recency filter to DuckDuckGo's `df` parameter.
    fn df_param(filter: DateFilter) -> &'static str {
        match filter {
            DateFilter::Day => "d",
            DateFilter::Week => "w",
            DateFilter::Month => "m",
            DateFilter::Year => "y",
        }
    }
}

impl ProviderBackend for DuckDuckGoProvider {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        date_filter: Option<DateFilter>,
    ) -> Result<Vec<SearchResult>> {
        let shaped = Self::shape_query(query);
        tracing::trace!(query = %shaped, "DuckDuckGo search");

        self.governor.admit().await;
        self.governor.jitter().await;

        let client = http::build_client(&self.config, self.governor.identity())?;

        let mut params = vec![("q", shaped.as_str())];
        if let Some(filter) = date_filter {
            params.push(("df", Self::df_param(filter)));
        }

        let mut request = client
            .post("https://html.duckduckgo.com/html/")
            .form(&params)
            .header("Accept-Language", "en-US,en;q=0.9");
        for (name, value) in self.governor.extra_headers() {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("DuckDuckGo request failed: {e}")))?;

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
            .map_err(|e| SearchError::Http(format!("DuckDuckGo response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "DuckDuckGo response received");

        let results = parse_duckduckgo_html(&html, max_results)?;
        if results.is_empty() {
            return classify_empty_response(&html);
        }
        Ok(results)
    }

    fn provider(&self) -> Provider {
        Provider::DuckDuckGo
    }
}

/// Parse DuckDuckGo HTML response into search results.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_duckduckgo_html(
    html: &str,
    max_results: usize,
) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse(
        ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)",
    )
    .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse(".result__a")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".result__snippet")
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

        let href = match title_el.value().attr("href") {
            Some(h) => h,
            None => continue,
        };

        let url = match DuckDuckGoProvider::extract_url(href) {
            Some(u) => u,
            None => continue,
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

    tracing::debug!(count = results.len(), "DuckDuckGo results parsed");
    Ok(results)
}
