//! Query enhancement via a keyword→site mapping.
//!
//! Augments raw queries with `site:` targeting before they reach the
//! orchestrator: a query mentioning a known topic keyword gets a
//! parenthesised OR-group of authoritative sites appended. Best-effort —
//! any internal error degrades to returning the original query.

use crate::config::SearchConfig;
use std::collections::BTreeMap;
use std::path::Path;

/// Built-in keyword→site mapping used when no file is configured.
const DEFAULT_SITE_MAP: &str = include_str!("default_sites.json");

/// Cap on the number of `site:` targets appended to one query.
const MAX_SITES_PER_QUERY: usize = 3;

/// Maps topic keywords to authoritative sites for query targeting.
///
/// Keys are matched case-insensitively as whole words within the query.
/// The map is ordered so enhancement output is deterministic.
#[derive(Debug, Clone)]
pub struct QueryEnhancer {
    sites: BTreeMap<String, Vec<String>>,
}

impl QueryEnhancer {
    /// Build an enhancer from the configured mapping file, or the
    /// built-in mapping when none is configured.
    ///
    /// A missing or malformed file is logged and degrades to the
    /// built-in mapping — enhancement must never fail the caller.
    pub fn from_config(config: &SearchConfig) -> Self {
        match config.site_map_path {
            Some(ref path) => Self::load(path).unwrap_or_else(|reason| {
                tracing::warn!(path = %path.display(), %reason, "site map unusable, using built-in mapping");
                Self::builtin()
            }),
            None => Self::builtin(),
        }
    }

    /// Build an enhancer from the built-in mapping.
    pub fn builtin() -> Self {
        Self::parse(DEFAULT_SITE_MAP).unwrap_or_else(|_| Self {
            sites: BTreeMap::new(),
        })
    }

    /// Load a keyword→site mapping from a JSON file.
    fn load(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::parse(&raw)
    }

    /// Parse mapping JSON of the form `{"keyword": ["site", ...]}`.
    fn parse(raw: &str) -> Result<Self, String> {
        let sites: BTreeMap<String, Vec<String>> =
            serde_json::from_str(raw).map_err(|e| e.to_string())?;
        let sites = sites
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Ok(Self { sites })
    }

    /// Augment a query with site targeting when it mentions a known keyword.
    ///
    /// Returns the original query unchanged when no keyword matches, when
    /// the query already carries explicit `site:` targeting, or when the
    /// mapping is empty. Matched sites are appended as a parenthesised
    /// OR-group: `query (site:a.com OR site:b.com)`.
    pub fn enhance(&self, query: &str) -> String {
        let trimmed = query.trim();
        if trimmed.is_empty() || trimmed.to_lowercase().contains("site:") {
            return query.to_owned();
        }

        let words: Vec<String> = trimmed
            .to_lowercase()
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_owned())
            .collect();

        let mut targets: Vec<&str> = Vec::new();
        for (keyword, sites) in &self.sites {
            if words.iter().any(|w| w == keyword) {
                for site in sites {
                    if !targets.contains(&site.as_str()) {
                        targets.push(site);
                    }
                }
            }
        }
        targets.truncate(MAX_SITES_PER_QUERY);

        if targets.is_empty() {
            return query.to_owned();
        }

        let group = targets
            .iter()
            .map(|s| format!("site:{s}"))
            .collect::<Vec<_>>()
            .join(" OR ");
        tracing::debug!(query = trimmed, sites = targets.len(), "query enhanced with site targeting");
        format!("{trimmed} ({group})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enhancer_with(map: &str) -> QueryEnhancer {
        QueryEnhancer::parse(map).expect("test map should parse")
    }

    #[test]
    fn builtin_mapping_parses() {
        let enhancer = QueryEnhancer::builtin();
        assert!(!enhancer.sites.is_empty());
    }

    #[test]
    fn matching_keyword_appends_site_group() {
        let enhancer =
            enhancer_with(r#"{"javascript": ["developer.mozilla.org", "stackoverflow.com"]}"#);
        let out = enhancer.enhance("javascript error");
        assert_eq!(
            out,
            "javascript error (site:developer.mozilla.org OR site:stackoverflow.com)"
        );
    }

    #[test]
    fn no_match_returns_original() {
        let enhancer = enhancer_with(r#"{"javascript": ["developer.mozilla.org"]}"#);
        assert_eq!(enhancer.enhance("gardening tips"), "gardening tips");
    }

    #[test]
    fn match_is_case_insensitive() {
        let enhancer = enhancer_with(r#"{"javascript": ["developer.mozilla.org"]}"#);
        let out = enhancer.enhance("JavaScript closures");
        assert!(out.contains("site:developer.mozilla.org"));
    }

    #[test]
    fn existing_site_clause_left_alone() {
        let enhancer = enhancer_with(r#"{"javascript": ["developer.mozilla.org"]}"#);
        let query = "javascript site:example.com";
        assert_eq!(enhancer.enhance(query), query);
    }

    #[test]
    fn whole_word_match_only() {
        let enhancer = enhancer_with(r#"{"java": ["docs.oracle.com"]}"#);
        // "javascript" must not match the "java" keyword.
        assert_eq!(enhancer.enhance("javascript basics"), "javascript basics");
    }

    #[test]
    fn sites_capped_per_query() {
        let enhancer = enhancer_with(
            r#"{"rust": ["a.com", "b.com", "c.com", "d.com", "e.com"]}"#,
        );
        let out = enhancer.enhance("rust lifetimes");
        let count = out.matches("site:").count();
        assert_eq!(count, MAX_SITES_PER_QUERY);
    }

    #[test]
    fn empty_query_unchanged() {
        let enhancer = QueryEnhancer::builtin();
        assert_eq!(enhancer.enhance(""), "");
        assert_eq!(enhancer.enhance("   "), "   ");
    }

    #[test]
    fn malformed_map_degrades_to_builtin() {
        let config = SearchConfig {
            site_map_path: Some("/nonexistent/sites.json".into()),
            ..Default::default()
        };
        let enhancer = QueryEnhancer::from_config(&config);
        assert!(!enhancer.sites.is_empty());
    }

    #[test]
    fn punctuation_adjacent_keyword_matches() {
        let enhancer = enhancer_with(r#"{"python": ["docs.python.org"]}"#);
        let out = enhancer.enhance("python, how do generators work");
        assert!(out.contains("site:docs.python.org"));
    }
}
