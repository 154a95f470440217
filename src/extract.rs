//! Keyword extraction and summarisation for parsed search results.
//!
//! Pure, stateless text functions applied by each provider after parsing
//! raw results: frequency-ranked keyword extraction with stop-word
//! filtering, and a bounded snippet-based summary.

/// Maximum length of a generated summary, in characters.
const MAX_SUMMARY_CHARS: usize = 300;

/// Minimum length for a word to be considered a keyword candidate.
const MIN_KEYWORD_LEN: usize = 3;

/// Common English words excluded from keyword extraction.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "her", "was", "one", "our",
    "out", "his", "has", "had", "how", "who", "its", "this", "that", "with", "from", "they",
    "have", "will", "your", "what", "when", "which", "their", "would", "there", "about", "more",
    "than", "them", "been", "into", "also", "other", "some", "such", "only", "over", "most",
];

/// Extract up to `limit` keywords from a title and body text.
///
/// Words are lowercased, stripped of punctuation, filtered against a
/// stop-word list, and ranked by frequency. Title words get a 2x
/// frequency boost since titles are denser signals than snippets.
/// Ties break by first appearance, so output is deterministic.
pub fn extract_keywords(title: &str, text: &str, limit: usize) -> Vec<String> {
    let mut frequency: Vec<(String, usize)> = Vec::new();

    let mut tally = |source: &str, weight: usize| {
        for raw in source.split_whitespace() {
            let word: String = raw
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            if word.len() < MIN_KEYWORD_LEN || STOP_WORDS.contains(&word.as_str()) {
                continue;
            }
            match frequency.iter_mut().find(|(w, _)| *w == word) {
                Some((_, count)) => *count += weight,
                None => frequency.push((word, weight)),
            }
        }
    };

    tally(title, 2);
    tally(text, 1);

    // Stable sort keeps first-appearance order among equal counts.
    frequency.sort_by(|a, b| b.1.cmp(&a.1));
    frequency.into_iter().take(limit).map(|(w, _)| w).collect()
}

/// Build a short summary from a result's title, snippet text, and URL.
///
/// Prefers the snippet; falls back to the title, then to the URL host.
/// Output is whitespace-normalised and truncated at a word boundary.
pub fn summarize(title: &str, text: &str, url: &str) -> String {
    let normalised = normalise_whitespace(text);
    if !normalised.is_empty() {
        return truncate_at_boundary(&normalised, MAX_SUMMARY_CHARS);
    }

    let title = normalise_whitespace(title);
    if !title.is_empty() {
        return truncate_at_boundary(&title, MAX_SUMMARY_CHARS);
    }

    format!("Content at {url}")
}

/// Collapse runs of whitespace into single spaces and trim the ends.
fn normalise_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars`, cutting at the last word boundary
/// and appending an ellipsis when anything was removed.
fn truncate_at_boundary(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let truncated: String = text.chars().take(max_chars).collect();
    match truncated.rfind(' ') {
        Some(pos) if pos > 0 => format!("{}…", &truncated[..pos]),
        _ => format!("{truncated}…"),
    }
}
