//! Line tokenization: word splitting and trailing URL detection

use regex::Regex;
use std::sync::LazyLock;

/// A trailing token is treated as a URL only if it matches this pattern
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?|ftp)://[^\s/$.?#].[^\s]*$").expect("URL pattern is valid")
});

/// Split a line into words on single spaces.
///
/// Consecutive spaces produce empty words; they are kept so every rotation
/// reproduces the original spacing. A blank line has no words.
pub fn split_words(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(' ').map(str::to_string).collect()
}

/// Check whether a single token looks like a URL
pub fn is_url(token: &str) -> bool {
    URL_PATTERN.is_match(token)
}

/// Split a trimmed line into its description and trailing URL.
///
/// Only the last space-separated token is considered, and only when the
/// line has at least two tokens.
pub fn split_trailing_url(text: &str) -> (&str, Option<&str>) {
    match text.rsplit_once(' ') {
        Some((desc, last)) if is_url(last) => (desc, Some(last)),
        _ => (text, None),
    }
}
