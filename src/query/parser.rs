use crate::error::{Result, ShiftError};
use serde::{Deserialize, Serialize};

/// A search request over a rotation set or index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchQuery {
    /// Every keyword must match a distinct word of the rotation
    Keywords(Vec<String>),
    /// Regex that must match somewhere in the rotation
    Pattern(String),
}

impl SearchQuery {
    pub fn keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SearchQuery::Keywords(keywords.into_iter().map(Into::into).collect())
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        SearchQuery::Pattern(pattern.into())
    }

    /// Reject queries that cannot be searched for
    pub fn validate(&self) -> Result<()> {
        match self {
            SearchQuery::Keywords(keywords) => validate_keywords(keywords),
            SearchQuery::Pattern(pattern) => validate_pattern(pattern),
        }
    }
}

pub(crate) fn validate_keywords<S: AsRef<str>>(keywords: &[S]) -> Result<()> {
    if keywords.is_empty() {
        return Err(ShiftError::InvalidQuery("no keywords given".to_string()));
    }
    if keywords.iter().any(|k| k.as_ref().is_empty()) {
        return Err(ShiftError::InvalidQuery("keywords must not be empty".to_string()));
    }
    Ok(())
}

pub(crate) fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        return Err(ShiftError::InvalidQuery("pattern must not be empty".to_string()));
    }
    Ok(())
}

/// Parse user input into a query.
///
/// `re:PATTERN` or `re:/PATTERN/` selects a regex; anything else is a list
/// of whitespace-separated keywords.
pub fn parse_query(input: &str) -> Result<SearchQuery> {
    let input = input.trim();

    let query = if let Some(rest) = input.strip_prefix("re:") {
        let pattern = rest
            .strip_prefix('/')
            .and_then(|p| p.strip_suffix('/'))
            .unwrap_or(rest);
        SearchQuery::pattern(pattern)
    } else {
        SearchQuery::keywords(input.split_whitespace())
    };

    query.validate()?;
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords() {
        let query = parse_query("  shift  now ").unwrap();
        assert_eq!(query, SearchQuery::keywords(["shift", "now"]));
    }

    #[test]
    fn test_parse_regex() {
        assert_eq!(parse_query("re:sh.ft").unwrap(), SearchQuery::pattern("sh.ft"));
        assert_eq!(parse_query("re:/\\d+/").unwrap(), SearchQuery::pattern("\\d+"));
        // A lone slash is part of the pattern
        assert_eq!(parse_query("re:/").unwrap(), SearchQuery::pattern("/"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(parse_query(""), Err(ShiftError::InvalidQuery(_))));
        assert!(matches!(parse_query("   "), Err(ShiftError::InvalidQuery(_))));
        assert!(matches!(parse_query("re:"), Err(ShiftError::InvalidQuery(_))));
        assert!(matches!(parse_query("re://"), Err(ShiftError::InvalidQuery(_))));
    }

    #[test]
    fn test_validate_keywords() {
        assert!(SearchQuery::keywords(Vec::<String>::new()).validate().is_err());
        assert!(SearchQuery::keywords(["ok", ""]).validate().is_err());
        assert!(SearchQuery::keywords(["ok"]).validate().is_ok());
    }
}
