use crate::engine::{Backend, ShiftEngine};
use crate::error::{Result, ShiftError};
use crate::index::types::default_parallel_threshold;
use crate::index::{FlatIndex, RotationIndex, RotationSet};
use crate::query::parser::{validate_keywords, validate_pattern, SearchQuery};
use ahash::AHashMap;
use regex::Regex;
use serde::Serialize;

/// How a searchable target splits a rotation into words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordSplit {
    /// Single spaces, as rotations are joined in memory
    Space,
    /// Any whitespace run, as lines are re-read from a flat file
    Whitespace,
}

/// Anything whose rotations can be searched by position
pub trait Searchable: Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rotation text at `index` (`index < len()`)
    fn rotation_text(&self, index: usize) -> &str;

    /// Rendered marker of the rotation's line, if the line carries one
    fn marker_text(&self, _index: usize) -> Option<&str> {
        None
    }

    fn word_split(&self) -> WordSplit {
        WordSplit::Space
    }
}

impl Searchable for RotationSet {
    fn len(&self) -> usize {
        RotationSet::len(self)
    }

    fn rotation_text(&self, index: usize) -> &str {
        self.rotations()[index].as_str()
    }

    fn marker_text(&self, _index: usize) -> Option<&str> {
        self.marker().map(|m| m.as_str())
    }
}

impl Searchable for RotationIndex {
    fn len(&self) -> usize {
        self.all_len()
    }

    fn rotation_text(&self, index: usize) -> &str {
        self.get(index).map(|r| r.as_str()).unwrap_or_default()
    }

    fn marker_text(&self, index: usize) -> Option<&str> {
        let rotation = self.get(index).ok()?;
        self.marker_of(rotation).map(|m| m.as_str())
    }
}

impl Searchable for FlatIndex {
    fn len(&self) -> usize {
        FlatIndex::len(self)
    }

    fn rotation_text(&self, index: usize) -> &str {
        self.get(index).unwrap_or_default()
    }

    fn marker_text(&self, index: usize) -> Option<&str> {
        self.marker(index)
    }

    fn word_split(&self) -> WordSplit {
        WordSplit::Whitespace
    }
}

/// Result of a valid query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "indices", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Ascending positions of the matching rotations
    Found(Vec<usize>),
    NoMatch,
}

impl SearchOutcome {
    fn from_indices(indices: Vec<usize>) -> Self {
        if indices.is_empty() {
            SearchOutcome::NoMatch
        } else {
            SearchOutcome::Found(indices)
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn indices(&self) -> &[usize] {
        match self {
            SearchOutcome::Found(indices) => indices,
            SearchOutcome::NoMatch => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.indices().len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices().is_empty()
    }
}

/// Keyword and regex search over a previously built target
pub struct Searcher<'a> {
    target: &'a dyn Searchable,
    engine: Box<dyn ShiftEngine>,
}

impl<'a> Searcher<'a> {
    pub fn new(target: &'a dyn Searchable) -> Self {
        Self::with_backend(target, Backend::default(), default_parallel_threshold())
    }

    pub fn with_backend(
        target: &'a dyn Searchable,
        backend: Backend,
        parallel_threshold: usize,
    ) -> Self {
        Self {
            target,
            engine: backend.engine(parallel_threshold),
        }
    }

    /// Run a parsed query
    pub fn run(&self, query: &SearchQuery, all: bool) -> Result<SearchOutcome> {
        match query {
            SearchQuery::Keywords(keywords) => self.search(keywords, all),
            SearchQuery::Pattern(pattern) => self.regex_search(pattern, all),
        }
    }

    /// Rotations containing every keyword as a distinct word.
    ///
    /// Keywords form a multiset: `["a", "a"]` needs two `a` words. With
    /// `all`, the line's marker counts as one more trailing word that
    /// satisfies a keyword it contains.
    pub fn search<S: AsRef<str>>(&self, keywords: &[S], all: bool) -> Result<SearchOutcome> {
        validate_keywords(keywords)?;

        if self.target.is_empty() {
            return Ok(SearchOutcome::NoMatch);
        }

        let mut required: AHashMap<&str, usize> = AHashMap::with_capacity(keywords.len());
        for keyword in keywords {
            *required.entry(keyword.as_ref()).or_insert(0) += 1;
        }

        let target = self.target;
        let split = target.word_split();
        let total = keywords.len();
        let indices = self.engine.scan(target.len(), &|i| {
            let marker = if all { target.marker_text(i) } else { None };
            keywords_match(target.rotation_text(i), split, &required, total, marker)
        });

        log::debug!(
            "keyword search for {} keyword(s) matched {} of {} rotations",
            total,
            indices.len(),
            target.len()
        );

        Ok(SearchOutcome::from_indices(indices))
    }

    /// Rotations matched anywhere by `pattern`.
    ///
    /// With `all`, the line's marker is appended to the searched text.
    pub fn regex_search(&self, pattern: &str, all: bool) -> Result<SearchOutcome> {
        validate_pattern(pattern)?;
        let re = Regex::new(pattern).map_err(|e| ShiftError::from_regex(pattern, e))?;

        if self.target.is_empty() {
            return Ok(SearchOutcome::NoMatch);
        }

        let target = self.target;
        let indices = self.engine.scan(target.len(), &|i| {
            let text = target.rotation_text(i);
            match target.marker_text(i) {
                Some(marker) if all => re.is_match(&format!("{} {}", text, marker)),
                _ => re.is_match(text),
            }
        });

        log::debug!(
            "regex `{}` matched {} of {} rotations",
            pattern,
            indices.len(),
            target.len()
        );

        Ok(SearchOutcome::from_indices(indices))
    }
}

/// Greedy multiset match of `required` against the words of `text`.
///
/// Each word satisfies at most one outstanding keyword it equals. The
/// marker, when given, is consulted only after the words and can satisfy
/// a single remaining keyword, so marker-only matches never hide a match
/// the words alone provide.
fn keywords_match(
    text: &str,
    split: WordSplit,
    required: &AHashMap<&str, usize>,
    total: usize,
    marker: Option<&str>,
) -> bool {
    let mut outstanding = required.clone();
    let mut remaining = total;

    let mut satisfy = |word: &str| {
        if let Some(count) = outstanding.get_mut(word) {
            if *count > 0 {
                *count -= 1;
                remaining -= 1;
            }
        }
        remaining == 0
    };

    let done = match split {
        WordSplit::Space => text.split(' ').any(&mut satisfy),
        WordSplit::Whitespace => text.split_whitespace().any(&mut satisfy),
    };
    if done {
        return true;
    }

    match marker {
        Some(marker) if remaining == 1 => outstanding
            .iter()
            .any(|(keyword, &count)| count > 0 && marker.contains(keyword)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::BuildOptions;
    use std::io::Cursor;

    fn url_set() -> RotationSet {
        let index = RotationIndex::build(
            ["Search engine http://www.baidu.com"],
            BuildOptions::default().with_urls(),
        );
        index.line(0).unwrap().clone()
    }

    #[test]
    fn test_keyword_search() {
        let set = RotationSet::new("It is my shift now");
        let searcher = Searcher::new(&set);

        let outcome = searcher.search(&["shift"], false).unwrap();
        assert_eq!(outcome.len(), 5);

        let outcome = searcher.search(&["shift", "now"], false).unwrap();
        assert_eq!(outcome.len(), 5);

        let outcome = searcher.search(&["absent"], false).unwrap();
        assert_eq!(outcome, SearchOutcome::NoMatch);
    }

    #[test]
    fn test_keyword_multiset() {
        let set = RotationSet::new("a b a");
        let searcher = Searcher::new(&set);
        assert!(searcher.search(&["a", "a"], false).unwrap().is_match());
        assert!(!searcher.search(&["b", "b"], false).unwrap().is_match());
        assert!(!searcher.search(&["a", "a", "a"], false).unwrap().is_match());
    }

    #[test]
    fn test_keywords_match_whole_words_only() {
        let set = RotationSet::new("shifting words");
        let searcher = Searcher::new(&set);
        assert!(!searcher.search(&["shift"], false).unwrap().is_match());
    }

    #[test]
    fn test_url_marker_suppression() {
        let set = url_set();
        let searcher = Searcher::new(&set);

        let with_urls = searcher.search(&["www"], true).unwrap();
        assert_eq!(with_urls, SearchOutcome::Found(vec![0, 1]));

        let without = searcher.search(&["www"], false).unwrap();
        assert_eq!(without, SearchOutcome::NoMatch);
    }

    #[test]
    fn test_marker_satisfies_only_one_keyword() {
        let set = url_set();
        let searcher = Searcher::new(&set);
        // "engine" from the words, "baidu" from the marker
        assert!(searcher.search(&["engine", "baidu"], true).unwrap().is_match());
        // Both keywords would need the marker
        assert!(!searcher.search(&["www", "baidu"], true).unwrap().is_match());
    }

    #[test]
    fn test_word_match_wins_without_marker() {
        let set = url_set();
        let searcher = Searcher::new(&set);
        let outcome = searcher.search(&["Search"], false).unwrap();
        assert_eq!(outcome.len(), 2);
    }

    #[test]
    fn test_regex_search() {
        let set = RotationSet::new("A simple test string");
        let searcher = Searcher::new(&set);

        let outcome = searcher.regex_search("^s", false).unwrap();
        assert_eq!(outcome, SearchOutcome::Found(vec![1, 2]));

        let outcome = searcher.regex_search("string A", false).unwrap();
        assert_eq!(outcome, SearchOutcome::Found(vec![1, 2, 3]));

        assert_eq!(searcher.regex_search("xyz", false).unwrap(), SearchOutcome::NoMatch);
    }

    #[test]
    fn test_regex_marker_suppression() {
        let set = url_set();
        let searcher = Searcher::new(&set);
        assert_eq!(searcher.regex_search("baidu", true).unwrap().len(), 2);
        assert!(!searcher.regex_search("baidu", false).unwrap().is_match());
        // The marker sits after the rotation
        assert_eq!(
            searcher.regex_search(r"Search engine http", true).unwrap(),
            SearchOutcome::Found(vec![1])
        );
    }

    #[test]
    fn test_absent_marker_text() {
        let index = RotationIndex::build(["no link here"], BuildOptions::merged().with_urls());
        let searcher = Searcher::new(&index);
        assert_eq!(searcher.regex_search("<None>$", true).unwrap().len(), 3);
        assert!(!searcher.regex_search("<None>", false).unwrap().is_match());
    }

    #[test]
    fn test_invalid_queries() {
        let set = RotationSet::new("some words");
        let searcher = Searcher::new(&set);

        let empty: [&str; 0] = [];
        assert!(matches!(searcher.search(&empty, false), Err(ShiftError::InvalidQuery(_))));
        assert!(matches!(searcher.search(&[""], false), Err(ShiftError::InvalidQuery(_))));
        assert!(matches!(searcher.regex_search("", false), Err(ShiftError::InvalidQuery(_))));
        assert!(matches!(
            searcher.regex_search("(open", false),
            Err(ShiftError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_empty_target_is_no_match() {
        let index = RotationIndex::build(Vec::<String>::new(), BuildOptions::merged());
        let searcher = Searcher::new(&index);
        assert_eq!(searcher.search(&["any"], true).unwrap(), SearchOutcome::NoMatch);
        assert_eq!(searcher.regex_search(".", true).unwrap(), SearchOutcome::NoMatch);
        // Invalid queries are still reported on an empty target
        assert!(searcher.regex_search("", true).is_err());
    }

    #[test]
    fn test_flat_index_matches_in_memory() {
        let index = RotationIndex::build(
            ["Once upon a time", "It is my shift now", "a  spaced   line"],
            BuildOptions::merged(),
        );
        let mut buf = Vec::new();
        crate::index::write_flat(&index, &mut buf).unwrap();
        let flat = FlatIndex::read(Cursor::new(buf)).unwrap();

        for keywords in [vec!["a"], vec!["spaced", "line"], vec!["my", "now"], vec!["nope"]] {
            let in_memory = Searcher::new(&index).search(&keywords, false).unwrap();
            let on_disk = Searcher::new(&flat).search(&keywords, false).unwrap();
            assert_eq!(in_memory, on_disk, "{keywords:?}");
        }
    }

    #[test]
    fn test_flat_index_keeps_markers() {
        let index = RotationIndex::build(
            ["Search engine http://www.baidu.com", "plain words"],
            BuildOptions::merged().with_urls(),
        );
        let mut buf = Vec::new();
        crate::index::write_flat(&index, &mut buf).unwrap();
        let flat = FlatIndex::read(Cursor::new(buf)).unwrap();
        assert_eq!(flat.len(), index.all_len());

        for all in [false, true] {
            for keywords in [
                vec!["http://www.baidu.com"],
                vec!["<None>"],
                vec!["www"],
                vec!["engine", "baidu"],
                vec!["plain", "None"],
                vec!["words"],
            ] {
                let in_memory = Searcher::new(&index).search(&keywords, all).unwrap();
                let on_disk = Searcher::new(&flat).search(&keywords, all).unwrap();
                assert_eq!(in_memory, on_disk, "{keywords:?} all={all}");
            }
            assert_eq!(
                Searcher::new(&index).regex_search("baidu", all).unwrap(),
                Searcher::new(&flat).regex_search("baidu", all).unwrap()
            );
        }

        let searcher = Searcher::new(&flat);
        assert_eq!(searcher.search(&["<None>"], false).unwrap(), SearchOutcome::NoMatch);
        assert!(searcher.search(&["www"], true).unwrap().is_match());
    }

    #[test]
    fn test_backends_agree() {
        let index = RotationIndex::build(
            ["one two three", "two three four", "three four five"],
            BuildOptions::merged(),
        );
        let reference = Searcher::with_backend(&index, Backend::Reference, 0);
        let rapid = Searcher::with_backend(&index, Backend::Rapid, 0);
        assert_eq!(
            reference.search(&["three", "two"], false).unwrap(),
            rapid.search(&["three", "two"], false).unwrap()
        );
        assert_eq!(
            reference.regex_search("^t", false).unwrap(),
            rapid.regex_search("^t", false).unwrap()
        );
    }

    #[test]
    fn test_run_dispatch() {
        let set = RotationSet::new("x y");
        let searcher = Searcher::new(&set);
        assert!(searcher.run(&SearchQuery::keywords(["x"]), false).unwrap().is_match());
        assert!(searcher.run(&SearchQuery::pattern("y x"), false).unwrap().is_match());
    }

    #[test]
    fn test_outcome_json() {
        let json = serde_json::to_string(&SearchOutcome::Found(vec![1, 3])).unwrap();
        assert_eq!(json, r#"{"status":"found","indices":[1,3]}"#);
        let json = serde_json::to_string(&SearchOutcome::NoMatch).unwrap();
        assert_eq!(json, r#"{"status":"no_match"}"#);
    }
}
