use crate::engine::Backend;
use crate::utils::tokenizer::{split_trailing_url, split_words};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a line among the non-blank lines of an index (0-based)
pub type LineId = usize;

/// Rendering of a line that was scanned for a URL but had none
pub const ABSENT_MARKER: &str = "<None>";

/// Trailing, non-rotating token attached to every rotation of a line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    /// URL detected as the line's last token
    Url(String),
    /// The line was scanned but carried no URL
    Absent,
}

impl Marker {
    pub fn as_str(&self) -> &str {
        match self {
            Marker::Url(url) => url,
            Marker::Absent => ABSENT_MARKER,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Marker::Url(url) => Some(url),
            Marker::Absent => None,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input line, split into words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
    words: Vec<String>,
    marker: Option<Marker>,
}

impl Line {
    /// Parse a line without URL detection
    pub fn parse(text: &str) -> Self {
        Self::new(text, false)
    }

    /// Parse a line, optionally detaching a trailing URL as its marker
    pub fn new(text: &str, extract_urls: bool) -> Self {
        let text = text.trim();

        if !extract_urls {
            return Self {
                text: text.to_string(),
                words: split_words(text),
                marker: None,
            };
        }

        let (desc, url) = split_trailing_url(text);
        let marker = match url {
            Some(url) => Marker::Url(url.to_string()),
            None => Marker::Absent,
        };

        Self {
            text: text.to_string(),
            words: split_words(desc),
            marker: Some(marker),
        }
    }

    /// The trimmed original text, URL included
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    /// A blank line has no words and yields no rotations
    pub fn is_blank(&self) -> bool {
        self.words.is_empty()
    }
}

/// A single rotation and the line it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    pub text: String,
    pub line: LineId,
}

impl Rotation {
    pub fn new(text: String, line: LineId) -> Self {
        Self { text, line }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// How rotations from several lines are organized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexMode {
    /// One sorted set per line
    #[default]
    PerLine,
    /// All rotations pooled into one sorted sequence
    Merged,
}

/// Options for building a rotation index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOptions {
    #[serde(default)]
    pub mode: IndexMode,
    /// Detach a trailing URL from each line as its marker (default: false)
    #[serde(default)]
    pub extract_urls: bool,
    #[serde(default)]
    pub backend: Backend,
    /// Work size above which the rapid backend goes parallel
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

pub(crate) fn default_parallel_threshold() -> usize {
    100_000
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            mode: IndexMode::default(),
            extract_urls: false,
            backend: Backend::default(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl BuildOptions {
    pub fn merged() -> Self {
        Self {
            mode: IndexMode::Merged,
            ..Default::default()
        }
    }

    pub fn with_urls(mut self) -> Self {
        self.extract_urls = true;
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }
}
