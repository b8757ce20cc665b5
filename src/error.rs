//! Error types for rotation building and searching

use thiserror::Error;

/// Errors reported by the rotation index and the search layer
#[derive(Debug, Error)]
pub enum ShiftError {
    #[error("index {index} is out of range for {len} rotations")]
    OutOfRange { index: usize, len: usize },

    #[error("line {index} is out of range for {len} lines")]
    LineOutOfRange { index: usize, len: usize },

    #[error("per-line access is unavailable on a merged index")]
    Merged,

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("`{pattern}` is not a valid regular expression")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("`{pattern}` compiles to more than {limit} bytes")]
    PatternTooBig { pattern: String, limit: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl ShiftError {
    /// Build the error for a failed regex compilation
    pub(crate) fn from_regex(pattern: &str, err: regex::Error) -> Self {
        match err {
            regex::Error::CompiledTooBig(limit) => ShiftError::PatternTooBig {
                pattern: pattern.to_string(),
                limit,
            },
            source => ShiftError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            },
        }
    }

    /// Whether the caller supplied an unusable query
    pub fn is_invalid_query(&self) -> bool {
        matches!(
            self,
            ShiftError::InvalidQuery(_)
                | ShiftError::InvalidPattern { .. }
                | ShiftError::PatternTooBig { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ShiftError>;
