//! Rotation backends
//!
//! Every backend implements the same [`ShiftEngine`] contract and must
//! produce identical output; they differ only in how the work is done.
//!
//! - [`ReferenceEngine`] - deque-based rotation, per-byte rank computation,
//!   fully sequential
//! - [`RapidEngine`] - ring-buffer rotation, table-driven collation and
//!   rayon parallelism for large inputs

pub mod rapid;
pub mod reference;

pub use rapid::RapidEngine;
pub use reference::ReferenceEngine;

use crate::index::types::{Line, Rotation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability set shared by all rotation backends
pub trait ShiftEngine: Send + Sync {
    /// Short backend name for logs and config
    fn name(&self) -> &'static str;

    /// All rotations of `words`, rotation 0 first
    fn rotations(&self, words: &[String]) -> Vec<String>;

    /// Rotations of each line, one pool per line, in line order
    fn rotate_lines(&self, lines: &[Line]) -> Vec<Vec<String>> {
        lines.iter().map(|line| self.rotations(line.words())).collect()
    }

    /// Stable sort under the collation order
    fn sort(&self, rotations: &mut [Rotation]);

    /// Positions in `0..len` for which `pred` holds, ascending
    fn scan(&self, len: usize, pred: &(dyn Fn(usize) -> bool + Sync)) -> Vec<usize> {
        (0..len).filter(|&i| pred(i)).collect()
    }
}

/// Backend selection
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Reference,
    #[default]
    Rapid,
}

impl Backend {
    /// Engine implementing this backend
    pub fn engine(self, parallel_threshold: usize) -> Box<dyn ShiftEngine> {
        match self {
            Backend::Reference => Box::new(ReferenceEngine),
            Backend::Rapid => Box::new(RapidEngine::new(parallel_threshold)),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Reference => f.write_str("reference"),
            Backend::Rapid => f.write_str("rapid"),
        }
    }
}
