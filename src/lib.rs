//! # kwic - Keyword-in-context rotation index
//!
//! kwic produces every circular word shift of each input line and sorts
//! them under a case-interleaving collation (`a < A < b < B < ...`), so a
//! reader can find a line by any of its words. The sorted rotations can be
//! searched by keyword or regex and persisted as a flat file.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Rotation generation, per-line sets and the multi-line index
//! - [`engine`] - Interchangeable rotation backends (reference and rapid)
//! - [`query`] - Query parsing and keyword/regex search
//! - [`output`] - Compact and verbose rendering, colored or plain
//! - [`repl`] - Interactive console
//! - [`selfcheck`] - Built-in calibration cases
//! - [`utils`] - Collation, tokenizing, ingestion and configuration
//!
//! ## Quick Start
//!
//! ```
//! use kwic::index::{BuildOptions, RotationIndex, RotationSet};
//! use kwic::query::{SearchOutcome, Searcher};
//!
//! let set = RotationSet::new("a A b B p P");
//! assert_eq!(set.get(1).unwrap().as_str(), "A b B p P a");
//!
//! let index = RotationIndex::build(
//!     ["Once upon a time", "It is my shift now"],
//!     BuildOptions::merged(),
//! );
//! assert_eq!(index.all_len(), 9);
//!
//! let outcome = Searcher::new(&index).search(&["shift"], false).unwrap();
//! assert_eq!(outcome.len(), 5);
//! assert!(matches!(outcome, SearchOutcome::Found(_)));
//! ```
//!
//! ## Performance
//!
//! Collation ranks come from a 256-entry table built at compile time, each
//! rotation step is O(1) over a ring of words, and the rapid backend spreads
//! line batches, large sorts and scans over rayon's thread pool.

pub mod engine;
pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod repl;
pub mod selfcheck;
pub mod utils;

pub use engine::{Backend, ShiftEngine};
pub use error::{Result, ShiftError};
pub use index::{BuildOptions, FlatIndex, IndexMode, RotationIndex, RotationSet};
pub use query::{SearchOutcome, SearchQuery, Searcher};
