//! Utility functions shared by the index, the engines and the binary.
//!
//! ## Modules
//!
//! - [`collation`] - Case-interleaving byte ranks and the rotation comparator
//! - [`tokenizer`] - Word splitting and trailing URL detection
//! - [`ingest`] - Raw text and files into trimmed, non-blank lines
//! - [`app_data`] - Configuration file management
//! - [`progress`] - Optional progress spinners
//!
//! ## Key Functions
//!
//! ```no_run
//! use kwic::utils::{compare_rotations, split_lines};
//! use std::cmp::Ordering;
//!
//! // Lowercase sorts right before its uppercase pair
//! assert_eq!(compare_rotations("a b", "A b"), Ordering::Less);
//!
//! // Blank lines are dropped, the rest trimmed
//! assert_eq!(split_lines(" one \n\n two"), vec!["one", "two"]);
//! ```

pub mod app_data;
pub mod collation;
pub mod ingest;
pub mod progress;
pub mod tokenizer;

pub use app_data::*;
pub use collation::*;
pub use ingest::*;
pub use tokenizer::*;
