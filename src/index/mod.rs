//! Rotation generation, sorted rotation sets and multi-line indexes
//!
//! - `rotation`: ring-buffer generator producing every word rotation
//! - `set`: sorted rotations of a single line
//! - `builder`: per-line and merged indexes over many lines
//! - `flat`: one-rotation-per-line persistence
//! - `types`: lines, markers, rotations and build options

pub mod builder;
pub mod flat;
pub mod rotation;
pub mod set;
pub mod types;

pub use builder::{RotationIndex, RotationIndexBuilder};
pub use flat::{write_flat, FlatIndex};
pub use rotation::{RotationIter, WordRing};
pub use set::RotationSet;
pub use types::*;
