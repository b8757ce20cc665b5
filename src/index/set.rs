//! Sorted rotations of a single line

use crate::engine::{Backend, ShiftEngine};
use crate::error::{Result, ShiftError};
use crate::index::types::{Line, LineId, Marker, Rotation};
use std::fmt;

/// All rotations of one line, sorted under the collation order
#[derive(Debug, Clone)]
pub struct RotationSet {
    line: Line,
    rotations: Vec<Rotation>,
}

impl RotationSet {
    /// Rotate and sort `text` with the default backend, no URL detection
    pub fn new(text: &str) -> Self {
        let engine = Backend::default().engine(usize::MAX);
        Self::from_line(Line::parse(text), 0, engine.as_ref())
    }

    /// Build the set for `line`, tagging rotations with `id`
    pub fn from_line(line: Line, id: LineId, engine: &dyn ShiftEngine) -> Self {
        let raw = engine.rotations(line.words());
        Self::from_raw(line, id, raw, engine)
    }

    /// Build the set from already generated rotations
    pub(crate) fn from_raw(
        line: Line,
        id: LineId,
        raw: Vec<String>,
        engine: &dyn ShiftEngine,
    ) -> Self {
        let mut rotations: Vec<Rotation> =
            raw.into_iter().map(|text| Rotation::new(text, id)).collect();
        engine.sort(&mut rotations);
        Self { line, rotations }
    }

    /// Rotation at `index`, failing outside `0..len()`
    pub fn get(&self, index: usize) -> Result<&Rotation> {
        self.rotations.get(index).ok_or(ShiftError::OutOfRange {
            index,
            len: self.rotations.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.rotations.iter().map(Rotation::as_str)
    }

    pub fn rotations(&self) -> &[Rotation] {
        &self.rotations
    }

    pub fn len(&self) -> usize {
        self.rotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn marker(&self) -> Option<&Marker> {
        self.line.marker()
    }

    /// Rotation texts as owned strings
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a RotationSet {
    type Item = &'a Rotation;
    type IntoIter = std::slice::Iter<'a, Rotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.rotations.iter()
    }
}

/// Compact rendering: one rotation per line, marker appended when present
impl fmt::Display for RotationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rotation in &self.rotations {
            match self.marker() {
                Some(marker) => writeln!(f, "{} {}", rotation, marker)?,
                None => writeln!(f, "{}", rotation)?,
            }
        }
        Ok(())
    }
}
