//! Flat-file persistence: one rotation per line
//!
//! Each line holds a rotation in its compact rendering. A line's marker, when
//! the index carries one, follows the rotation after a tab, so reading the file
//! back into a [`FlatIndex`] restores it and keyword search treats it exactly
//! as the in-memory index does.

use super::builder::RotationIndex;
use super::types::ABSENT_MARKER;
use crate::error::Result;
use crate::utils::tokenizer::is_url;
use std::io::{BufRead, Write};

const MARKER_SEPARATOR: char = '\t';

/// Write every rotation of `index` as one line
pub fn write_flat<W: Write>(index: &RotationIndex, mut writer: W) -> Result<usize> {
    let mut written = 0;
    for rotation in index.iter() {
        match index.marker_of(rotation) {
            Some(marker) => writeln!(writer, "{}{}{}", rotation, MARKER_SEPARATOR, marker)?,
            None => writeln!(writer, "{}", rotation)?,
        }
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

#[derive(Debug, Clone)]
struct FlatEntry {
    text: String,
    marker: Option<String>,
}

/// Rotations re-read from a flat file
#[derive(Debug, Clone, Default)]
pub struct FlatIndex {
    entries: Vec<FlatEntry>,
}

impl FlatIndex {
    /// Read one rotation per line, skipping blank lines
    pub fn read<R: BufRead>(reader: R) -> Result<Self> {
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let (text, marker) = split_marker(line);
            entries.push(FlatEntry {
                text: text.to_string(),
                marker: marker.map(str::to_string),
            });
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.text.as_str())
    }

    /// Marker stored with the rotation at `index`
    pub fn marker(&self, index: usize) -> Option<&str> {
        self.entries.get(index)?.marker.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.text.as_str())
    }
}

/// Only `<None>` or a URL after the last tab is a marker; any other tab
/// belongs to a word.
fn split_marker(line: &str) -> (&str, Option<&str>) {
    match line.rsplit_once(MARKER_SEPARATOR) {
        Some((text, marker)) if marker == ABSENT_MARKER || is_url(marker) => (text, Some(marker)),
        _ => (line, None),
    }
}
