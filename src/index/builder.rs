//! Rotation index builder
//!
//! Builds the rotations of many lines in one of two layouts:
//! 1. Per-line: an independently sorted [`RotationSet`] for every line
//! 2. Merged: every line's raw rotations pooled and sorted once
//!
//! Blank lines are skipped and contribute nothing to either layout.

use super::set::RotationSet;
use super::types::*;
use crate::engine::ShiftEngine;
use crate::error::{Result, ShiftError};
use std::fmt;
use std::time::Instant;

/// Builder collecting lines before rotation
pub struct RotationIndexBuilder {
    options: BuildOptions,
    lines: Vec<Line>,
    /// Count of blank lines that were dropped
    skipped_count: usize,
}

impl RotationIndexBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            lines: Vec::new(),
            skipped_count: 0,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(BuildOptions::default())
    }

    /// Add a raw line.
    ///
    /// Returns `false` if the line was blank and skipped
    pub fn add_line(&mut self, text: &str) -> bool {
        let line = Line::new(text, self.options.extract_urls);
        if line.is_blank() {
            self.skipped_count += 1;
            return false;
        }
        self.lines.push(line);
        true
    }

    pub fn add_lines<I, S>(&mut self, texts: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for text in texts {
            self.add_line(text.as_ref());
        }
        self
    }

    /// Number of non-blank lines added so far
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Generate and sort all rotations
    pub fn build(self) -> RotationIndex {
        let started = Instant::now();
        let engine = self.options.backend.engine(self.options.parallel_threshold);
        let pools = engine.rotate_lines(&self.lines);

        let layout = match self.options.mode {
            IndexMode::PerLine => Layout::PerLine(build_sets(self.lines, pools, engine.as_ref())),
            IndexMode::Merged => {
                let mut pooled: Vec<Rotation> = pools
                    .into_iter()
                    .enumerate()
                    .flat_map(|(id, raw)| raw.into_iter().map(move |text| Rotation::new(text, id)))
                    .collect();
                // One sort over the whole pool, not a merge of sorted runs
                engine.sort(&mut pooled);
                Layout::Merged {
                    lines: self.lines,
                    rotations: pooled,
                }
            }
        };

        let index = RotationIndex::new(self.options.mode, layout, self.skipped_count);

        log::debug!(
            "{} backend built {} rotations from {} lines ({} blank skipped, {:?} mode) in {:?}",
            engine.name(),
            index.all_len(),
            index.line_count(),
            index.skipped_count,
            index.mode,
            started.elapsed()
        );

        index
    }
}

fn build_sets(lines: Vec<Line>, pools: Vec<Vec<String>>, engine: &dyn ShiftEngine) -> Vec<RotationSet> {
    lines
        .into_iter()
        .zip(pools)
        .enumerate()
        .map(|(id, (line, raw))| RotationSet::from_raw(line, id, raw, engine))
        .collect()
}

#[derive(Debug, Clone)]
enum Layout {
    PerLine(Vec<RotationSet>),
    Merged {
        lines: Vec<Line>,
        rotations: Vec<Rotation>,
    },
}

/// Rotations of many lines, per-line or merged
#[derive(Debug, Clone)]
pub struct RotationIndex {
    mode: IndexMode,
    layout: Layout,
    /// Global start position of each per-line set
    starts: Vec<usize>,
    all_len: usize,
    skipped_count: usize,
}

impl RotationIndex {
    fn new(mode: IndexMode, layout: Layout, skipped_count: usize) -> Self {
        let (starts, all_len) = match &layout {
            Layout::PerLine(sets) => {
                let mut starts = Vec::with_capacity(sets.len());
                let mut total = 0;
                for set in sets {
                    starts.push(total);
                    total += set.len();
                }
                (starts, total)
            }
            Layout::Merged { rotations, .. } => (Vec::new(), rotations.len()),
        };

        Self {
            mode,
            layout,
            starts,
            all_len,
            skipped_count,
        }
    }

    /// Build from raw lines
    pub fn build<I, S>(texts: I, options: BuildOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = RotationIndexBuilder::new(options);
        builder.add_lines(texts);
        builder.build()
    }

    /// Build from a block of text, one line per `\n`
    pub fn from_text(text: &str, options: BuildOptions) -> Self {
        Self::build(text.lines(), options)
    }

    pub fn mode(&self) -> IndexMode {
        self.mode
    }

    /// Total rotations across all lines
    pub fn all_len(&self) -> usize {
        self.all_len
    }

    pub fn is_empty(&self) -> bool {
        self.all_len == 0
    }

    /// Number of non-blank lines processed
    pub fn line_count(&self) -> usize {
        match &self.layout {
            Layout::PerLine(sets) => sets.len(),
            Layout::Merged { lines, .. } => lines.len(),
        }
    }

    /// Number of blank lines that were skipped
    pub fn skipped_count(&self) -> usize {
        self.skipped_count
    }

    /// The set of line `n`; only available in per-line mode
    pub fn line(&self, n: usize) -> Result<&RotationSet> {
        match &self.layout {
            Layout::PerLine(sets) => sets.get(n).ok_or(ShiftError::LineOutOfRange {
                index: n,
                len: sets.len(),
            }),
            Layout::Merged { .. } => Err(ShiftError::Merged),
        }
    }

    /// Per-line sets, or `None` for a merged index
    pub fn sets(&self) -> Option<&[RotationSet]> {
        match &self.layout {
            Layout::PerLine(sets) => Some(sets),
            Layout::Merged { .. } => None,
        }
    }

    /// Merged rotations, or `None` for a per-line index
    pub fn merged(&self) -> Option<&[Rotation]> {
        match &self.layout {
            Layout::Merged { rotations, .. } => Some(rotations),
            Layout::PerLine(_) => None,
        }
    }

    /// Source line by id
    pub fn source_line(&self, id: LineId) -> Option<&Line> {
        match &self.layout {
            Layout::PerLine(sets) => sets.get(id).map(RotationSet::line),
            Layout::Merged { lines, .. } => lines.get(id),
        }
    }

    /// All source lines in input order
    pub fn lines(&self) -> Box<dyn Iterator<Item = &Line> + '_> {
        match &self.layout {
            Layout::PerLine(sets) => Box::new(sets.iter().map(RotationSet::line)),
            Layout::Merged { lines, .. } => Box::new(lines.iter()),
        }
    }

    /// Rotation at global position `index`.
    ///
    /// Per-line positions run through the sets in line order.
    pub fn get(&self, index: usize) -> Result<&Rotation> {
        if index >= self.all_len {
            return Err(ShiftError::OutOfRange {
                index,
                len: self.all_len,
            });
        }

        match &self.layout {
            Layout::Merged { rotations, .. } => Ok(&rotations[index]),
            Layout::PerLine(sets) => {
                let set_idx = self.starts.partition_point(|&start| start <= index) - 1;
                sets[set_idx].get(index - self.starts[set_idx])
            }
        }
    }

    /// Marker of the line a rotation came from
    pub fn marker_of(&self, rotation: &Rotation) -> Option<&Marker> {
        self.source_line(rotation.line).and_then(Line::marker)
    }

    /// All rotations in global order
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Rotation> + '_> {
        match &self.layout {
            Layout::Merged { rotations, .. } => Box::new(rotations.iter()),
            Layout::PerLine(sets) => Box::new(sets.iter().flat_map(|set| set.rotations().iter())),
        }
    }
}

/// Compact rendering: one rotation per line in global order
impl fmt::Display for RotationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rotation in self.iter() {
            match self.marker_of(rotation) {
                Some(marker) => writeln!(f, "{} {}", rotation, marker)?,
                None => writeln!(f, "{}", rotation)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Backend;

    const CORPUS: [&str; 4] = [
        "A a B b",
        "Another yet new string",
        "Once upon a time",
        "It is my shift now",
    ];

    #[test]
    fn test_per_line_mode() {
        let index = RotationIndex::build(CORPUS, BuildOptions::default());

        assert_eq!(index.mode(), IndexMode::PerLine);
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.all_len(), 4 + 4 + 4 + 5);

        let first = index.line(0).unwrap();
        assert_eq!(first.to_vec(), vec!["a B b A", "A a B b", "b A a B", "B b A a"]);
        assert!(index.line(4).is_err());
    }

    #[test]
    fn test_merged_mode_sorts_whole_pool() {
        let index = RotationIndex::build(CORPUS, BuildOptions::merged());

        assert_eq!(index.mode(), IndexMode::Merged);
        assert_eq!(index.all_len(), 17);
        assert!(matches!(index.line(0), Err(ShiftError::Merged)));

        let merged = index.merged().unwrap();
        for pair in merged.windows(2) {
            assert_ne!(
                crate::utils::collation::compare_rotations(&pair[0].text, &pair[1].text),
                std::cmp::Ordering::Greater
            );
        }
        // "a B b A" from line 0 leads, "a time Once upon" from line 2 follows
        assert_eq!(merged[0].text, "a B b A");
        assert_eq!(merged[1].text, "a time Once upon");
        assert_eq!(merged[1].line, 2);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let index = RotationIndex::build(["first line", "", "   ", "second"], BuildOptions::default());
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.skipped_count(), 2);
        assert_eq!(index.all_len(), 3);
        assert_eq!(index.line(1).unwrap().line().text(), "second");
    }

    #[test]
    fn test_global_get_per_line() {
        let index = RotationIndex::build(["b a", "d c e"], BuildOptions::default());
        let all: Vec<&str> = index.iter().map(Rotation::as_str).collect();
        assert_eq!(all, vec!["a b", "b a", "c e d", "d c e", "e d c"]);

        for (i, text) in all.iter().enumerate() {
            assert_eq!(index.get(i).unwrap().as_str(), *text);
        }
        assert!(index.get(5).is_err());
    }

    #[test]
    fn test_empty_index() {
        let index = RotationIndex::build(Vec::<String>::new(), BuildOptions::merged());
        assert!(index.is_empty());
        assert_eq!(index.line_count(), 0);
        assert!(index.get(0).is_err());
    }

    #[test]
    fn test_markers_follow_rotations() {
        let index = RotationIndex::build(
            ["Search engine http://www.baidu.com", "no link"],
            BuildOptions::merged().with_urls(),
        );
        assert_eq!(index.all_len(), 4);
        for rotation in index.iter() {
            let marker = index.marker_of(rotation).unwrap();
            if rotation.text.contains("engine") {
                assert_eq!(marker.url(), Some("http://www.baidu.com"));
            } else {
                assert_eq!(marker, &Marker::Absent);
            }
        }
    }

    #[test]
    fn test_backends_build_identical_indexes() {
        let text = CORPUS.join("\n");
        for mode in [IndexMode::PerLine, IndexMode::Merged] {
            let opts = BuildOptions {
                mode,
                parallel_threshold: 0,
                ..Default::default()
            };
            let rapid = RotationIndex::from_text(&text, opts.clone().with_backend(Backend::Rapid));
            let reference = RotationIndex::from_text(&text, opts.with_backend(Backend::Reference));
            assert_eq!(rapid.to_string(), reference.to_string());
        }
    }

    #[test]
    fn test_builder_counts() {
        let mut builder = RotationIndexBuilder::with_defaults();
        assert!(builder.add_line("hello world"));
        assert!(!builder.add_line("  "));
        assert_eq!(builder.line_count(), 1);
        let index = builder.build();
        assert_eq!(index.all_len(), 2);
    }
}
