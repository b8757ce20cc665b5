//! Accelerated backend: ring-buffer rotation, rank table, rayon

use super::ShiftEngine;
use crate::index::rotation::RotationIter;
use crate::index::types::{Line, Rotation};
use crate::utils::collation::compare_rotations;
use rayon::prelude::*;

/// Backend that parallelizes once the work exceeds a threshold
#[derive(Debug, Clone, Copy)]
pub struct RapidEngine {
    parallel_threshold: usize,
}

impl RapidEngine {
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    fn parallel(&self, work: usize) -> bool {
        work > self.parallel_threshold
    }
}

impl Default for RapidEngine {
    fn default() -> Self {
        Self::new(crate::index::types::default_parallel_threshold())
    }
}

impl ShiftEngine for RapidEngine {
    fn name(&self) -> &'static str {
        "rapid"
    }

    fn rotations(&self, words: &[String]) -> Vec<String> {
        RotationIter::new(words).collect()
    }

    fn rotate_lines(&self, lines: &[Line]) -> Vec<Vec<String>> {
        let total_words: usize = lines.iter().map(Line::word_count).sum();

        // Each line fills its own slot; order is preserved by the indexed collect
        if lines.len() > 1 && self.parallel(total_words) {
            lines
                .par_iter()
                .map(|line| RotationIter::new(line.words()).collect())
                .collect()
        } else {
            lines
                .iter()
                .map(|line| RotationIter::new(line.words()).collect())
                .collect()
        }
    }

    fn sort(&self, rotations: &mut [Rotation]) {
        // Both sorts are stable, so ties keep generation order
        if self.parallel(rotations.len()) {
            rotations.par_sort_by(|a, b| compare_rotations(&a.text, &b.text));
        } else {
            rotations.sort_by(|a, b| compare_rotations(&a.text, &b.text));
        }
    }

    fn scan(&self, len: usize, pred: &(dyn Fn(usize) -> bool + Sync)) -> Vec<usize> {
        if self.parallel(len) {
            (0..len).into_par_iter().filter(|&i| pred(i)).collect()
        } else {
            (0..len).filter(|&i| pred(i)).collect()
        }
    }
}
