//! Straightforward backend: deque rotation and per-byte ranks

use super::ShiftEngine;
use crate::index::types::Rotation;
use crate::utils::collation::compare_rotations_uncached;
use std::collections::VecDeque;

/// Sequential backend kept as the behavioral baseline
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceEngine;

impl ShiftEngine for ReferenceEngine {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn rotations(&self, words: &[String]) -> Vec<String> {
        let mut queue: VecDeque<&str> = words.iter().map(String::as_str).collect();
        let mut out = Vec::with_capacity(queue.len());

        for _ in 0..queue.len() {
            out.push(queue.make_contiguous().join(" "));
            queue.rotate_left(1);
        }

        out
    }

    fn sort(&self, rotations: &mut [Rotation]) {
        rotations.sort_by(|a, b| compare_rotations_uncached(&a.text, &b.text));
    }
}
