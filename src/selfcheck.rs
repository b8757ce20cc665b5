//! Built-in calibration cases
//!
//! A fixed list of named checks over the collation order and the rotation
//! containers, runnable from the binary (`kwic selfcheck`) so an installed
//! build can confirm it orders rotations the expected way.

use crate::engine::Backend;
use crate::error::ShiftError;
use crate::index::{BuildOptions, Line, RotationIndex, RotationSet};
use crate::query::{SearchOutcome, Searcher};
use crate::utils::rank;

/// Outcome of a single check; `Err` carries the failure description
pub type CheckResult = std::result::Result<(), String>;

/// A named calibration check
pub struct Check {
    pub name: &'static str,
    pub run: fn() -> CheckResult,
}

/// All registered checks, run in order
pub static CHECKS: &[Check] = &[
    Check { name: "rank_table", run: rank_table },
    Check { name: "simple_sentence", run: simple_sentence },
    Check { name: "case_interleaving", run: case_interleaving },
    Check { name: "rotation_count", run: rotation_count },
    Check { name: "blank_line", run: blank_line },
    Check { name: "bounds", run: bounds },
    Check { name: "merge_count", run: merge_count },
    Check { name: "url_suppression", run: url_suppression },
    Check { name: "backends_agree", run: backends_agree },
];

/// Pass/fail tally of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub passed: usize,
    /// Names and failure descriptions
    pub failed: Vec<(&'static str, String)>,
}

impl Report {
    pub fn total(&self) -> usize {
        self.passed + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run every check, calling `on_result` after each one
pub fn run_with<F>(mut on_result: F) -> Report
where
    F: FnMut(&Check, &CheckResult),
{
    let mut report = Report::default();
    for check in CHECKS {
        let result = (check.run)();
        on_result(check, &result);
        match result {
            Ok(()) => report.passed += 1,
            Err(reason) => report.failed.push((check.name, reason)),
        }
    }
    report
}

pub fn run() -> Report {
    run_with(|check, result| {
        if let Err(reason) = result {
            log::warn!("check {} failed: {}", check.name, reason);
        }
    })
}

fn expect_eq<T: PartialEq + std::fmt::Debug>(actual: T, expected: T) -> CheckResult {
    if actual == expected {
        Ok(())
    } else {
        Err(format!("expected {:?}, got {:?}", expected, actual))
    }
}

fn rank_table() -> CheckResult {
    expect_eq(
        [rank(b'a'), rank(b'A'), rank(b'b'), rank(b'B'), rank(b' '), rank(b'0')],
        [0x0A, 0x0B, 0x12, 0x13, b' ', b'0'],
    )
}

fn simple_sentence() -> CheckResult {
    expect_eq(
        RotationSet::new("A simple test string").to_vec(),
        vec![
            "A simple test string".to_string(),
            "simple test string A".to_string(),
            "string A simple test".to_string(),
            "test string A simple".to_string(),
        ],
    )
}

fn case_interleaving() -> CheckResult {
    let expected = [
        "a A b B p P",
        "A b B p P a",
        "b B p P a A",
        "B p P a A b",
        "p P a A b B",
        "P a A b B p",
    ];
    expect_eq(
        RotationSet::new("a A b B p P").to_vec(),
        expected.iter().map(|s| s.to_string()).collect(),
    )
}

fn rotation_count() -> CheckResult {
    for n in 1..=12 {
        let text = (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        let set = RotationSet::new(&text);
        if set.len() != n {
            return Err(format!("{} words gave {} rotations", n, set.len()));
        }
    }
    Ok(())
}

fn blank_line() -> CheckResult {
    expect_eq(RotationSet::new("   ").len(), 0)?;
    let index = RotationIndex::build(["", "  ", "x y"], BuildOptions::default());
    expect_eq((index.line_count(), index.all_len()), (1, 2))
}

fn bounds() -> CheckResult {
    for text in ["", "one", "one two three"] {
        let set = RotationSet::new(text);
        for index in [set.len(), usize::MAX] {
            match set.get(index) {
                Err(ShiftError::OutOfRange { .. }) => {}
                other => return Err(format!("get({}) on {} rotations gave {:?}", index, set.len(), other)),
            }
        }
    }
    Ok(())
}

fn merge_count() -> CheckResult {
    let lines: Vec<String> = (0..100)
        .flat_map(|_| (1..=4).map(|n| vec!["w"; n].join(" ")))
        .collect();
    let index = RotationIndex::build(&lines, BuildOptions::merged());
    expect_eq(index.all_len(), 1000)
}

fn url_suppression() -> CheckResult {
    let line = Line::new("Search engine http://www.example.com", true);
    let set = RotationSet::from_line(line, 0, Backend::default().engine(usize::MAX).as_ref());
    let searcher = Searcher::new(&set);

    let all = searcher.search(&["www"], true).map_err(|e| e.to_string())?;
    expect_eq(all, SearchOutcome::Found(vec![0, 1]))?;
    let suppressed = searcher.search(&["www"], false).map_err(|e| e.to_string())?;
    expect_eq(suppressed, SearchOutcome::NoMatch)
}

fn backends_agree() -> CheckResult {
    let texts = ["It is my shift now", "Once upon a time", "a A b B p P", "A a B b"];
    let reference = RotationIndex::build(texts, BuildOptions::merged().with_backend(Backend::Reference));
    let rapid = RotationIndex::build(texts, BuildOptions::merged().with_backend(Backend::Rapid));
    expect_eq(reference.to_string(), rapid.to_string())
}
