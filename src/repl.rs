//! Interactive console
//!
//! Every entered line is added to the session's index and its rotations are
//! printed. Lines starting with `:` are commands:
//!
//! | Command         | Effect                                   |
//! |-----------------|------------------------------------------|
//! | `:merge`        | toggle merged mode and reprint the index |
//! | `:verbose`      | toggle numbered output                   |
//! | `:all`          | toggle marker matching for searches      |
//! | `:search KW..`  | keyword search over the session          |
//! | `:regex PAT`    | regex search over the session            |
//! | `:quit`         | leave the console                        |

use crate::error::Result;
use crate::index::{BuildOptions, IndexMode, RotationIndex};
use crate::output::{self, Verbosity};
use crate::query::{SearchQuery, Searcher};
use std::io::BufRead;
use termcolor::WriteColor;

const PROMPT: &str = "kwic> ";

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// State of one console session
pub struct Console {
    options: BuildOptions,
    verbosity: Verbosity,
    all: bool,
    lines: Vec<String>,
    index: RotationIndex,
}

impl Console {
    pub fn new(options: BuildOptions, verbosity: Verbosity) -> Self {
        let index = RotationIndex::build(Vec::<String>::new(), options.clone());
        Self {
            options,
            verbosity,
            all: false,
            lines: Vec::new(),
            index,
        }
    }

    /// Lines entered so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn index(&self) -> &RotationIndex {
        &self.index
    }

    /// Read lines from `input` until EOF or `:quit`
    pub fn run<R: BufRead, W: WriteColor>(&mut self, input: R, out: &mut W) -> Result<()> {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        for line in input.lines() {
            if self.handle(&line?, out)? == Flow::Quit {
                return Ok(());
            }
            write!(out, "{}", PROMPT)?;
            out.flush()?;
        }

        writeln!(out)?;
        Ok(())
    }

    /// Process one line of input
    pub fn handle<W: WriteColor>(&mut self, input: &str, out: &mut W) -> Result<Flow> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Flow::Continue);
        }

        let Some(command) = input.strip_prefix(':') else {
            self.add_line(input, out)?;
            return Ok(Flow::Continue);
        };

        let (name, args) = command.split_once(' ').unwrap_or((command, ""));
        match name {
            "quit" | "q" => return Ok(Flow::Quit),
            "merge" => {
                self.options.mode = match self.options.mode {
                    IndexMode::PerLine => IndexMode::Merged,
                    IndexMode::Merged => IndexMode::PerLine,
                };
                self.rebuild();
                writeln!(out, "merge {}", on_off(self.options.mode == IndexMode::Merged))?;
                output::write_index(out, &self.index, self.verbosity)?;
            }
            "verbose" => {
                self.verbosity = match self.verbosity {
                    Verbosity::Compact => Verbosity::Verbose,
                    Verbosity::Verbose => Verbosity::Compact,
                };
                writeln!(out, "verbose {}", on_off(self.verbosity == Verbosity::Verbose))?;
            }
            "all" => {
                self.all = !self.all;
                writeln!(out, "all {}", on_off(self.all))?;
            }
            "search" => self.search(SearchQuery::keywords(args.split_whitespace()), out)?,
            "regex" => self.search(SearchQuery::pattern(args.trim()), out)?,
            _ => writeln!(out, "unknown command :{}", name)?,
        }

        Ok(Flow::Continue)
    }

    fn add_line<W: WriteColor>(&mut self, text: &str, out: &mut W) -> Result<()> {
        self.lines.push(text.to_string());
        self.rebuild();

        match self.index.mode() {
            IndexMode::Merged => output::write_index(out, &self.index, self.verbosity)?,
            IndexMode::PerLine => {
                let last = self.index.line_count().saturating_sub(1);
                if let Ok(set) = self.index.line(last) {
                    output::write_set(out, set, self.verbosity)?;
                }
            }
        }
        Ok(())
    }

    fn search<W: WriteColor>(&self, query: SearchQuery, out: &mut W) -> Result<()> {
        let searcher = Searcher::with_backend(
            &self.index,
            self.options.backend,
            self.options.parallel_threshold,
        );

        // A bad query is reported and the session goes on
        match searcher.run(&query, self.all) {
            Ok(outcome) => output::write_matches(out, &self.index, &outcome)?,
            Err(e) if e.is_invalid_query() => writeln!(out, "error: {}", e)?,
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn rebuild(&mut self) {
        self.index = RotationIndex::build(&self.lines, self.options.clone());
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
