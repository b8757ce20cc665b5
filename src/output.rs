//! Output formatting for rotations and search results

use crate::index::{IndexMode, Marker, Rotation, RotationIndex, RotationSet};
use crate::query::{SearchOutcome, Searchable};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

/// How much decoration surrounds the rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// One rotation per line, nothing else
    #[default]
    Compact,
    /// 1-based numbered rotations with headings and a summary
    Verbose,
}

impl Verbosity {
    pub fn from_flag(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Compact
        }
    }
}

/// Color choice for a `--color` setting, falling back to the configured default
pub fn color_choice(when: Option<&str>, configured: bool) -> ColorChoice {
    match when {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ if configured => ColorChoice::Auto,
        _ => ColorChoice::Never,
    }
}

/// Stdout stream for the given color choice
pub fn stdout(choice: ColorChoice) -> StandardStream {
    StandardStream::stdout(choice)
}

/// Print the rotations of a single line
pub fn write_set<W: WriteColor>(out: &mut W, set: &RotationSet, verbosity: Verbosity) -> io::Result<()> {
    if verbosity == Verbosity::Verbose {
        print_heading(out, set.line().text())?;
    }

    for (i, rotation) in set.rotations().iter().enumerate() {
        print_rotation(out, i, rotation, set.marker(), verbosity)?;
    }

    if verbosity == Verbosity::Verbose {
        print_summary(out, &format!("{} rotations", set.len()))?;
    }
    Ok(())
}

/// Print every rotation of an index in global order.
///
/// Verbose numbering restarts at `[01]` for each line of a per-line index
/// and runs once across a merged one.
pub fn write_index<W: WriteColor>(
    out: &mut W,
    index: &RotationIndex,
    verbosity: Verbosity,
) -> io::Result<()> {
    match index.mode() {
        IndexMode::PerLine => {
            for set in index.sets().unwrap_or_default() {
                if verbosity == Verbosity::Verbose {
                    print_heading(out, set.line().text())?;
                }
                for (i, rotation) in set.rotations().iter().enumerate() {
                    print_rotation(out, i, rotation, set.marker(), verbosity)?;
                }
            }
        }
        IndexMode::Merged => {
            if verbosity == Verbosity::Verbose {
                out.set_color(ColorSpec::new().set_bold(true))?;
                writeln!(out, "merged result")?;
                out.reset()?;
            }
            for (i, rotation) in index.iter().enumerate() {
                print_rotation(out, i, rotation, index.marker_of(rotation), verbosity)?;
            }
        }
    }

    if verbosity == Verbosity::Verbose {
        let mut summary = format!(
            "{} rotations from {} lines",
            index.all_len(),
            index.line_count()
        );
        if index.skipped_count() > 0 {
            summary.push_str(&format!(" ({} blank skipped)", index.skipped_count()));
        }
        print_summary(out, &summary)?;
    }
    Ok(())
}

/// Print matched rotations as `[NN] rotation` lines, `NN` being the
/// 0-based position returned by the search
pub fn write_matches<W: WriteColor>(
    out: &mut W,
    target: &dyn Searchable,
    outcome: &SearchOutcome,
) -> io::Result<()> {
    for &i in outcome.indices() {
        print_index(out, i)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)))?;
        write!(out, "{}", target.rotation_text(i))?;
        out.reset()?;
        if let Some(marker) = target.marker_text(i) {
            write!(out, " ")?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(out, "{}", marker)?;
            out.reset()?;
        }
        writeln!(out)?;
    }

    let summary = match outcome {
        SearchOutcome::Found(indices) => format!("{} of {} rotations matched", indices.len(), target.len()),
        SearchOutcome::NoMatch => "no match".to_string(),
    };
    print_summary(out, &summary)
}

/// Print the outcome as one JSON document
pub fn write_matches_json<W: Write>(out: &mut W, outcome: &SearchOutcome) -> io::Result<()> {
    serde_json::to_writer(&mut *out, outcome)?;
    writeln!(out)
}

/// Plain rendering of a set, never colored
pub fn render_set(set: &RotationSet, verbosity: Verbosity) -> String {
    render(|out| write_set(out, set, verbosity))
}

/// Plain rendering of an index, never colored
pub fn render_index(index: &RotationIndex, verbosity: Verbosity) -> String {
    render(|out| write_index(out, index, verbosity))
}

fn render<F>(write: F) -> String
where
    F: FnOnce(&mut NoColor<Vec<u8>>) -> io::Result<()>,
{
    let mut out = NoColor::new(Vec::new());
    // Writes into a Vec cannot fail
    let _ = write(&mut out);
    String::from_utf8_lossy(&out.into_inner()).into_owned()
}

fn print_heading<W: WriteColor>(out: &mut W, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "{}", text)?;
    out.reset()
}

fn print_index<W: WriteColor>(out: &mut W, i: usize) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
    write!(out, "[{:02}] ", i)?;
    out.reset()
}

fn print_rotation<W: WriteColor>(
    out: &mut W,
    i: usize,
    rotation: &Rotation,
    marker: Option<&Marker>,
    verbosity: Verbosity,
) -> io::Result<()> {
    if verbosity == Verbosity::Verbose {
        print_index(out, i + 1)?;
    }

    out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)))?;
    write!(out, "{}", rotation)?;
    out.reset()?;

    if let Some(marker) = marker {
        write!(out, " ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(out, "{}", marker)?;
        out.reset()?;
    }

    writeln!(out)
}

fn print_summary<W: WriteColor>(out: &mut W, summary: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    writeln!(out, "{}", summary)?;
    out.reset()
}
