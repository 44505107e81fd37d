//! Output formatting for split results.
//!
//! Text mode is written in stages: the input line before reading, the header
//! and conditions before scanning, and the result once segments are written.
//! JSON mode renders the finished [`SplitReport`] as a single document.
//!
//! Semantic colors in text mode:
//!   - Success: green  (segments written)
//!   - Warning: yellow (no segments, connectives read as AND)
//!   - Info:    cyan   (paths, field indices)
//!   - Emphasis: bold  (section labels)

use crate::commands::split::SplitReport;
use colored::Colorize;
use std::env;
use std::io::{self, Write};
use std::path::Path;

/// Message printed when the scan finds no segment.
pub const NO_SEGMENT_MESSAGE: &str = "Unable to segment log file, please choose another predicate";

/// How a report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable progress text.
    Text,
    /// One JSON document on stdout.
    Json,
    /// Nothing on success.
    Quiet,
}

/// Settings for text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Builds the configuration from the environment.
    ///
    /// Colors are off when `NO_COLOR` is set (any value) or when
    /// `SEGLOG_COLOR` is `0` or `false`.
    #[must_use]
    pub fn from_env() -> Self {
        let use_colors = env::var_os("NO_COLOR").is_none()
            && env::var("SEGLOG_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);
        Self { use_colors }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

fn paint(text: &str, config: OutputConfig, style: fn(&str) -> colored::ColoredString) -> String {
    if config.use_colors {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

fn bold(text: &str, config: OutputConfig) -> String {
    paint(text, config, |t| t.bold())
}

fn success(text: &str, config: OutputConfig) -> String {
    paint(text, config, |t| t.green())
}

fn warning(text: &str, config: OutputConfig) -> String {
    paint(text, config, |t| t.yellow())
}

fn info(text: &str, config: OutputConfig) -> String {
    paint(text, config, |t| t.cyan())
}

/// Writes the line announcing the input log.
///
/// # Errors
///
/// Returns an error if writing to `w` fails.
pub fn write_reading<W: Write>(w: &mut W, input: &Path, config: OutputConfig) -> io::Result<()> {
    writeln!(
        w,
        "{} {}",
        bold("Reading log file:", config),
        info(&input.display().to_string(), config)
    )?;
    writeln!(w)
}

/// Writes the enumerated header and the conditions about to be applied.
///
/// # Errors
///
/// Returns an error if writing to `w` fails.
pub fn write_plan<W: Write>(
    w: &mut W,
    header: &[String],
    conditions: &[String],
    or_connectives: usize,
    config: OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{}", bold("Header fields:", config))?;
    for (i, name) in header.iter().enumerate() {
        writeln!(w, "{}: {name}", info(&i.to_string(), config))?;
    }
    writeln!(w)?;

    let conditions = if conditions.is_empty() {
        "(no conditions; every row except the last matches)".to_string()
    } else {
        conditions.join(" && ")
    };
    writeln!(w, "{} {conditions}", bold("Splitting log with:", config))?;
    if or_connectives > 0 {
        writeln!(
            w,
            "{}",
            warning("Note: '||' is evaluated as AND; all conditions must hold", config)
        )?;
    }
    writeln!(w)
}

/// Writes the outcome: the written segments, or the no-segment message.
///
/// # Errors
///
/// Returns an error if writing to `w` fails.
pub fn write_result<W: Write>(w: &mut W, report: &SplitReport, config: OutputConfig) -> io::Result<()> {
    if report.is_empty() {
        return writeln!(w, "{}", warning(NO_SEGMENT_MESSAGE, config));
    }

    writeln!(w, "{}", success("Done segmenting log file.", config))?;
    writeln!(w, "File segmented into {} files.", report.segments.len())?;
    for segment in &report.segments {
        writeln!(
            w,
            "  {}  lines {}-{} ({} rows)",
            info(&segment.path.display().to_string(), config),
            segment.start_line,
            segment.end_line,
            segment.rows
        )?;
    }
    Ok(())
}

/// Writes a whole finished report as progress text.
///
/// The CLI prints the same three parts stage by stage as the run advances.
///
/// # Errors
///
/// Returns an error if writing to `w` fails.
pub fn write_text<W: Write>(w: &mut W, report: &SplitReport, config: OutputConfig) -> io::Result<()> {
    write_reading(w, &report.input, config)?;
    write_plan(
        w,
        &report.header,
        &report.conditions,
        report.or_connectives,
        config,
    )?;
    write_result(w, report, config)
}

/// Writes the report as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write>(w: &mut W, report: &SplitReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, report)?;
    writeln!(w)
}
