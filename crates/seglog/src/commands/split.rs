//! Implementation of the split run.
//!
//! One run validates the prefix, parses the predicate, loads the whole log
//! and resolves its fields, then prepares the output directory and scans the
//! rows once, writing every segment to `{output_dir}/{prefix}-{n}.txt` as soon
//! as it ends.

use crate::config::{RunConfig, SEGMENT_EXTENSION};
use crate::error::{Error, Result};
use crate::predicate::{CompiledPredicate, ConditionSet, parse_predicate};
use crate::segment::{DirectorySink, Segmenter, WrittenSegment};
use seglog_tsv::{Header, Table, read_table};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Maximum prefix length.
pub const MAX_PREFIX_LENGTH: usize = 64;

/// Outcome of a split run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitReport {
    /// Input log that was read.
    pub input: PathBuf,
    /// Directory the segments were written to.
    pub output_dir: PathBuf,
    /// Output file prefix.
    pub prefix: String,
    /// Header field names, in column order.
    pub header: Vec<String>,
    /// Parsed conditions, rendered as `field op threshold`.
    pub conditions: Vec<String>,
    /// `||`-style connectives that were evaluated as AND.
    pub or_connectives: usize,
    /// Number of data rows read.
    pub rows: usize,
    /// Number of rows written across all segments.
    pub matched_rows: usize,
    /// Stale `.txt` files removed from the output directory.
    pub removed_files: usize,
    /// Written segments, in discovery order.
    pub segments: Vec<SegmentReport>,
}

impl SplitReport {
    /// Returns `true` if no segment was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// One written segment file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentReport {
    /// 1-based segment number.
    pub index: usize,
    /// Path of the written file.
    pub path: PathBuf,
    /// Source line of the first row.
    pub start_line: u64,
    /// Source line of the last row.
    pub end_line: u64,
    /// Data rows in the file, excluding the header.
    pub rows: usize,
}

impl SegmentReport {
    fn new(written: WrittenSegment, table: &Table) -> Self {
        Self {
            index: written.index,
            start_line: table.line_number(written.start),
            end_line: table.line_number(written.start + written.rows - 1),
            rows: written.rows,
            path: written.path,
        }
    }
}

/// Validate an output file prefix.
///
/// Requirements:
/// - 1-64 characters
/// - No path separators, so every segment lands directly in the output
///   directory
/// - Not `.` or `..`
pub fn validate_prefix(prefix: &str) -> Result<()> {
    let reject = |reason: &str| {
        Err(Error::InvalidPrefix {
            prefix: prefix.to_string(),
            reason: reason.to_string(),
        })
    };

    if prefix.is_empty() {
        return reject("prefix cannot be empty");
    }

    if prefix.chars().count() > MAX_PREFIX_LENGTH {
        return reject(&format!(
            "prefix cannot exceed {MAX_PREFIX_LENGTH} characters"
        ));
    }

    if prefix.contains(['/', '\\']) {
        return reject("prefix cannot contain path separators");
    }

    if prefix == "." || prefix == ".." {
        return reject("prefix cannot be a relative directory name");
    }

    if prefix.chars().any(char::is_control) {
        return reject("prefix cannot contain control characters");
    }

    Ok(())
}

/// Creates `dir` if needed and, when `clean` is set, removes every regular
/// `.txt` file directly inside it except `keep`.
///
/// Returns the number of files removed. Subdirectories and other files are
/// left alone. `keep` is compared after canonicalization, so any path
/// naming the same file protects it.
///
/// # Errors
///
/// Returns [`Error::Output`] if the directory cannot be created, listed, or
/// a file in it cannot be removed.
pub fn prepare_output_dir(dir: &Path, clean: bool, keep: Option<&Path>) -> Result<usize> {
    let output_error = |path: &Path, e: std::io::Error| Error::Output {
        path: path.to_path_buf(),
        source: e.into(),
    };

    fs::create_dir_all(dir).map_err(|e| output_error(dir, e))?;
    if !clean {
        return Ok(0);
    }

    let keep = keep.and_then(|path| fs::canonicalize(path).ok());
    let mut removed = 0;
    for entry in fs::read_dir(dir).map_err(|e| output_error(dir, e))? {
        let entry = entry.map_err(|e| output_error(dir, e))?;
        let path = entry.path();
        let is_file = entry
            .file_type()
            .map_err(|e| output_error(&path, e))?
            .is_file();
        let is_segment = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SEGMENT_EXTENSION));

        if is_file && is_segment {
            if keep
                .as_deref()
                .is_some_and(|k| fs::canonicalize(&path).is_ok_and(|p| p == k))
            {
                debug!(path = %path.display(), "Keeping input log inside output directory");
                continue;
            }
            fs::remove_file(&path).map_err(|e| output_error(&path, e))?;
            debug!(path = %path.display(), "Removed stale output file");
            removed += 1;
        }
    }

    Ok(removed)
}

/// A split whose input has been read and whose predicate has been compiled.
///
/// Nothing has touched the output directory yet. [`execute`](Self::execute)
/// cleans it and writes the segments.
#[derive(Debug)]
pub struct SplitPlan {
    config: RunConfig,
    conditions: ConditionSet,
    table: Table,
    compiled: CompiledPredicate,
}

impl SplitPlan {
    /// Validates `config`, parses `predicate`, reads the input and resolves
    /// every condition against its header.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The prefix is invalid
    /// - The predicate uses an unsupported operator, or is empty in strict mode
    /// - The input cannot be read or has no header
    /// - A condition names an unknown field
    pub fn prepare(config: RunConfig, predicate: &str) -> Result<Self> {
        validate_prefix(&config.prefix)?;

        let conditions = parse_predicate(predicate)?;
        if conditions.is_empty() {
            if config.strict {
                return Err(Error::EmptyPredicate(predicate.to_string()));
            }
            warn!(
                predicate,
                "Predicate contains no conditions; every row except the last matches"
            );
        }
        if conditions.or_connectives() > 0 {
            warn!(
                count = conditions.or_connectives(),
                "'||' connectives are evaluated as AND"
            );
        }

        info!(input = %config.input.display(), "Reading log file");
        let table = read_table(&config.input)?;
        let compiled = CompiledPredicate::compile(table.header(), &conditions)?;

        Ok(Self {
            config,
            conditions,
            table,
            compiled,
        })
    }

    /// Returns the run configuration.
    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Returns the header of the input log.
    #[must_use]
    pub fn header(&self) -> &Header {
        self.table.header()
    }

    /// Returns the parsed conditions.
    #[must_use]
    pub fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    /// Returns each condition rendered as `field op threshold`.
    #[must_use]
    pub fn condition_texts(&self) -> Vec<String> {
        self.conditions
            .conditions()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Prepares the output directory and writes every segment.
    ///
    /// Segments already written stay on disk if the scan fails part-way.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be prepared, a
    /// compared cell is missing or non-numeric, or a segment file cannot be
    /// written.
    pub fn execute(self) -> Result<SplitReport> {
        let removed_files = prepare_output_dir(
            &self.config.output_dir,
            self.config.clean,
            Some(&self.config.input),
        )?;

        let mut sink = DirectorySink::new(&self.config.output_dir, &self.config.prefix);
        let summary = Segmenter::new(&self.compiled).run(&self.table, &mut sink)?;

        info!(
            rows = summary.rows,
            segments = summary.segments,
            "Finished segmenting log file"
        );

        let segments = sink
            .into_written()
            .into_iter()
            .map(|written| SegmentReport::new(written, &self.table))
            .collect();

        Ok(SplitReport {
            header: self.table.header().names().to_vec(),
            conditions: self.condition_texts(),
            or_connectives: self.conditions.or_connectives(),
            rows: summary.rows,
            matched_rows: summary.matched_rows,
            removed_files,
            segments,
            input: self.config.input,
            output_dir: self.config.output_dir,
            prefix: self.config.prefix,
        })
    }
}

/// Runs one split of `config.input` by `predicate`.
///
/// The input is read before the output directory is cleaned, and is never
/// removed by the cleanup even when it lives in the output directory.
///
/// # Errors
///
/// Returns the errors of [`SplitPlan::prepare`] and [`SplitPlan::execute`].
pub fn split(config: RunConfig, predicate: &str) -> Result<SplitReport> {
    SplitPlan::prepare(config, predicate)?.execute()
}
