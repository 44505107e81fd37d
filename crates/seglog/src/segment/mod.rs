//! Contiguous segment detection.
//!
//! The [`Segmenter`] walks the rows of a [`Table`] once, in order, and hands
//! every maximal run of matching rows to a [`SegmentSink`] as soon as the run
//! ends.
//!
//! # Final row
//!
//! The last data row never matches, whatever its values. It still goes
//! through the predicate, so a non-numeric cell there is still an error, but
//! it can neither start nor extend a segment. The scan therefore always ends
//! outside a segment, and no segment is ever left open at end of input.

pub mod sink;

pub use sink::{CollectedSegment, DirectorySink, MemorySink, SegmentSink, WrittenSegment};

use crate::error::Result;
use crate::predicate::CompiledPredicate;
use seglog_tsv::{Row, Table};
use tracing::{debug, trace};

/// A maximal run of consecutive matching rows.
///
/// Borrows its rows from the table being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    index: usize,
    start: usize,
    rows: &'a [Row],
}

impl<'a> Segment<'a> {
    /// Returns the 1-based segment number, in discovery order.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the 0-based position of the first row within the table.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the position one past the last row.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.rows.len()
    }

    /// Returns the rows of the segment, in table order.
    #[must_use]
    pub fn rows(&self) -> &'a [Row] {
        self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the segment has no rows. Never true for a segment
    /// produced by the [`Segmenter`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Counts gathered during one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    /// Data rows scanned.
    pub rows: usize,
    /// Rows placed into some segment.
    pub matched_rows: usize,
    /// Segments handed to the sink.
    pub segments: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    Inside { start: usize },
}

/// Groups consecutive matching rows into segments.
#[derive(Debug, Clone, Copy)]
pub struct Segmenter<'p> {
    predicate: &'p CompiledPredicate,
}

impl<'p> Segmenter<'p> {
    /// Creates a segmenter testing rows with `predicate`.
    #[must_use]
    pub fn new(predicate: &'p CompiledPredicate) -> Self {
        Self { predicate }
    }

    /// Scans `table` and hands each finished segment to `sink`.
    ///
    /// Segments are numbered from 1. A segment is handed over at the first
    /// non-matching row after it, before any later row is tested.
    ///
    /// # Errors
    ///
    /// Stops at the first row the predicate cannot evaluate, or the first
    /// sink failure. Segments handed over before that point stay written.
    pub fn run(&self, table: &Table, sink: &mut dyn SegmentSink) -> Result<ScanSummary> {
        let header = table.header();
        let rows = table.rows();
        let last = rows.len().checked_sub(1);

        let mut state = ScanState::Outside;
        let mut summary = ScanSummary {
            rows: rows.len(),
            ..ScanSummary::default()
        };

        for (i, row) in rows.iter().enumerate() {
            let passes = self.predicate.matches(row, table.line_number(i))?;
            let matches = passes && Some(i) != last;
            trace!(row = i, passes, matches, "Tested row");

            state = match (state, matches) {
                (ScanState::Outside, true) => ScanState::Inside { start: i },
                (inside @ ScanState::Inside { .. }, true) => inside,
                (ScanState::Inside { start }, false) => {
                    let segment = Segment {
                        index: summary.segments + 1,
                        start,
                        rows: &rows[start..i],
                    };
                    debug_assert!(!segment.is_empty());
                    debug!(
                        index = segment.index(),
                        start,
                        end = segment.end(),
                        rows = segment.len(),
                        "Segment finished"
                    );
                    sink.write_segment(header, &segment)?;
                    summary.segments += 1;
                    summary.matched_rows += segment.len();
                    ScanState::Outside
                }
                (ScanState::Outside, false) => ScanState::Outside,
            };
        }

        debug_assert_eq!(state, ScanState::Outside);
        Ok(summary)
    }
}
