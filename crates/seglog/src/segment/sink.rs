//! Destinations for finished segments.
//!
//! The [`SegmentSink`] trait decouples segment detection from persistence.
//! [`DirectorySink`] writes one numbered file per segment; [`MemorySink`]
//! keeps segments in memory.

use super::Segment;
use crate::error::{Error, Result};
use seglog_tsv::{Header, Row, write_table_atomic};
use std::path::PathBuf;
use tracing::info;

/// Receives each segment as soon as the segmenter finishes it.
pub trait SegmentSink {
    /// Persists `segment`, whose rows are described by `header`.
    ///
    /// # Errors
    ///
    /// Any error aborts the scan that produced the segment.
    fn write_segment(&mut self, header: &Header, segment: &Segment<'_>) -> Result<()>;
}

/// An owned copy of a segment captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedSegment {
    /// 1-based segment number.
    pub index: usize,
    /// 0-based position of the first row within the table.
    pub start: usize,
    /// The segment's rows, without the header.
    pub rows: Vec<Row>,
}

/// Collects segments in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    segments: Vec<CollectedSegment>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the segments received so far, in order.
    #[must_use]
    pub fn segments(&self) -> &[CollectedSegment] {
        &self.segments
    }

    /// Consumes the sink, returning every received segment.
    #[must_use]
    pub fn into_segments(self) -> Vec<CollectedSegment> {
        self.segments
    }
}

impl SegmentSink for MemorySink {
    fn write_segment(&mut self, _header: &Header, segment: &Segment<'_>) -> Result<()> {
        self.segments.push(CollectedSegment {
            index: segment.index(),
            start: segment.start(),
            rows: segment.rows().to_vec(),
        });
        Ok(())
    }
}

/// A segment file written by [`DirectorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenSegment {
    /// 1-based segment number.
    pub index: usize,
    /// Path of the written file.
    pub path: PathBuf,
    /// 0-based position of the first row within the table.
    pub start: usize,
    /// Number of data rows in the file, excluding the header.
    pub rows: usize,
}

/// Writes each segment to `{dir}/{prefix}-{index}.txt`, header first.
///
/// Each file is written atomically; an existing file with the same name is
/// replaced.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    prefix: String,
    written: Vec<WrittenSegment>,
}

impl DirectorySink {
    /// Creates a sink writing into `dir`, which must already exist.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            written: Vec::new(),
        }
    }

    /// Returns the file path used for segment `index`.
    #[must_use]
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}-{index}.txt", self.prefix))
    }

    /// Returns the files written so far, in order.
    #[must_use]
    pub fn written(&self) -> &[WrittenSegment] {
        &self.written
    }

    /// Consumes the sink, returning every written file.
    #[must_use]
    pub fn into_written(self) -> Vec<WrittenSegment> {
        self.written
    }
}

impl SegmentSink for DirectorySink {
    fn write_segment(&mut self, header: &Header, segment: &Segment<'_>) -> Result<()> {
        let path = self.path_for(segment.index());
        write_table_atomic(&path, header, segment.rows()).map_err(|source| Error::Output {
            path: path.clone(),
            source,
        })?;

        info!(
            index = segment.index(),
            rows = segment.len(),
            path = %path.display(),
            "Wrote segment"
        );
        self.written.push(WrittenSegment {
            index: segment.index(),
            path,
            start: segment.start(),
            rows: segment.len(),
        });
        Ok(())
    }
}
