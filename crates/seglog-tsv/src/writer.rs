//! Tab-delimited writing operations.
//!
//! Output uses a tab delimiter and `\n` line endings. Fields are quoted only
//! when they contain a tab, a quote or a line break.

use crate::table::{Header, Row};
use crate::{Error, Result};
use std::io::{self, Write};

/// Writer for tab-delimited tables.
///
/// # Examples
///
/// ```
/// use seglog_tsv::{Header, Row, TsvWriter};
///
/// let header = Header::new(vec!["t".into(), "state".into()]);
/// let rows = vec![Row::new(vec!["1".into(), "1".into()])];
///
/// let mut writer = TsvWriter::new(Vec::new());
/// writer.write_table(&header, &rows).unwrap();
/// let bytes = writer.into_inner().unwrap();
/// assert_eq!(bytes, b"t\tstate\n1\t1\n");
/// ```
pub struct TsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TsvWriter<W> {
    /// Creates a new `TsvWriter` wrapping the given writer.
    ///
    /// Writes are buffered; [`into_inner`](Self::into_inner) pushes them
    /// through.
    #[must_use]
    pub fn new(writer: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .terminator(csv::Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(writer);
        Self { writer }
    }

    /// Writes the header line.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_header(&mut self, header: &Header) -> Result<()> {
        self.writer.write_record(header.names())?;
        Ok(())
    }

    /// Writes one data row.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_row(&mut self, row: &Row) -> Result<()> {
        self.writer.write_record(row.cells())?;
        Ok(())
    }

    /// Writes the header followed by every row in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_table(&mut self, header: &Header, rows: &[Row]) -> Result<()> {
        self.write_header(header)?;
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    /// Flushes and consumes the writer, returning the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| {
            let err = e.error();
            Error::Io(io::Error::new(err.kind(), err.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Header {
        Header::new(names.iter().map(ToString::to_string).collect())
    }

    fn row(cells: &[&str]) -> Row {
        cells.iter().copied().collect()
    }

    fn render(header: &Header, rows: &[Row]) -> String {
        let mut writer = TsvWriter::new(Vec::new());
        writer.write_table(header, rows).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn header_precedes_rows() {
        let out = render(
            &header(&["t", "state", "acc_x"]),
            &[row(&["1", "1", "25"]), row(&["2", "1", "30"])],
        );
        assert_eq!(out, "t\tstate\tacc_x\n1\t1\t25\n2\t1\t30\n");
    }

    #[test]
    fn header_only_when_no_rows() {
        assert_eq!(render(&header(&["a", "b"]), &[]), "a\tb\n");
    }

    #[test]
    fn embedded_tab_is_quoted() {
        let out = render(&header(&["a"]), &[row(&["x\ty"])]);
        assert_eq!(out, "a\n\"x\ty\"\n");
    }

    #[test]
    fn ragged_rows_are_written_as_is() {
        let out = render(&header(&["a", "b"]), &[row(&["1"]), row(&["1", "2", "3"])]);
        assert_eq!(out, "a\tb\n1\n1\t2\t3\n");
    }
}
