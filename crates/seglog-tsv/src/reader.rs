//! Tab-delimited reading operations.
//!
//! The whole log is loaded into a [`Table`]: the first record becomes the
//! [`Header`] and every following record a [`Row`]. Field counts are not
//! checked against the header.

use crate::table::{Header, Row, Table};
use crate::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Reader for tab-delimited logs.
///
/// `TsvReader` wraps any [`Read`] source. Quoted fields follow the usual
/// double-quote rules, and `\n`, `\r` and `\r\n` are all accepted as line
/// terminators.
///
/// # Examples
///
/// ```
/// use seglog_tsv::TsvReader;
///
/// let data = "t\tstate\n0\t1\n1\t0\n";
/// let table = TsvReader::new(data.as_bytes()).read_table().unwrap();
/// assert_eq!(table.header().names(), &["t", "state"]);
/// assert_eq!(table.rows().len(), 2);
/// ```
pub struct TsvReader<R> {
    reader: csv::Reader<R>,
}

impl<R: Read> TsvReader<R> {
    /// Creates a new `TsvReader` wrapping the given reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        Self { reader }
    }

    /// Reads the header and all remaining rows into memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingHeader`] if the input has no records at all,
    /// or [`Error::Csv`] if a record cannot be decoded (for example invalid
    /// UTF-8 or an unterminated quote).
    pub fn read_table(self) -> Result<Table> {
        let mut records = self.reader.into_records();

        let header = match records.next() {
            Some(record) => Header::new(record?.iter().map(str::to_owned).collect()),
            None => return Err(Error::MissingHeader),
        };

        for name in header.duplicates() {
            warn!(field = name, "Duplicate header name; first column is used");
        }

        let mut rows = Vec::new();
        let mut lines = Vec::new();
        for record in records {
            let record = record?;
            let line = record
                .position()
                .map_or(rows.len() as u64 + 2, csv::Position::line);
            lines.push(line);
            rows.push(record.iter().collect::<Row>());
        }

        debug!(
            columns = header.len(),
            rows = rows.len(),
            "Read tab-delimited table"
        );
        Ok(Table::with_lines(header, rows, lines))
    }
}

/// Reads a tab-delimited log from `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened, otherwise the errors
/// of [`TsvReader::read_table`].
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let file = File::open(path.as_ref())?;
    TsvReader::new(file).read_table()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn read(data: &str) -> Result<Table> {
        TsvReader::new(data.as_bytes()).read_table()
    }

    #[test]
    fn splits_header_from_rows() {
        let table = read("t\tstate\tacc_x\n0\t0\t5\n1\t1\t25\n").unwrap();
        assert_eq!(table.header().names(), &["t", "state", "acc_x"]);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[1].cells(), &["1", "1", "25"]);
    }

    #[test]
    fn header_only_input_has_no_rows() {
        let table = read("t\tstate\n").unwrap();
        assert_eq!(table.header().len(), 2);
        assert!(table.rows().is_empty());
    }

    #[test]
    fn empty_input_is_missing_header() {
        assert!(matches!(read(""), Err(Error::MissingHeader)));
    }

    #[rstest]
    #[case::lf("a\tb\n1\t2\n")]
    #[case::crlf("a\tb\r\n1\t2\r\n")]
    #[case::no_trailing_newline("a\tb\n1\t2")]
    fn accepts_common_line_endings(#[case] data: &str) {
        let table = read(data).unwrap();
        assert_eq!(table.rows(), &[Row::new(vec!["1".into(), "2".into()])]);
    }

    #[test]
    fn short_and_long_rows_are_kept() {
        let table = read("a\tb\n1\n1\t2\t3\n").unwrap();
        assert_eq!(table.rows()[0].len(), 1);
        assert_eq!(table.rows()[1].len(), 3);
    }

    #[test]
    fn records_source_line_numbers() {
        let table = read("a\n1\n2\n3\n").unwrap();
        assert_eq!(table.line_number(0), 2);
        assert_eq!(table.line_number(2), 4);
    }

    #[test]
    fn quoted_fields_may_contain_tabs() {
        let table = read("a\tb\n\"x\ty\"\t2\n").unwrap();
        assert_eq!(table.rows()[0].cells(), &["x\ty", "2"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = read_table(dir.path().join("nope.txt"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
