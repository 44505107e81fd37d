//! In-memory representation of a tab-delimited log.
//!
//! A [`Table`] is produced once by the reader and is read-only afterwards.
//! Rows are kept positionally aligned with the [`Header`], but the reader does
//! not enforce equal field counts; callers that index into a row must handle
//! a short row themselves.

use std::collections::HashSet;

/// Ordered field names taken from the first line of the input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    names: Vec<String>,
}

impl Header {
    /// Creates a header from field names in column order.
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Returns the zero-based column index of `name`.
    ///
    /// When a name appears more than once the first column wins.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Returns the field names in column order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the header has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns every name that occurs more than once, in first-repeat order.
    #[must_use]
    pub fn duplicates(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.names
            .iter()
            .filter(|n| !seen.insert(n.as_str()) && reported.insert(n.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// One data line of the input, split into cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row(Vec<String>);

impl Row {
    /// Creates a row from its cells.
    #[must_use]
    pub fn new(cells: Vec<String>) -> Self {
        Self(cells)
    }

    /// Returns the cell at `index`, if the row is long enough.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Returns all cells in column order.
    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the row has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A header plus every data row of a log, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    header: Header,
    rows: Vec<Row>,
    /// 1-based source line of each row, parallel to `rows`.
    lines: Vec<u64>,
}

impl Table {
    /// Creates a table whose rows directly follow the header, one per line.
    #[must_use]
    pub fn new(header: Header, rows: Vec<Row>) -> Self {
        let lines = (2..).take(rows.len()).collect();
        Self {
            header,
            rows,
            lines,
        }
    }

    /// Creates a table with explicit source line numbers for each row.
    pub(crate) fn with_lines(header: Header, rows: Vec<Row>, lines: Vec<u64>) -> Self {
        debug_assert_eq!(rows.len(), lines.len());
        Self {
            header,
            rows,
            lines,
        }
    }

    /// Returns the header.
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the data rows, excluding the header.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the 1-based source line of the row at `position`.
    ///
    /// Falls back to `position + 2` (header on line 1) for positions the
    /// reader did not record.
    #[must_use]
    pub fn line_number(&self, position: usize) -> u64 {
        self.lines
            .get(position)
            .copied()
            .unwrap_or(position as u64 + 2)
    }

    /// Consumes the table, returning the header and rows.
    #[must_use]
    pub fn into_parts(self) -> (Header, Vec<Row>) {
        (self.header, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn header(names: &[&str]) -> Header {
        Header::new(names.iter().map(ToString::to_string).collect())
    }

    #[rstest]
    #[case::first("t", Some(0))]
    #[case::middle("state", Some(1))]
    #[case::last("acc_x", Some(2))]
    #[case::absent("acc_y", None)]
    #[case::case_sensitive("State", None)]
    fn index_of_resolves_names(#[case] name: &str, #[case] expected: Option<usize>) {
        let h = header(&["t", "state", "acc_x"]);
        assert_eq!(h.index_of(name), expected);
    }

    #[test]
    fn index_of_prefers_first_duplicate() {
        let h = header(&["a", "b", "a"]);
        assert_eq!(h.index_of("a"), Some(0));
    }

    #[test]
    fn duplicates_reports_each_name_once() {
        let h = header(&["a", "b", "a", "c", "a", "b"]);
        assert_eq!(h.duplicates(), vec!["a", "b"]);
        assert!(header(&["x", "y"]).duplicates().is_empty());
    }

    #[test]
    fn row_get_handles_short_rows() {
        let row: Row = ["1", "2"].into_iter().collect();
        assert_eq!(row.get(1), Some("2"));
        assert_eq!(row.get(2), None);
        assert_eq!(row.len(), 2);
        assert!(!row.is_empty());
        assert!(Row::default().is_empty());
    }

    #[test]
    fn header_len_and_emptiness() {
        assert_eq!(header(&["t", "v"]).len(), 2);
        assert!(Header::default().is_empty());
    }

    #[test]
    fn new_table_numbers_rows_after_header() {
        let rows = vec![Row::new(vec!["0".into()]), Row::new(vec!["1".into()])];
        let table = Table::new(header(&["t"]), rows);
        assert_eq!(table.line_number(0), 2);
        assert_eq!(table.line_number(1), 3);
        assert_eq!(table.line_number(7), 9);
    }

    #[test]
    fn with_lines_keeps_recorded_positions() {
        let rows = vec![Row::new(vec!["0".into()])];
        let table = Table::with_lines(header(&["t"]), rows, vec![5]);
        assert_eq!(table.line_number(0), 5);
    }
}
