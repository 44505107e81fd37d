//! Integration tests for writing tables to disk and reading them back.
//!
//! These tests verify that a file produced by `write_table_atomic` is read
//! back by `read_table` as the same header and rows.

use rstest::{fixture, rstest};
use seglog_tsv::{Header, Row, Table, read_table, write_table_atomic};
use tempfile::TempDir;

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

fn header(names: &[&str]) -> Header {
    Header::new(names.iter().map(ToString::to_string).collect())
}

fn rows(cells: &[&[&str]]) -> Vec<Row> {
    cells.iter().map(|r| r.iter().copied().collect()).collect()
}

#[rstest]
#[case::telemetry(
    header(&["t", "state", "acc_x"]),
    rows(&[&["1", "1", "25"], &["2", "1", "30.5"]])
)]
#[case::negative_and_scientific(
    header(&["t", "alt"]),
    rows(&[&["0", "-12.75"], &["1", "1e3"]])
)]
#[case::quoted_content(
    header(&["t", "note"]),
    rows(&[&["0", "has\ttab"], &["1", "say \"hi\""], &["2", "multi\nline"]])
)]
#[case::empty_cells(
    header(&["a", "b", "c"]),
    rows(&[&["", "1", ""], &["2", "", "3"]])
)]
#[case::header_only(header(&["only"]), Vec::new())]
fn written_table_reads_back_identically(
    temp_dir: TempDir,
    #[case] header: Header,
    #[case] rows: Vec<Row>,
) {
    let path = temp_dir.path().join("flight-1.txt");
    write_table_atomic(&path, &header, &rows).unwrap();

    let table = read_table(&path).unwrap();
    assert_eq!(table.header(), &header);
    assert_eq!(table.rows(), rows.as_slice());
}

#[rstest]
fn rewriting_a_read_table_is_byte_identical(temp_dir: TempDir) {
    let source = temp_dir.path().join("source.txt");
    std::fs::write(&source, "t\tstate\tacc_x\n0\t0\t5\n1\t1\t25\n").unwrap();

    let (header, rows) = read_table(&source).unwrap().into_parts();
    let copy = temp_dir.path().join("copy.txt");
    write_table_atomic(&copy, &header, &rows).unwrap();

    assert_eq!(
        std::fs::read(&source).unwrap(),
        std::fs::read(&copy).unwrap()
    );
}

#[rstest]
fn crlf_input_is_normalised_to_lf(temp_dir: TempDir) {
    let source = temp_dir.path().join("source.txt");
    std::fs::write(&source, "t\tv\r\n0\t1\r\n").unwrap();

    let table: Table = read_table(&source).unwrap();
    let copy = temp_dir.path().join("copy.txt");
    write_table_atomic(&copy, table.header(), table.rows()).unwrap();

    assert_eq!(std::fs::read_to_string(&copy).unwrap(), "t\tv\n0\t1\n");
}
