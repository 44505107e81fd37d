//! Property tests for segmentation over generated logs.

use proptest::prelude::*;
use seglog::commands::split::split;
use seglog::config::RunConfig;
use seglog::predicate::{CompiledPredicate, parse_predicate};
use seglog::segment::{CollectedSegment, DirectorySink, MemorySink, Segmenter};
use seglog_tsv::{Header, Row, Table, read_table, write_table_atomic};
use std::fs;
use tempfile::TempDir;

const PREDICATE: &str = "v >= 1 && w < 3";

fn table_of(values: &[(u8, u8)]) -> Table {
    let header = Header::new(vec!["t".to_string(), "v".to_string(), "w".to_string()]);
    let rows = values
        .iter()
        .enumerate()
        .map(|(i, (v, w))| Row::from_iter([i.to_string(), v.to_string(), w.to_string()]))
        .collect();
    Table::new(header, rows)
}

fn expected_match(values: &[(u8, u8)], i: usize) -> bool {
    let (v, w) = values[i];
    i + 1 < values.len() && v >= 1 && w < 3
}

fn collect(table: &Table) -> Vec<CollectedSegment> {
    let conditions = parse_predicate(PREDICATE).unwrap();
    let compiled = CompiledPredicate::compile(table.header(), &conditions).unwrap();
    let mut sink = MemorySink::new();
    Segmenter::new(&compiled).run(table, &mut sink).unwrap();
    sink.into_segments()
}

fn log_values() -> impl Strategy<Value = Vec<(u8, u8)>> {
    prop::collection::vec((0u8..3, 0u8..5), 0..60)
}

proptest! {
    #[test]
    fn segments_hold_exactly_the_matching_rows(values in log_values()) {
        let table = table_of(&values);
        let segments = collect(&table);

        let written: Vec<usize> = segments
            .iter()
            .flat_map(|s| s.start..s.start + s.rows.len())
            .collect();
        let expected: Vec<usize> = (0..values.len())
            .filter(|&i| expected_match(&values, i))
            .collect();
        prop_assert_eq!(written, expected);

        for segment in &segments {
            prop_assert_eq!(&segment.rows[..], &table.rows()[segment.start..segment.start + segment.rows.len()]);
        }
    }

    #[test]
    fn segments_are_maximal_and_numbered(values in log_values()) {
        let table = table_of(&values);
        let segments = collect(&table);

        for (n, segment) in segments.iter().enumerate() {
            prop_assert_eq!(segment.index, n + 1);
            prop_assert!(!segment.rows.is_empty());

            let end = segment.start + segment.rows.len();
            prop_assert!(end < values.len());
            prop_assert!(!expected_match(&values, end));
            if segment.start > 0 {
                prop_assert!(!expected_match(&values, segment.start - 1));
            }
        }
    }

    #[test]
    fn last_row_is_never_written(values in log_values()) {
        let table = table_of(&values);
        let segments = collect(&table);

        if let Some(segment) = segments.last() {
            prop_assert!(segment.start + segment.rows.len() < values.len());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn written_files_read_back_as_segments(values in log_values()) {
        let temp = TempDir::new().unwrap();
        let table = table_of(&values);
        let conditions = parse_predicate(PREDICATE).unwrap();
        let compiled = CompiledPredicate::compile(table.header(), &conditions).unwrap();

        let mut sink = DirectorySink::new(temp.path(), "flight");
        let summary = Segmenter::new(&compiled).run(&table, &mut sink).unwrap();
        let expected = collect(&table);

        prop_assert_eq!(summary.segments, expected.len());
        for (written, segment) in sink.written().iter().zip(&expected) {
            let back = read_table(&written.path).unwrap();
            prop_assert_eq!(back.header(), table.header());
            prop_assert_eq!(back.rows(), &segment.rows[..]);
        }
    }

    #[test]
    fn splitting_twice_gives_the_same_files(values in log_values()) {
        let temp = TempDir::new().unwrap();
        let table = table_of(&values);
        let input = temp.path().join("log.tsv");
        write_table_atomic(&input, table.header(), table.rows()).unwrap();
        let out = temp.path().join("logs");

        let snapshot = || -> Vec<(String, String)> {
            let mut files: Vec<(String, String)> = fs::read_dir(&out)
                .unwrap()
                .map(|e| {
                    let path = e.unwrap().path();
                    let name = path.file_name().unwrap().to_string_lossy().into_owned();
                    (name, fs::read_to_string(&path).unwrap())
                })
                .collect();
            files.sort();
            files
        };

        let first = split(RunConfig::new(&input, &out, "flight"), PREDICATE).unwrap();
        let before = snapshot();
        let second = split(RunConfig::new(&input, &out, "flight"), PREDICATE).unwrap();

        prop_assert_eq!(first.segments, second.segments);
        prop_assert_eq!(before, snapshot());
    }
}
