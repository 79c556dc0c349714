//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;

use statgrid::csv::{CsvParser, ParseError, ParserOptions};
use statgrid::data::{Naming, Table};

/// Parse `content` with default options and a fresh naming context
pub fn parse(content: &str) -> Result<Table, ParseError> {
    CsvParser::default().parse_str(content, &mut Naming::new())
}

/// Parse `content` with the given options and a fresh naming context
pub fn parse_with(options: ParserOptions, content: &str) -> Result<Table, ParseError> {
    CsvParser::new(options)
        .expect("valid options")
        .parse_str(content, &mut Naming::new())
}

/// Write `content` to `name` inside a new temporary directory
pub fn temp_file(name: &str, content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    (dir, path)
}

/// Display strings of one column, top to bottom
pub fn column_strings(table: &Table, col: usize) -> Vec<String> {
    table
        .column(col)
        .expect("column in range")
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Panic unless the table's shape invariants hold
pub fn assert_table_invariants(table: &Table) {
    assert!(table.columns() >= 1, "table has no columns");
    assert!(table.rows() >= 1, "table has no rows");

    let mut names = HashSet::new();
    for column in table.columns_iter() {
        assert_eq!(
            column.len(),
            table.rows(),
            "column {} has {} cells, table has {} rows",
            column.name(),
            column.len(),
            table.rows()
        );
        assert!(!column.name().is_empty(), "empty column name");
        assert!(
            names.insert(column.name().to_string()),
            "duplicate column name {}",
            column.name()
        );
        let ty = column.data_type();
        assert!(
            column.iter().all(|cell| cell.data_type() == ty),
            "column {} mixes cell types",
            column.name()
        );
    }
}

/// Small deterministic generator for operation sequences
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    /// Value in `0..bound`, or 0 when `bound` is 0
    pub fn below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            0
        } else {
            (self.next() % bound as u64) as usize
        }
    }
}
