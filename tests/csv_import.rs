//! Delimited text import tests
//!
//! End-to-end checks from text or files on disk to finished tables.

mod common;

use common::{assert_table_invariants, column_strings, parse, parse_with, temp_file};
use statgrid::csv::{
    detect_delimiter, render_table, write_file, CsvParser, Delimiter, LineTokenizer, ParseError,
    ParserOptions, RenderOptions,
};
use statgrid::data::{Cell, DataType, Naming};
use statgrid::session::Session;

// ========================================================================
// Tokenizer
// ========================================================================

#[test]
fn test_quoted_separator_stays_in_field() {
    let mut tokenizer = LineTokenizer::new(&ParserOptions::default());
    let fields = tokenizer.tokenize(r#"a,"b,c",d"#).unwrap();
    assert_eq!(fields, vec!["a", "b,c", "d"]);
}

// ========================================================================
// Whole imports
// ========================================================================

#[test]
fn test_header_names_and_numeric_promotion() {
    let table = parse("name,age\nAda,36\nGrace,85\n").unwrap();

    assert_table_invariants(&table);
    assert_eq!((table.columns(), table.rows()), (2, 2));
    assert_eq!(table.column_index("age"), Some(1));
    assert_eq!(table.column_type(0), Some(DataType::Character));
    assert_eq!(table.column_type(1), Some(DataType::Numeric));
    assert_eq!(table[(1, 0)].as_number(), Some(36.0));
    assert_eq!(table[(1, 1)].as_number(), Some(85.0));
}

#[test]
fn test_short_row_fails_whole_import() {
    let result = parse("a,b\n1,2\n3\n");
    assert!(matches!(
        result,
        Err(ParseError::FieldCountMismatch {
            expected: 2,
            found: 1,
            ..
        })
    ));
}

#[test]
fn test_long_row_fails_whole_import() {
    let result = parse("a,b\n1,2,3\n");
    assert!(matches!(
        result,
        Err(ParseError::FieldCountMismatch {
            line: 2,
            row: 0,
            expected: 2,
            found: 3
        })
    ));
}

#[test]
fn test_quoted_fields_and_escapes() {
    let table = parse("text,n\n\"a, b\",1\n\"say \"\"hi\"\"\",2\n\"x\\\"y\",3\n").unwrap();

    assert_eq!(
        column_strings(&table, 0),
        vec!["a, b", "say \"hi\"", "x\"y"]
    );
    assert_eq!(column_strings(&table, 1), vec!["1", "2", "3"]);
}

#[test]
fn test_semicolon_file_without_header() {
    let options = ParserOptions {
        header: false,
        ..ParserOptions::with_separator(';')
    };
    let table = parse_with(options, "1;2,5\n3;4,5\n").unwrap();

    assert_eq!(table.column_name(1), Some("Column2"));
    assert_eq!(table.column_type(0), Some(DataType::Numeric));
    assert_eq!(table.column_type(1), Some(DataType::Character));
    assert_eq!(table[(1, 0)], Cell::character("2,5"));
}

#[test]
fn test_large_import_trims_preallocated_rows() {
    let mut content = String::from("i,sq\n");
    for i in 0..500 {
        content.push_str(&format!("{},{}\n", i, i * i));
    }
    let table = parse(&content).unwrap();

    assert_table_invariants(&table);
    assert_eq!(table.rows(), 500);
    assert_eq!(table[(1, 499)], Cell::numeric(249001.0));
}

#[test]
fn test_single_data_row_trims_to_one() {
    let table = parse("only\nvalue\n").unwrap();
    assert_eq!(table.rows(), 1);
    assert_eq!(table[(0, 0)], Cell::character("value"));
}

#[test]
fn test_no_lines_and_no_data() {
    assert!(matches!(parse(""), Err(ParseError::Empty)));
    assert!(matches!(parse("h1,h2\n"), Err(ParseError::NoData)));
}

// ========================================================================
// Files
// ========================================================================

#[test]
fn test_parse_file_names_table_after_stem() {
    let (_dir, path) = temp_file("Survey.csv", "q,score\nfirst,4\nsecond,5\n");
    let mut naming = Naming::new();
    let table = CsvParser::default().parse_file(&path, &mut naming).unwrap();

    assert_eq!(table.name(), "survey");
    assert_eq!(table.rows(), 2);
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let err = CsvParser::default()
        .parse_file(&path, &mut Naming::new())
        .unwrap_err();

    assert!(matches!(err, ParseError::Open { .. }));
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn test_shape_prescan_matches_import() {
    let content = "x,y,z\n1,2,3\n4,5,6\n7,8,9\n";
    let (_dir, path) = temp_file("grid.csv", content);
    let parser = CsvParser::default();

    let file = std::io::BufReader::new(std::fs::File::open(&path).unwrap());
    assert_eq!(parser.count_rows(file).unwrap(), 3);
    let file = std::io::BufReader::new(std::fs::File::open(&path).unwrap());
    assert_eq!(parser.count_columns(file).unwrap(), 3);

    let table = parse(content).unwrap();
    assert_eq!((table.rows(), table.columns()), (3, 3));
}

#[test]
fn test_write_then_reimport() {
    let mut original = parse("city,temp\n\"Oslo, NO\",-3.5\nLima,\n").unwrap();
    original.set_str(0, 1, r#"C:\cities\"Lima""#).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    write_file(&original, &path, &ParserOptions::default()).unwrap();

    let reread = CsvParser::default()
        .parse_file(&path, &mut Naming::new())
        .unwrap();
    assert_eq!(reread.columns(), 2);
    assert_eq!(
        column_strings(&reread, 0),
        vec!["Oslo, NO", r#"C:\cities\"Lima""#]
    );
    assert_eq!(reread[(1, 0)], Cell::numeric(-3.5));
    assert!(reread[(1, 1)].is_empty());
}

#[test]
fn test_session_opens_detected_tab_file() {
    let content = "a\tb\n1\t2\n";
    let (_dir, path) = temp_file("data.tsv", content);
    let options = ParserOptions::with_separator(detect_delimiter(content).as_char());
    assert_eq!(detect_delimiter(content), Delimiter::Tab);

    let mut session = Session::new("test");
    let index = session.open_file(&path, &options).unwrap();
    let table = session.table(index).unwrap();
    assert_eq!(table.name(), "data");
    assert_eq!(table.column_name(1), Some("b"));
}

// ========================================================================
// Rendering
// ========================================================================

#[test]
fn test_render_imported_table() {
    let mut naming = Naming::new();
    let table = CsvParser::default()
        .parse_str("name,score\nAda,1\nBob,\n", &mut naming)
        .unwrap();
    let text = render_table(&table, &RenderOptions::default());

    assert!(text.starts_with("== Table1 == 2C, 2R =="));
    assert!(text.contains("Ada\t1\t\n"));
    assert!(text.contains("Bob\t.\t\n"));
}

// ========================================================================
// Bundled sample
// ========================================================================

#[test]
fn test_bundled_sample_with_preamble() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("samples/people.csv");
    let options = ParserOptions {
        lines_to_skip: 1,
        ..ParserOptions::default()
    };
    let table = CsvParser::new(options)
        .unwrap()
        .parse_file(&path, &mut Naming::new())
        .unwrap();

    assert_table_invariants(&table);
    assert_eq!(table.name(), "people");
    assert_eq!((table.columns(), table.rows()), (4, 4));
    assert_eq!(table.column_type(1), Some(DataType::Numeric));
    assert!(table[(1, 3)].is_empty());
    assert_eq!(
        column_strings(&table, 3),
        vec![
            "wrote the first \"program\"",
            "",
            " escape dropped",
            "a, b, c"
        ]
    );
    assert_eq!(table[(2, 1)], Cell::character("Arlington, VA"));
}

#[test]
fn test_bundled_sample_without_skip_fails() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("samples/people.csv");
    let err = CsvParser::default()
        .parse_file(&path, &mut Naming::new())
        .unwrap_err();
    assert!(matches!(
        err,
        ParseError::FieldCountMismatch {
            line: 2,
            expected: 1,
            found: 4,
            ..
        }
    ));
}
