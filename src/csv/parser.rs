//! Delimited text to [`Table`] conversion
//!
//! The first record fixes the column count. Every later record must have
//! exactly that many fields or the whole import fails; a table is only handed
//! back once every line has been read.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::options::{ConfigError, ParserOptions};
use super::sniff::table_name_for;
use super::tokenizer::{LineTokenizer, TokenizeError};
use crate::data::{DataError, DataType, Naming, Table};

/// Error type for delimited text imports
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("parse error at line {line}: {source}")]
    Tokenize {
        line: usize,
        #[source]
        source: TokenizeError,
    },

    #[error("line {line} (data row {row}) has {found} fields, expected {expected}")]
    FieldCountMismatch {
        line: usize,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("input has no lines to parse")]
    Empty,

    #[error("input has no data rows")]
    NoData,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),
}

impl ParseError {
    /// 1-based input line the error refers to, when there is one
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Tokenize { line, .. } | ParseError::FieldCountMismatch { line, .. } => {
                Some(*line)
            }
            _ => None,
        }
    }
}

/// Delimited text importer
#[derive(Debug, Clone)]
pub struct CsvParser {
    options: ParserOptions,
    tokenizer: LineTokenizer,
}

/// One logical record and the line it started on
type Record = (usize, Vec<String>);

impl CsvParser {
    pub fn new(options: ParserOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let tokenizer = LineTokenizer::new(&options);
        Ok(Self { options, tokenizer })
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Split a single line with this parser's settings
    pub fn parse_line(&mut self, line: &str) -> Result<Vec<String>, TokenizeError> {
        self.tokenizer.tokenize(line)
    }

    /// Import a file; the table is named after the file stem
    pub fn parse_file(&mut self, path: &Path, naming: &mut Naming) -> Result<Table, ParseError> {
        let reader = open(path)?;
        let name = table_name_for(path).unwrap_or_default();
        let table = self.build(reader, Table::with_name(naming, &name))?;

        tracing::info!(
            path = %path.display(),
            rows = table.rows(),
            columns = table.columns(),
            "imported table"
        );
        Ok(table)
    }

    pub fn parse_str(&mut self, content: &str, naming: &mut Naming) -> Result<Table, ParseError> {
        self.parse_reader(Cursor::new(content.as_bytes()), naming)
    }

    pub fn parse_reader<R: BufRead>(
        &mut self,
        reader: R,
        naming: &mut Naming,
    ) -> Result<Table, ParseError> {
        self.build(reader, Table::new(naming))
    }

    /// Number of data rows, counting physical lines after the skipped preamble
    pub fn count_rows<R: BufRead>(&self, reader: R) -> Result<usize, ParseError> {
        let mut count: usize = 0;
        for line in reader.lines().skip(self.options.lines_to_skip) {
            line?;
            count += 1;
        }
        if self.options.header {
            count = count.saturating_sub(1);
        }
        Ok(count)
    }

    /// Number of fields in the first record after the skipped preamble
    pub fn count_columns<R: BufRead>(&self, reader: R) -> Result<usize, ParseError> {
        let mut tokenizer = LineTokenizer::new(&self.options);
        let mut lines = reader
            .lines()
            .enumerate()
            .skip(self.options.lines_to_skip);
        let (index, line) = lines.next().ok_or(ParseError::Empty)?;
        let fields = tokenizer.tokenize(&line?).map_err(|source| ParseError::Tokenize {
            line: index + 1,
            source,
        })?;
        Ok(fields.len())
    }

    fn build<R: BufRead>(&mut self, reader: R, mut table: Table) -> Result<Table, ParseError> {
        let mut lines = reader.lines().enumerate();
        for _ in 0..self.options.lines_to_skip {
            match lines.next() {
                Some((_, line)) => {
                    line?;
                }
                None => return Err(ParseError::Empty),
            }
        }

        let (first_line, first) = self.next_record(&mut lines)?.ok_or(ParseError::Empty)?;
        let width = first.len();
        if width > 1 {
            table.append_columns(DataType::Character, width - 1)?;
        }
        tracing::debug!(line = first_line, width, "first record");

        let mut row = 0;
        if self.options.header {
            table.set_column_names(&header_names(&first))?;
        } else {
            store_row(&mut table, row, &first)?;
            row += 1;
        }

        while let Some((line, fields)) = self.next_record(&mut lines)? {
            if fields.len() != width {
                return Err(ParseError::FieldCountMismatch {
                    line,
                    row,
                    expected: width,
                    found: fields.len(),
                });
            }
            if row >= table.rows() {
                table.append_rows(1)?;
            }
            store_row(&mut table, row, &fields)?;
            row += 1;
        }

        if row == 0 {
            return Err(ParseError::NoData);
        }
        if row < table.rows() {
            let excess = table.rows() - row;
            table.remove_rows(row, excess)?;
        }

        if self.options.promote_numeric {
            promote_numeric_columns(&mut table)?;
        }
        Ok(table)
    }

    /// Read lines until one full record is tokenized
    fn next_record<I>(&mut self, lines: &mut I) -> Result<Option<Record>, ParseError>
    where
        I: Iterator<Item = (usize, io::Result<String>)>,
    {
        let mut start = None;
        let mut last = 0;

        for (index, line) in lines.by_ref() {
            let line = line?;
            let number = index + 1;
            let start_line = *start.get_or_insert(number);
            last = number;

            let tokenize_error = |source| ParseError::Tokenize {
                line: number,
                source,
            };
            if !self.options.multiline {
                let fields = self.tokenizer.tokenize(&line).map_err(tokenize_error)?;
                return Ok(Some((start_line, fields)));
            }
            if let Some(fields) = self.tokenizer.tokenize_multi(&line).map_err(tokenize_error)? {
                return Ok(Some((start_line, fields)));
            }
        }

        if self.tokenizer.is_pending() {
            self.tokenizer.finish();
            return Err(ParseError::Tokenize {
                line: last,
                source: TokenizeError::UnterminatedQuote,
            });
        }
        Ok(None)
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        let options = ParserOptions::default();
        let tokenizer = LineTokenizer::new(&options);
        Self { options, tokenizer }
    }
}

fn open(path: &Path) -> Result<BufReader<File>, ParseError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ParseError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Header tokens usable as column names; empty and repeated ones are `None`
fn header_names(fields: &[String]) -> Vec<Option<&str>> {
    let mut names: Vec<Option<&str>> = Vec::with_capacity(fields.len());
    for (col, field) in fields.iter().enumerate() {
        let name = field.as_str();
        let usable = !name.is_empty() && !names.contains(&Some(name));
        if !usable {
            tracing::warn!(column = col, header = %name, "keeping generated column name");
        }
        names.push(usable.then_some(name));
    }
    names
}

fn store_row(table: &mut Table, row: usize, fields: &[String]) -> Result<(), DataError> {
    for (col, field) in fields.iter().enumerate() {
        table.set_str(col, row, field)?;
    }
    Ok(())
}

/// Turn every text column whose values all parse as numbers into a Numeric one
fn promote_numeric_columns(table: &mut Table) -> Result<(), DataError> {
    for col in 0..table.columns() {
        if table.column_type(col) != Some(DataType::Character) {
            continue;
        }
        if table.is_column_convertible(col, DataType::Numeric)? {
            table.convert_column(col, DataType::Numeric)?;
            tracing::debug!(column = table.column_name(col), "promoted to numeric");
        }
    }
    Ok(())
}
