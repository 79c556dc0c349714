//! Table to delimited text
//!
//! Writes a header record of column names followed by one record per row,
//! each cell in its display form, using the same separator, quote and escape
//! characters the parser is configured with. With a quote character set,
//! every field is quoted, quotes inside are doubled and the escape character
//! is written twice, so [`CsvParser`](super::CsvParser) reads back exactly
//! what was written. Without one, fields go out verbatim.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

use super::options::ParserOptions;
use crate::data::Table;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("{0:?} is not a single-byte character")]
    NonAsciiCharacter(char),

    #[error("failed to write record: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

fn ascii(c: char) -> Result<u8, WriteError> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(WriteError::NonAsciiCharacter(c))
    }
}

pub fn write_table<W: Write>(
    table: &Table,
    writer: W,
    options: &ParserOptions,
) -> Result<(), WriteError> {
    let mut builder = csv::WriterBuilder::new();
    builder.delimiter(ascii(options.separator)?);
    let escape = match options.quote {
        Some(quote) => {
            builder
                .quote(ascii(quote)?)
                .quote_style(csv::QuoteStyle::Always)
                .double_quote(true);
            options.escape
        }
        None => {
            builder.quote_style(csv::QuoteStyle::Never);
            None
        }
    };
    let mut out = builder.from_writer(writer);

    let field = |text: &str| -> String {
        match escape {
            Some(e) if text.contains(e) => text.replace(e, &format!("{e}{e}")),
            _ => text.to_string(),
        }
    };

    out.write_record(table.columns_iter().map(|column| field(column.name())))?;
    for row in 0..table.rows() {
        let record: Vec<String> = table
            .columns_iter()
            .map(|column| field(&column.get(row).map(ToString::to_string).unwrap_or_default()))
            .collect();
        out.write_record(&record)?;
    }
    out.flush()?;

    tracing::debug!(
        table = %table.name(),
        rows = table.rows(),
        "wrote delimited text"
    );
    Ok(())
}

pub fn write_file(table: &Table, path: &Path, options: &ParserOptions) -> Result<(), WriteError> {
    let file = File::create(path)?;
    write_table(table, file, options)?;
    tracing::info!(path = %path.display(), "saved table");
    Ok(())
}
