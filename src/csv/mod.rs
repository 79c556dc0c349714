//! Delimited text import and export
//!
//! Reading goes line by line through a [`LineTokenizer`] and is assembled
//! into a [`Table`](crate::data::Table) by [`CsvParser`]:
//!
//! ```text
//! BufRead
//! └── CsvParser (ParserOptions)
//!     ├── LineTokenizer   (one line -> fields, quotes and escapes)
//!     ├── header / rows   (Table::set_column_name, Table::set_str)
//!     └── numeric promotion
//! ```
//!
//! The other direction is [`write_table`], and [`render_table`] gives a
//! plain-text dump for terminals and logs.

mod options;
mod parser;
pub mod render;
pub mod sniff;
mod tokenizer;
mod writer;

pub use options::{ConfigError, ParserOptions, DEFAULT_ESCAPE, DEFAULT_QUOTE, DEFAULT_SEPARATOR};
pub use parser::{CsvParser, ParseError};
pub use render::{render_table, RenderOptions};
pub use sniff::{detect_delimiter, Delimiter};
pub use tokenizer::{LineTokenizer, TokenizeError};
pub use writer::{write_file, write_table, WriteError};
