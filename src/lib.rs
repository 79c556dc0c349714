//! statgrid - typed tables loaded from delimited text
//!
//! [`data`] holds the table engine: cells, columns and tables with their
//! shape and type invariants. [`csv`] turns delimited text into tables and
//! back. [`session`] groups tables under one naming context. The remaining
//! modules carry configuration, logging and the command line for the
//! `statgrid` binary.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod csv;
pub mod data;
pub mod session;
pub mod tracing;

// Re-export commonly used types
pub use config::AppConfig;
pub use crate::csv::{CsvParser, ParseError, ParserOptions};
pub use data::{Cell, Column, DataError, DataType, Naming, Table};
pub use session::Session;
