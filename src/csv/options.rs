//! Import settings for delimited text

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SEPARATOR: char = ',';
pub const DEFAULT_QUOTE: char = '"';
pub const DEFAULT_ESCAPE: char = '\\';

/// Rejected parser settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("the separator character must be defined")]
    MissingSeparator,

    #[error("the separator, quote and escape characters must be different")]
    DuplicateCharacters,
}

/// How a file is split into fields and turned into a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Field separator
    pub separator: char,
    /// Quote character, `None` disables quoting
    pub quote: Option<char>,
    /// Escape character, `None` disables escaping
    pub escape: Option<char>,
    /// Drop every character that is not inside quotes
    pub strict_quotes: bool,
    /// Drop whitespace that precedes an embedded opening quote
    pub ignore_leading_whitespace: bool,
    /// Preamble lines consumed before parsing starts
    pub lines_to_skip: usize,
    /// First record names the columns
    pub header: bool,
    /// Quoted fields may span several lines
    pub multiline: bool,
    /// Convert text columns that fully parse as numbers
    pub promote_numeric: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            quote: Some(DEFAULT_QUOTE),
            escape: Some(DEFAULT_ESCAPE),
            strict_quotes: false,
            ignore_leading_whitespace: true,
            lines_to_skip: 0,
            header: true,
            multiline: false,
            promote_numeric: true,
        }
    }
}

impl ParserOptions {
    /// Default options with a different separator
    pub fn with_separator(separator: char) -> Self {
        Self {
            separator,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.separator == '\0' {
            return Err(ConfigError::MissingSeparator);
        }
        let quote = self.quote.filter(|c| *c != '\0');
        let escape = self.escape.filter(|c| *c != '\0');

        let clashes = quote == Some(self.separator)
            || escape == Some(self.separator)
            || (quote.is_some() && quote == escape);
        if clashes {
            return Err(ConfigError::DuplicateCharacters);
        }
        Ok(())
    }
}
