//! Quote- and escape-aware splitting of one line into fields
//!
//! A single left-to-right scan keeps two flags: `in_quotes` (inside a quoted
//! span) and `in_field` (inside any field content, quoted or not). The rules:
//!
//! - escape followed by quote or escape, in a quoted or field context: the
//!   next character is taken literally; any other escape is dropped
//! - doubled quote in a quoted or field context: one literal quote
//! - any other quote toggles `in_quotes`; a quote in the middle of a field
//!   (not touching a separator) is kept as content unless `strict_quotes`
//! - separator outside quotes closes the field
//! - everything else is content, except outside quotes in `strict_quotes` mode
//!
//! A line that ends inside quotes is an error, or in multiline mode is held
//! back and continued by the next line.

use thiserror::Error;

use super::options::ParserOptions;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("unterminated quoted field at end of line")]
    UnterminatedQuote,
}

/// Fields already closed plus the open quoted field of an unfinished record
#[derive(Debug, Clone, Default)]
struct Pending {
    fields: Vec<String>,
    partial: String,
}

#[derive(Debug, Clone)]
pub struct LineTokenizer {
    separator: char,
    quote: Option<char>,
    escape: Option<char>,
    strict_quotes: bool,
    ignore_leading_whitespace: bool,
    in_field: bool,
    pending: Option<Pending>,
}

impl LineTokenizer {
    /// Build a tokenizer from options that already passed validation
    pub fn new(options: &ParserOptions) -> Self {
        Self {
            separator: options.separator,
            quote: options.quote.filter(|c| *c != '\0'),
            escape: options.escape.filter(|c| *c != '\0'),
            strict_quotes: options.strict_quotes,
            ignore_leading_whitespace: options.ignore_leading_whitespace,
            in_field: false,
            pending: None,
        }
    }

    /// Split one complete line. Any record left open by
    /// [`LineTokenizer::tokenize_multi`] is discarded first.
    pub fn tokenize(&mut self, line: &str) -> Result<Vec<String>, TokenizeError> {
        self.pending = None;
        match self.scan(line, false)? {
            Some(fields) => Ok(fields),
            None => Err(TokenizeError::UnterminatedQuote),
        }
    }

    /// Split a line that may open or continue a quoted field spanning lines.
    ///
    /// Returns `None` while the record is still open.
    pub fn tokenize_multi(&mut self, line: &str) -> Result<Option<Vec<String>>, TokenizeError> {
        self.scan(line, true)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Flush an unfinished record, closing its open field as is
    pub fn finish(&mut self) -> Option<Vec<String>> {
        let pending = self.pending.take()?;
        let mut fields = pending.fields;
        fields.push(pending.partial);
        Some(fields)
    }

    fn scan(&mut self, line: &str, multi: bool) -> Result<Option<Vec<String>>, TokenizeError> {
        let chars: Vec<char> = line.chars().collect();
        let mut fields = Vec::new();
        let mut buf = String::new();
        let mut in_quotes = false;

        match self.pending.take() {
            Some(pending) => {
                fields = pending.fields;
                buf = pending.partial;
                in_quotes = true;
            }
            None => self.in_field = false,
        }

        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];

            if Some(c) == self.escape {
                if self.is_next_escapable(&chars, in_quotes || self.in_field, i) {
                    buf.push(chars[i + 1]);
                    i += 1;
                }
            } else if Some(c) == self.quote {
                if self.is_next_escaped_quote(&chars, in_quotes || self.in_field, i) {
                    buf.push(chars[i + 1]);
                    i += 1;
                } else {
                    // embedded quote such as a,bc"d"ef,g
                    if !self.strict_quotes && self.is_embedded(&chars, i) {
                        if self.ignore_leading_whitespace
                            && !buf.is_empty()
                            && buf.chars().all(char::is_whitespace)
                        {
                            buf.clear();
                        } else {
                            buf.push(c);
                        }
                    }
                    in_quotes = !in_quotes;
                }
                self.in_field = !self.in_field;
            } else if c == self.separator && !in_quotes {
                fields.push(std::mem::take(&mut buf));
                self.in_field = false;
            } else if !self.strict_quotes || in_quotes {
                buf.push(c);
                self.in_field = true;
            }

            i += 1;
        }

        if in_quotes {
            if !multi {
                return Err(TokenizeError::UnterminatedQuote);
            }
            buf.push('\n');
            self.pending = Some(Pending {
                fields,
                partial: buf,
            });
            return Ok(None);
        }

        fields.push(buf);
        Ok(Some(fields))
    }

    fn is_next_escaped_quote(&self, chars: &[char], quoted: bool, i: usize) -> bool {
        quoted && chars.get(i + 1).is_some_and(|next| Some(*next) == self.quote)
    }

    fn is_next_escapable(&self, chars: &[char], quoted: bool, i: usize) -> bool {
        quoted
            && chars
                .get(i + 1)
                .is_some_and(|next| Some(*next) == self.quote || Some(*next) == self.escape)
    }

    /// Quote away from the line start with no separator on either side
    fn is_embedded(&self, chars: &[char], i: usize) -> bool {
        i > 2
            && chars[i - 1] != self.separator
            && chars.get(i + 1).is_some_and(|next| *next != self.separator)
    }
}
