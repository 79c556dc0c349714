//! Typed scalar values stored in table cells

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DataError;

/// Type tag shared by cells and columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Free text
    Character,
    /// Double precision number
    Numeric,
    /// Reported by columns that hold no cell yet
    Undefined,
}

impl DataType {
    /// Upper-case label used in dumps and error messages
    pub fn label(self) -> &'static str {
        match self {
            DataType::Character => "CHARACTER",
            DataType::Numeric => "NUMERIC",
            DataType::Undefined => "UNDEFINED",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single typed value.
///
/// The variant is fixed once a cell exists; "no data" is expressed inside the
/// variant (empty string, `None`) rather than by a separate tag. Cloning gives
/// a fully independent copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Cell {
    Character(String),
    Numeric(Option<f64>),
}

impl Cell {
    /// Empty cell of the given type. `Undefined` falls back to `Character`.
    pub fn empty(ty: DataType) -> Self {
        match ty {
            DataType::Numeric => Cell::Numeric(None),
            DataType::Character | DataType::Undefined => Cell::Character(String::new()),
        }
    }

    pub fn character(text: impl Into<String>) -> Self {
        Cell::Character(text.into())
    }

    pub fn numeric(value: f64) -> Self {
        Cell::Numeric(Some(value))
    }

    /// Parse a numeric cell, empty text giving an empty cell
    pub fn parse_numeric(text: &str) -> Result<Self, DataError> {
        let mut cell = Cell::Numeric(None);
        cell.set_from_str(text)?;
        Ok(cell)
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Cell::Character(_) => DataType::Character,
            Cell::Numeric(_) => DataType::Numeric,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Character(text) => text.is_empty(),
            Cell::Numeric(value) => value.is_none(),
        }
    }

    /// Assign from text without changing the cell type.
    ///
    /// Character cells take the text verbatim. Numeric cells treat `""` as
    /// the empty value and otherwise require a valid decimal number; on
    /// failure the previous value is kept.
    pub fn set_from_str(&mut self, text: &str) -> Result<(), DataError> {
        match self {
            Cell::Character(current) => {
                text.clone_into(current);
                Ok(())
            }
            Cell::Numeric(current) => {
                if text.is_empty() {
                    *current = None;
                    return Ok(());
                }
                let value = parse_number(text).ok_or_else(|| DataError::Unparsable {
                    value: text.to_string(),
                    ty: DataType::Numeric,
                })?;
                *current = Some(value);
                Ok(())
            }
        }
    }

    /// Reset to the empty value of the cell's own type
    pub fn clear(&mut self) {
        match self {
            Cell::Character(text) => text.clear(),
            Cell::Numeric(value) => *value = None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Character(text) => Some(text),
            Cell::Numeric(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Numeric(value) => *value,
            Cell::Character(_) => None,
        }
    }

    /// Re-render this cell into `ty`.
    ///
    /// Empty cells become the empty value of `ty`. Returns `None` when the
    /// display string does not parse as `ty`.
    pub fn convert_to(&self, ty: DataType) -> Option<Cell> {
        let mut target = Cell::empty(ty);
        if self.is_empty() {
            return Some(target);
        }
        target.set_from_str(&self.to_string()).ok()?;
        Some(target)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Character(String::new())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Character(text) => f.write_str(text),
            Cell::Numeric(Some(value)) if value.is_infinite() => {
                f.write_str(if *value > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Cell::Numeric(Some(value)) => write!(f, "{}", value),
            Cell::Numeric(None) => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Character(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Character(text)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Numeric(Some(value))
    }
}

/// Locale-independent decimal parsing, ignoring surrounding whitespace.
///
/// The only words accepted are `NaN` and `Infinity`, optionally signed, in
/// exactly that case. `nan`, `inf` and the like stay text.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first()? {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if !unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return trimmed.parse::<f64>().ok();
    }
    match unsigned {
        "NaN" => Some(f64::NAN),
        "Infinity" if negative => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => None,
    }
}
