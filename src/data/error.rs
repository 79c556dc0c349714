//! Validation errors for cells, columns and tables

use thiserror::Error;

use super::cell::DataType;

/// Error returned by every fallible data operation.
///
/// A returned error always means the target was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("index {index} is out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("count must be at least 1")]
    InvalidCount,

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: DataType, found: DataType },

    #[error("name must not be empty")]
    EmptyName,

    #[error("name {0:?} is already used by another column")]
    DuplicateName(String),

    #[error("a table must keep at least one column")]
    LastColumn,

    #[error("a table must keep at least one row")]
    AllRows,

    #[error("column is already of type {0}")]
    SameType(DataType),

    #[error("cannot convert to the undefined type")]
    UndefinedType,

    #[error("cannot parse {value:?} as {ty}")]
    Unparsable { value: String, ty: DataType },
}
