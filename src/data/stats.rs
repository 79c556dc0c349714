//! Range reducers used to scale plot axes
//!
//! Only Numeric columns qualify. A column with no cells yet has no type and
//! is rejected like a Character one.

use super::cell::DataType;
use super::column::Column;
use super::error::DataError;

/// Smallest value of a Numeric column, ignoring empty cells
pub fn minimum(column: &Column) -> Result<Option<f64>, DataError> {
    fold_values(column, f64::min)
}

/// Largest value of a Numeric column, ignoring empty cells
pub fn maximum(column: &Column) -> Result<Option<f64>, DataError> {
    fold_values(column, f64::max)
}

/// `maximum - minimum`, or `None` when the column holds no value
pub fn range(column: &Column) -> Result<Option<f64>, DataError> {
    let min = minimum(column)?;
    let max = maximum(column)?;
    Ok(min.zip(max).map(|(min, max)| max - min))
}

fn fold_values(column: &Column, pick: fn(f64, f64) -> f64) -> Result<Option<f64>, DataError> {
    match column.data_type() {
        DataType::Numeric => {}
        found => {
            return Err(DataError::TypeMismatch {
                expected: DataType::Numeric,
                found,
            })
        }
    }
    Ok(column
        .iter()
        .filter_map(|cell| cell.as_number())
        .reduce(pick))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Cell;

    fn column(values: &[Option<f64>]) -> Column {
        let mut column = Column::new("x").unwrap();
        for value in values {
            column.append(&Cell::Numeric(*value), 1).unwrap();
        }
        column
    }

    #[test]
    fn test_min_max_range_skip_empty() {
        let column = column(&[Some(3.0), None, Some(-1.5), Some(8.0)]);

        assert_eq!(minimum(&column), Ok(Some(-1.5)));
        assert_eq!(maximum(&column), Ok(Some(8.0)));
        assert_eq!(range(&column), Ok(Some(9.5)));
    }

    #[test]
    fn test_all_empty_gives_none() {
        let column = column(&[None, None]);
        assert_eq!(minimum(&column), Ok(None));
        assert_eq!(range(&column), Ok(None));
    }

    #[test]
    fn test_character_column_rejected() {
        let column = Column::filled("t", &Cell::character("a"), 2).unwrap();
        assert!(matches!(
            maximum(&column),
            Err(DataError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_untyped_column_rejected() {
        let column = Column::new("x").unwrap();
        assert_eq!(column.data_type(), DataType::Undefined);
        assert_eq!(
            minimum(&column),
            Err(DataError::TypeMismatch {
                expected: DataType::Numeric,
                found: DataType::Undefined,
            })
        );
        assert!(range(&column).is_err());
    }
}
