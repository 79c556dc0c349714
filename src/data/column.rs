//! Named, homogeneously typed cell sequences

use std::fmt;

use serde::Serialize;

use super::cell::{Cell, DataType};
use super::error::DataError;

/// An ordered run of cells sharing one type.
///
/// The type is taken from the cells themselves: a column with no cell
/// reports [`DataType::Undefined`] and adopts the type of the first cell it
/// receives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    cells: Vec<Cell>,
}

impl Column {
    /// Create an empty, untyped column
    pub fn new(name: impl Into<String>) -> Result<Self, DataError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DataError::EmptyName);
        }
        Ok(Self {
            name,
            cells: Vec::new(),
        })
    }

    /// Create a column holding `count` copies of `cell`
    pub fn filled(name: impl Into<String>, cell: &Cell, count: usize) -> Result<Self, DataError> {
        let mut column = Self::new(name)?;
        column.cells = vec![cell.clone(); count];
        Ok(column)
    }

    /// Column of `len` empty cells, used by tables with names they already vetted
    pub(crate) fn with_empty_cells(name: String, ty: DataType, len: usize) -> Self {
        Self {
            name,
            cells: vec![Cell::empty(ty); len],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the column. Uniqueness is the owning table's concern.
    pub fn set_name(&mut self, name: &str) -> Result<(), DataError> {
        if name.is_empty() {
            return Err(DataError::EmptyName);
        }
        name.clone_into(&mut self.name);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn data_type(&self) -> DataType {
        self.cells
            .first()
            .map(Cell::data_type)
            .unwrap_or(DataType::Undefined)
    }

    pub fn is_index(&self, index: usize) -> bool {
        index < self.cells.len()
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Append `count` copies of `cell`
    pub fn append(&mut self, cell: &Cell, count: usize) -> Result<(), DataError> {
        self.check_type(cell)?;
        check_count(count)?;
        self.cells
            .extend(std::iter::repeat_with(|| cell.clone()).take(count));
        Ok(())
    }

    /// Append `count` empty cells of the column's type
    pub fn append_empty(&mut self, count: usize) -> Result<(), DataError> {
        check_count(count)?;
        self.extend_empty(count);
        Ok(())
    }

    /// Insert `count` copies of `cell` before `index`; `index == len()` appends
    pub fn insert_at(&mut self, index: usize, cell: &Cell, count: usize) -> Result<(), DataError> {
        self.check_insert_index(index)?;
        self.check_type(cell)?;
        check_count(count)?;
        self.cells.splice(
            index..index,
            std::iter::repeat_with(|| cell.clone()).take(count),
        );
        Ok(())
    }

    /// Insert `count` empty cells before `index`
    pub fn insert_empty(&mut self, index: usize, count: usize) -> Result<(), DataError> {
        self.check_insert_index(index)?;
        check_count(count)?;
        self.splice_empty(index, count);
        Ok(())
    }

    /// Remove and return the cell at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<Cell, DataError> {
        self.check_index(index)?;
        Ok(self.cells.remove(index))
    }

    /// Remove every cell, leaving the column untyped
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Append copies of `cell` until the column holds `target` cells
    pub fn fill_to(&mut self, target: usize, cell: &Cell) -> Result<(), DataError> {
        if target <= self.cells.len() {
            return Err(DataError::InvalidCount);
        }
        self.check_type(cell)?;
        let missing = target - self.cells.len();
        self.cells
            .extend(std::iter::repeat_with(|| cell.clone()).take(missing));
        Ok(())
    }

    /// Replace the cell at `index`, keeping the column type
    pub fn set_at(&mut self, index: usize, cell: Cell) -> Result<(), DataError> {
        self.check_index(index)?;
        self.check_type(&cell)?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Parse `text` into the cell at `index`
    pub fn set_str(&mut self, index: usize, text: &str) -> Result<(), DataError> {
        self.check_index(index)?;
        self.cells[index].set_from_str(text)
    }

    pub fn swap(&mut self, first: usize, second: usize) -> Result<(), DataError> {
        self.check_index(first)?;
        self.check_index(second)?;
        self.cells.swap(first, second);
        Ok(())
    }

    /// Reset the cell at `index` to its empty value
    pub fn clear_at(&mut self, index: usize) -> Result<(), DataError> {
        self.check_index(index)?;
        self.cells[index].clear();
        Ok(())
    }

    /// Whether every cell survives conversion to `ty`
    pub fn is_convertible(&self, ty: DataType) -> bool {
        self.cells.iter().all(|cell| cell.convert_to(ty).is_some())
    }

    /// Rebuild every cell as `ty`; unparsable cells become empty.
    ///
    /// Returns how many non-empty cells were lost.
    pub(crate) fn force_convert(&mut self, ty: DataType) -> usize {
        let mut lost = 0;
        for cell in &mut self.cells {
            *cell = cell.convert_to(ty).unwrap_or_else(|| {
                lost += 1;
                Cell::empty(ty)
            });
        }
        lost
    }

    pub(crate) fn extend_empty(&mut self, count: usize) {
        let empty = Cell::empty(self.data_type());
        self.cells.resize(self.cells.len() + count, empty);
    }

    pub(crate) fn splice_empty(&mut self, index: usize, count: usize) {
        let empty = Cell::empty(self.data_type());
        self.cells
            .splice(index..index, std::iter::repeat(empty).take(count));
    }

    pub(crate) fn drain_range(&mut self, index: usize, count: usize) {
        self.cells.drain(index..index + count);
    }

    fn check_type(&self, cell: &Cell) -> Result<(), DataError> {
        let expected = self.data_type();
        let found = cell.data_type();
        if expected != DataType::Undefined && expected != found {
            return Err(DataError::TypeMismatch { expected, found });
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), DataError> {
        if index >= self.cells.len() {
            return Err(DataError::IndexOutOfRange {
                index,
                len: self.cells.len(),
            });
        }
        Ok(())
    }

    fn check_insert_index(&self, index: usize) -> Result<(), DataError> {
        if index > self.cells.len() {
            return Err(DataError::IndexOutOfRange {
                index,
                len: self.cells.len(),
            });
        }
        Ok(())
    }
}

fn check_count(count: usize) -> Result<(), DataError> {
    if count < 1 {
        return Err(DataError::InvalidCount);
    }
    Ok(())
}

impl<'a> IntoIterator for &'a Column {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Compact dump: `|name, 3 NUMERIC|> ( 1 , _ , 3 )`
impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{}, ", self.name)?;
        if !self.cells.is_empty() {
            write!(f, "{} ", self.cells.len())?;
        }
        write!(f, "{}|> ( ", self.data_type())?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(" , ")?;
            }
            if cell.is_empty() {
                f.write_str("_")?;
            } else {
                write!(f, "{}", cell)?;
            }
        }
        f.write_str(" )")
    }
}
