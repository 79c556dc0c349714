//! Length-synchronised collections of named columns
//!
//! A [`Table`] owns its columns outright. Every column holds exactly
//! [`Table::rows`] cells, there is always at least one column and one row,
//! and column names are unique and non-empty. Each mutating method checks
//! everything it needs up front, so a returned error means nothing changed.

use std::ops::Index;

use serde::Serialize;

use super::cell::{Cell, DataType};
use super::column::Column;
use super::error::DataError;
use super::naming::{Naming, COLUMN_NAME_ROOT};

/// Rows given to a freshly created table
pub const DEFAULT_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    name: String,
    rows: usize,
    columns: Vec<Column>,
    #[serde(skip)]
    next_column: u64,
}

impl Table {
    /// New table with a generated name, one empty Character column and
    /// [`DEFAULT_ROWS`] rows
    pub fn new(naming: &mut Naming) -> Self {
        Self::with_name(naming, "")
    }

    /// Like [`Table::new`], using `name` unless it is blank
    pub fn with_name(naming: &mut Naming, name: &str) -> Self {
        let name = if name.trim().is_empty() {
            naming.next_table_name()
        } else {
            name.to_string()
        };

        let mut table = Self {
            name,
            rows: DEFAULT_ROWS,
            columns: Vec::new(),
            next_column: 1,
        };
        let first = table.fresh_column_names(1).remove(0);
        table.columns.push(Column::with_empty_cells(
            first,
            DataType::Character,
            DEFAULT_ROWS,
        ));
        table
    }

    // ---------------------------------------------------------------------
    // Shape
    // ---------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), DataError> {
        if name.is_empty() {
            return Err(DataError::EmptyName);
        }
        name.clone_into(&mut self.name);
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_column_index(&self, col: usize) -> bool {
        col < self.columns.len()
    }

    pub fn is_row_index(&self, row: usize) -> bool {
        row < self.rows
    }

    pub fn column(&self, col: usize) -> Option<&Column> {
        self.columns.get(col)
    }

    pub fn columns_iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    pub fn column_name(&self, col: usize) -> Option<&str> {
        self.columns.get(col).map(Column::name)
    }

    pub fn column_type(&self, col: usize) -> Option<DataType> {
        self.columns.get(col).map(Column::data_type)
    }

    /// Position of the column called `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Whether `name` could be given to a new column of this table
    pub fn is_column_name_valid(&self, name: &str) -> bool {
        !name.is_empty() && self.column_index(name).is_none()
    }

    /// Rename column `col`.
    ///
    /// Fails on an empty name or one held by a different column; giving a
    /// column its current name succeeds without change.
    pub fn set_column_name(&mut self, col: usize, name: &str) -> Result<(), DataError> {
        self.check_column(col)?;
        if name.is_empty() {
            return Err(DataError::EmptyName);
        }
        if let Some(existing) = self.column_index(name) {
            if existing != col {
                return Err(DataError::DuplicateName(name.to_string()));
            }
            return Ok(());
        }
        self.columns[col].set_name(name)
    }

    /// Name every column at once, as from a header record.
    ///
    /// `None` keeps that column's generated name, renumbered when one of the
    /// given names claims it. Given names must be non-empty and distinct, and
    /// there must be one entry per column.
    pub fn set_column_names(&mut self, names: &[Option<&str>]) -> Result<(), DataError> {
        if names.len() != self.columns.len() {
            return Err(DataError::IndexOutOfRange {
                index: names.len(),
                len: self.columns.len(),
            });
        }
        let mut given: Vec<&str> = Vec::with_capacity(names.len());
        for &name in names.iter().flatten() {
            if name.is_empty() {
                return Err(DataError::EmptyName);
            }
            if given.contains(&name) {
                return Err(DataError::DuplicateName(name.to_string()));
            }
            given.push(name);
        }

        let mut resolved: Vec<String> = names
            .iter()
            .zip(&self.columns)
            .map(|(name, column)| name.unwrap_or(column.name()).to_string())
            .collect();
        for col in 0..resolved.len() {
            if names[col].is_none() && given.contains(&resolved[col].as_str()) {
                let fresh = self.next_free_name(&resolved);
                tracing::debug!(table = %self.name, column = col, name = %fresh, "renumbered column");
                resolved[col] = fresh;
            }
        }

        for (column, name) in self.columns.iter_mut().zip(&resolved) {
            column.set_name(name)?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Column structure
    // ---------------------------------------------------------------------

    /// Insert `count` empty columns of type `ty` before `at`
    pub fn insert_columns(&mut self, at: usize, ty: DataType, count: usize) -> Result<(), DataError> {
        if at > self.columns.len() {
            return Err(DataError::IndexOutOfRange {
                index: at,
                len: self.columns.len(),
            });
        }
        check_count(count)?;

        let rows = self.rows;
        let new_columns: Vec<Column> = self
            .fresh_column_names(count)
            .into_iter()
            .map(|name| Column::with_empty_cells(name, ty, rows))
            .collect();
        self.columns.splice(at..at, new_columns);

        tracing::debug!(table = %self.name, at, count, ?ty, "inserted columns");
        Ok(())
    }

    pub fn append_columns(&mut self, ty: DataType, count: usize) -> Result<(), DataError> {
        self.insert_columns(self.columns.len(), ty, count)
    }

    /// Remove `count` columns starting at `at`, keeping at least one
    pub fn remove_columns(&mut self, at: usize, count: usize) -> Result<(), DataError> {
        check_count(count)?;
        check_span(at, count, self.columns.len())?;
        if count >= self.columns.len() {
            return Err(DataError::LastColumn);
        }
        self.columns.drain(at..at + count);

        tracing::debug!(table = %self.name, at, count, "removed columns");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Row structure
    // ---------------------------------------------------------------------

    /// Insert `count` empty rows before `at`; `at == rows()` appends
    pub fn insert_rows(&mut self, at: usize, count: usize) -> Result<(), DataError> {
        if at > self.rows {
            return Err(DataError::IndexOutOfRange {
                index: at,
                len: self.rows,
            });
        }
        check_count(count)?;

        for column in &mut self.columns {
            column.splice_empty(at, count);
        }
        self.rows += count;

        tracing::debug!(table = %self.name, at, count, "inserted rows");
        Ok(())
    }

    pub fn append_rows(&mut self, count: usize) -> Result<(), DataError> {
        check_count(count)?;
        for column in &mut self.columns {
            column.extend_empty(count);
        }
        self.rows += count;
        Ok(())
    }

    /// Remove `count` rows starting at `at`, keeping at least one
    pub fn remove_rows(&mut self, at: usize, count: usize) -> Result<(), DataError> {
        check_count(count)?;
        check_span(at, count, self.rows)?;
        if count >= self.rows {
            return Err(DataError::AllRows);
        }

        for column in &mut self.columns {
            column.drain_range(at, count);
        }
        self.rows -= count;

        tracing::debug!(table = %self.name, at, count, "removed rows");
        Ok(())
    }

    /// Exchange two whole rows
    pub fn swap_rows(&mut self, first: usize, second: usize) -> Result<(), DataError> {
        self.check_row(first)?;
        self.check_row(second)?;
        for column in &mut self.columns {
            column.swap(first, second)?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Cells
    // ---------------------------------------------------------------------

    pub fn get(&self, col: usize, row: usize) -> Option<&Cell> {
        self.columns.get(col).and_then(|c| c.get(row))
    }

    /// Store `cell`, which must match the column type
    pub fn set(&mut self, col: usize, row: usize, cell: Cell) -> Result<(), DataError> {
        self.check_column(col)?;
        self.check_row(row)?;
        self.columns[col].set_at(row, cell)
    }

    /// Parse `text` into the cell according to the column type
    pub fn set_str(&mut self, col: usize, row: usize, text: &str) -> Result<(), DataError> {
        self.check_column(col)?;
        self.check_row(row)?;
        self.columns[col].set_str(row, text)
    }

    pub fn clear_cell(&mut self, col: usize, row: usize) -> Result<(), DataError> {
        self.check_column(col)?;
        self.check_row(row)?;
        self.columns[col].clear_at(row)
    }

    // ---------------------------------------------------------------------
    // Type conversion
    // ---------------------------------------------------------------------

    /// Whether converting column `col` to `ty` would keep every value
    pub fn is_column_convertible(&self, col: usize, ty: DataType) -> Result<bool, DataError> {
        self.check_conversion(col, ty)?;
        Ok(self.columns[col].is_convertible(ty))
    }

    /// Convert column `col` to `ty`, emptying cells that do not parse.
    ///
    /// Returns the number of values that were dropped. Use
    /// [`Table::is_column_convertible`] first to find out whether any would be.
    pub fn convert_column(&mut self, col: usize, ty: DataType) -> Result<usize, DataError> {
        self.check_conversion(col, ty)?;
        let lost = self.columns[col].force_convert(ty);

        if lost > 0 {
            tracing::debug!(
                table = %self.name,
                column = self.columns[col].name(),
                lost,
                "forced conversion dropped values"
            );
        }
        Ok(lost)
    }

    fn check_conversion(&self, col: usize, ty: DataType) -> Result<(), DataError> {
        self.check_column(col)?;
        if ty == DataType::Undefined {
            return Err(DataError::UndefinedType);
        }
        let current = self.columns[col].data_type();
        if current == ty {
            return Err(DataError::SameType(ty));
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    /// `count` distinct column names not used in this table yet
    fn fresh_column_names(&mut self, count: usize) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(count);
        while names.len() < count {
            let name = self.next_free_name(&names);
            names.push(name);
        }
        names
    }

    /// Next `ColumnN` held neither by a column nor by `taken`
    fn next_free_name(&mut self, taken: &[String]) -> String {
        loop {
            let candidate = format!("{}{}", COLUMN_NAME_ROOT, self.next_column);
            self.next_column += 1;
            if self.column_index(&candidate).is_none() && !taken.contains(&candidate) {
                return candidate;
            }
        }
    }

    fn check_column(&self, col: usize) -> Result<(), DataError> {
        if !self.is_column_index(col) {
            return Err(DataError::IndexOutOfRange {
                index: col,
                len: self.columns.len(),
            });
        }
        Ok(())
    }

    fn check_row(&self, row: usize) -> Result<(), DataError> {
        if !self.is_row_index(row) {
            return Err(DataError::IndexOutOfRange {
                index: row,
                len: self.rows,
            });
        }
        Ok(())
    }
}

/// Fail-fast access by `(col, row)`; panics when either index is out of range
impl Index<(usize, usize)> for Table {
    type Output = Cell;

    fn index(&self, (col, row): (usize, usize)) -> &Cell {
        &self.columns[col].cells()[row]
    }
}

fn check_count(count: usize) -> Result<(), DataError> {
    if count < 1 {
        return Err(DataError::InvalidCount);
    }
    Ok(())
}

fn check_span(at: usize, count: usize, len: usize) -> Result<(), DataError> {
    match at.checked_add(count) {
        Some(end) if end <= len => Ok(()),
        _ => Err(DataError::IndexOutOfRange { index: at, len }),
    }
}
