//! Default names for tables and columns
//!
//! Table names come from a [`Naming`] context owned by whoever creates tables
//! (usually a [`Session`](crate::session::Session)), so two sessions or two
//! tests never share a counter. Column names come from a counter kept by
//! each table and are retried until unique inside that table.

/// Prefix of generated table names (`Table1`, `Table2`, ...)
pub const TABLE_NAME_ROOT: &str = "Table";

/// Prefix of generated column names (`Column1`, `Column2`, ...)
pub const COLUMN_NAME_ROOT: &str = "Column";

/// Monotonic source of default table names.
///
/// Generated names are not checked against existing tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    next_table: u64,
}

impl Naming {
    pub fn new() -> Self {
        Self { next_table: 1 }
    }

    /// Next `TableN` name
    pub fn next_table_name(&mut self) -> String {
        let name = format!("{}{}", TABLE_NAME_ROOT, self.next_table);
        self.next_table += 1;
        name
    }

    /// Restart numbering from `Table1`
    pub fn reset(&mut self) {
        self.next_table = 1;
    }
}

impl Default for Naming {
    fn default() -> Self {
        Self::new()
    }
}
