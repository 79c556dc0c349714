//! Named collection of tables sharing one naming context

use std::path::Path;

use crate::csv::{CsvParser, ParseError, ParserOptions};
use crate::data::{Naming, Table};

#[derive(Debug, Clone, Default)]
pub struct Session {
    name: String,
    naming: Naming,
    tables: Vec<Table>,
}

impl Session {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            naming: Naming::new(),
            tables: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create an empty default table and return its index
    pub fn new_table(&mut self) -> usize {
        let table = Table::new(&mut self.naming);
        self.add_table(table)
    }

    pub fn add_table(&mut self, table: Table) -> usize {
        tracing::debug!(session = %self.name, table = %table.name(), "added table");
        self.tables.push(table);
        self.tables.len() - 1
    }

    /// Import a delimited file as a new table, returning its index
    pub fn open_file(&mut self, path: &Path, options: &ParserOptions) -> Result<usize, ParseError> {
        let mut parser = CsvParser::new(options.clone())?;
        let table = parser.parse_file(path, &mut self.naming)?;
        Ok(self.add_table(table))
    }

    pub fn open_str(&mut self, text: &str, options: &ParserOptions) -> Result<usize, ParseError> {
        let mut parser = CsvParser::new(options.clone())?;
        let table = parser.parse_str(text, &mut self.naming)?;
        Ok(self.add_table(table))
    }

    pub fn table(&self, index: usize) -> Option<&Table> {
        self.tables.get(index)
    }

    pub fn table_mut(&mut self, index: usize) -> Option<&mut Table> {
        self.tables.get_mut(index)
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Index of the first table called `name`
    pub fn find(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|table| table.name() == name)
    }

    pub fn remove_table(&mut self, index: usize) -> Option<Table> {
        if index >= self.tables.len() {
            return None;
        }
        Some(self.tables.remove(index))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn naming_mut(&mut self) -> &mut Naming {
        &mut self.naming
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tables_get_sequential_names() {
        let mut session = Session::new("work");
        let first = session.new_table();
        let second = session.new_table();

        assert_eq!(session.len(), 2);
        assert_eq!(session.table(first).unwrap().name(), "Table1");
        assert_eq!(session.table(second).unwrap().name(), "Table2");
        assert_eq!(session.find("Table2"), Some(1));
    }

    #[test]
    fn test_open_str_adds_table() {
        let mut session = Session::new("work");
        let index = session
            .open_str("a,b\n1,2\n", &ParserOptions::default())
            .unwrap();

        let table = session.table(index).unwrap();
        assert_eq!(table.rows(), 1);
        assert_eq!(table.columns(), 2);
    }

    #[test]
    fn test_failed_open_adds_nothing() {
        let mut session = Session::new("work");
        assert!(session.open_str("a,b\n1\n", &ParserOptions::default()).is_err());
        assert!(session.is_empty());
    }

    #[test]
    fn test_remove_and_reset_naming() {
        let mut session = Session::new("work");
        session.new_table();
        assert!(session.remove_table(3).is_none());
        assert_eq!(session.remove_table(0).unwrap().name(), "Table1");

        session.naming_mut().reset();
        let index = session.new_table();
        assert_eq!(session.table(index).unwrap().name(), "Table1");
    }

    #[test]
    fn test_table_mut_edits_in_place() {
        let mut session = Session::new("work");
        let index = session.new_table();
        session.table_mut(index).unwrap().set_name("renamed").unwrap();
        assert_eq!(session.find("renamed"), Some(index));
    }
}
