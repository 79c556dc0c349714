//! Typed tabular data engine
//!
//! ```text
//! Table
//! ├── name
//! └── Vec<Column>          (all the same length: Table::rows)
//!         ├── name
//!         └── Vec<Cell>    (all the same DataType)
//!                 ├── Character(String)
//!                 └── Numeric(Option<f64>)
//! ```
//!
//! Presentation layers read through the accessors on [`Table`] and change it
//! only through its mutating methods, which keep the shape invariants.

mod cell;
mod column;
mod error;
mod naming;
pub mod stats;
mod table;

pub use cell::{parse_number, Cell, DataType};
pub use column::Column;
pub use error::DataError;
pub use naming::{Naming, COLUMN_NAME_ROOT, TABLE_NAME_ROOT};
pub use table::{Table, DEFAULT_ROWS};
