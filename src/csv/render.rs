//! Fixed-width text dump of a table
//!
//! ```text
//! == people == 2C, 3R ==
//! name    age
//! ----------------
//! Ada     36
//! Grace   .
//! _       7
//! ================
//! ```
//!
//! Cells are tab separated and cut to seven characters, the last one
//! replaced by `~`. Empty cells show a per-type placeholder.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::data::{Cell, Table};

/// Width of one column slot in the rule lines
const SLOT: usize = 8;

/// Longest cell text shown untruncated
const MAX_CELL_CHARS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Shown for an empty Character cell
    pub character_placeholder: String,
    /// Shown for an empty Numeric cell
    pub numeric_placeholder: String,
    /// Stop after this many rows, `None` shows all
    pub max_rows: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            character_placeholder: "_".to_string(),
            numeric_placeholder: ".".to_string(),
            max_rows: None,
        }
    }
}

/// Cut `s` to `max_chars`, marking the cut with `~`
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        s.chars().take(max_chars).collect()
    } else {
        let mut result: String = s.chars().take(max_chars - 1).collect();
        result.push('~');
        result
    }
}

pub fn render_table(table: &Table, options: &RenderOptions) -> String {
    let columns = table.columns();
    let rule_width = columns * SLOT;
    let mut out = String::new();

    let mut title = format!(
        "== {} == {}C, {}R ==",
        table.name(),
        columns,
        table.rows()
    );
    let title_len = title.chars().count();
    if title_len < rule_width {
        title.push_str(&"=".repeat(rule_width - title_len));
    }
    out.push_str(&title);
    out.push('\n');

    for column in table.columns_iter() {
        out.push_str(&truncate_text(column.name(), MAX_CELL_CHARS));
        out.push('\t');
    }
    out.push('\n');
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');

    let shown = options
        .max_rows
        .map_or(table.rows(), |max| max.min(table.rows()));
    for row in 0..shown {
        for column in table.columns_iter() {
            if let Some(cell) = column.get(row) {
                out.push_str(&cell_text(cell, options));
            }
            out.push('\t');
        }
        out.push('\n');
    }
    if shown < table.rows() {
        let _ = writeln!(out, "... {} more rows", table.rows() - shown);
    }

    out.push_str(&"=".repeat(rule_width));
    out.push('\n');
    out
}

fn cell_text(cell: &Cell, options: &RenderOptions) -> String {
    match cell {
        Cell::Character(text) if text.is_empty() => options.character_placeholder.clone(),
        Cell::Numeric(None) => options.numeric_placeholder.clone(),
        _ => truncate_text(&cell.to_string(), MAX_CELL_CHARS),
    }
}
