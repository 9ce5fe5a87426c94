//! Markdown table export for glossaries.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;


#[derive(Debug, Error)]
pub enum ExportError {
    #[error("expected {expected} columns, got {actual}")]
    ColumnMismatch { expected: usize, actual: usize },

    #[error("table must have at least one column")]
    NoColumns,

    #[error("failed to write table: {0}")]
    Io(#[from] std::io::Error),
}

/// A table cell: plain text, or a list rendered as `a, b, c`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            CellValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<Vec<String>> for CellValue {
    fn from(value: Vec<String>) -> Self {
        CellValue::List(value)
    }
}

/// Fixed-width Markdown table.
///
/// Headers default to `Column 1..N` until [`set_header`](Self::set_header) replaces them.
#[derive(Debug, Clone)]
pub struct MarkdownTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    pub fn new(columns: usize) -> Result<Self, ExportError> {
        if columns == 0 {
            return Err(ExportError::NoColumns);
        }
        Ok(Self {
            headers: (1..=columns).map(|i| format!("Column {i}")).collect(),
            rows: Vec::new(),
        })
    }

    pub fn columns(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn set_header<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), ExportError> {
        self.check_width(names.len())?;
        self.headers = names.iter().map(|n| escape_cell(n.as_ref())).collect();
        Ok(())
    }

    pub fn add_line<V>(&mut self, values: impl IntoIterator<Item = V>) -> Result<(), ExportError>
    where
        V: Into<CellValue>,
    {
        let row: Vec<String> = values
            .into_iter()
            .map(|v| escape_cell(&v.into().to_string()))
            .collect();
        self.check_width(row.len())?;
        self.rows.push(row);
        Ok(())
    }

    pub fn to_markdown(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(render_row(&self.headers));
        lines.push(render_row(&vec!["---".to_string(); self.columns()]));
        lines.extend(self.rows.iter().map(|row| render_row(row)));
        lines.join("\n")
    }

    pub fn write_to_file(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, self.to_markdown())?;
        Ok(())
    }

    fn check_width(&self, actual: usize) -> Result<(), ExportError> {
        if actual != self.columns() {
            return Err(ExportError::ColumnMismatch {
                expected: self.columns(),
                actual,
            });
        }
        Ok(())
    }
}

impl fmt::Display for MarkdownTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markdown())
    }
}

fn render_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

// Pipes would open a new column and newlines would end the row.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}
