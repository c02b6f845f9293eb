//! CSV table rendering and writing

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// An in-memory CSV table: one header row plus data rows.
#[derive(Debug)]
pub struct CsvTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Escape a CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        // If field contains comma, quote, or newline, wrap in quotes and escape quotes
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_row(row: &[String]) -> String {
        row.iter()
            .map(|field| Self::escape_field(field))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Render the whole table as a CSV string.
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(&Self::format_row(&self.header));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&Self::format_row(row));
            output.push('\n');
        }

        output
    }

    /// Write the table to a file, truncating any existing content. The file
    /// handle is closed before returning.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_csv()).with_context(|| format!("writing {}", path.display()))
    }
}
