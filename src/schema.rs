//! Header classification for Gradescope exports
//!
//! Resolves column positions once, up front, so later stages work from a
//! typed layout instead of re-scanning header names:
//! - identity columns sit at fixed positions 0..4 and are reordered to put
//!   the last name first
//! - lateness columns are found by the `"Lateness"` substring and classified
//!   as homework or lab by their stripped display name

use thiserror::Error;

/// Number of leading identity columns every export must carry.
pub const IDENTITY_WIDTH: usize = 4;

/// Identity column indices in output order: last name, first name, then the
/// two remaining roster fields as-is.
const IDENTITY_ORDER: [usize; IDENTITY_WIDTH] = [1, 0, 2, 3];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("header has {0} columns, need at least 4 identity columns")]
    MissingIdentityColumns(usize),

    #[error("no column header contains \"Lateness\"")]
    NoLatenessColumns,
}

/// Category of a lateness column, derived from its header name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Homework,
    Lab,
    /// Name matched neither `"H"` nor `"Lab"`, or matched both. Skipped by
    /// the aggregator, never reported as an error.
    Unclassified,
}

/// One retained lateness column: where it sits in a raw row, its display
/// name, and which counter it feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatenessColumn {
    pub index: usize,
    /// Header name with the `" (H:M:S)"` format suffix stripped.
    pub name: String,
    pub category: Category,
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Identity column indices in output order (last name first).
    pub identity: [usize; IDENTITY_WIDTH],
    /// Identity header names in output order.
    pub identity_names: Vec<String>,
    /// Retained lateness columns, left to right.
    pub lateness: Vec<LatenessColumn>,
}

impl ColumnLayout {
    /// Build the layout from a header row.
    ///
    /// Total-column policy: the rightmost matched lateness column is the
    /// export's running total, not a per-assignment value, and is excluded
    /// from normalization, from the output files, and from both counters.
    pub fn from_header(header: &[String]) -> Result<Self, SchemaError> {
        if header.len() < IDENTITY_WIDTH {
            return Err(SchemaError::MissingIdentityColumns(header.len()));
        }

        let matched: Vec<usize> = header
            .iter()
            .enumerate()
            .filter(|(_, name)| name.contains("Lateness"))
            .map(|(index, _)| index)
            .collect();
        if matched.is_empty() {
            return Err(SchemaError::NoLatenessColumns);
        }

        let lateness = matched[..matched.len() - 1]
            .iter()
            .map(|&index| {
                let name = strip_duration_suffix(&header[index]);
                let category = classify(&name);
                LatenessColumn {
                    index,
                    name,
                    category,
                }
            })
            .collect();

        let identity_names = IDENTITY_ORDER.iter().map(|&i| header[i].clone()).collect();

        Ok(Self {
            identity: IDENTITY_ORDER,
            identity_names,
            lateness,
        })
    }

    /// Categories of the retained lateness columns, in column order.
    pub fn categories(&self) -> Vec<Category> {
        self.lateness.iter().map(|column| column.category).collect()
    }
}

/// Strip the `" (H:M:S)"` format suffix from a lateness header.
///
/// The strip matters for classification: the raw suffix contains an `"H"`
/// that would misfile every lab column as homework.
fn strip_duration_suffix(name: &str) -> String {
    name.replace(" (H:M:S)", "")
}

fn classify(name: &str) -> Category {
    match (name.contains('H'), name.contains("Lab")) {
        (true, false) => Category::Homework,
        (false, true) => Category::Lab,
        _ => Category::Unclassified,
    }
}
