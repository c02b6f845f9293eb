//! End-to-end processing: read the export, normalize, aggregate, write.
//!
//! The whole run is sequential and in-memory. The input is read once in
//! full; the auxiliary normalized-columns table is written before
//! aggregation, the summary table after. Any fatal error aborts the run
//! with a diagnostic and leaves no completeness guarantee for a
//! partially-written auxiliary file.

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::aggregate::{aggregate, NormalizedRecord, OutputRecord};
use crate::lateness::normalize;
use crate::output::CsvTable;
use crate::schema::ColumnLayout;

/// Fixed name of the per-student summary table.
pub const SUMMARY_FILE: &str = "processed_late_days.csv";

/// Fixed name of the auxiliary normalized-columns table.
pub const COLUMNS_FILE: &str = "late_columns.csv";

/// Headers appended to the identity columns in the summary table.
const COUNT_HEADERS: [&str; 2] = ["Num HW Late Days", "Num Lab Late Days"];

/// What a run produced, for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub students: usize,
    pub lateness_columns: usize,
}

/// Process one export: `input` is the Gradescope CSV, both output files are
/// written into `out_dir`.
pub fn run(input: &Path, out_dir: &Path) -> Result<PipelineSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(input)
        .with_context(|| format!("opening {}", input.display()))?;

    let header: Vec<String> = reader
        .headers()
        .context("reading header row")?
        .iter()
        .map(str::to_string)
        .collect();
    let layout = ColumnLayout::from_header(&header)
        .with_context(|| format!("classifying header of {}", input.display()))?;
    debug!(
        lateness_columns = layout.lateness.len(),
        "resolved column layout"
    );

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        // Header is line 1; data starts at line 2.
        let row = row.with_context(|| format!("reading line {}", line + 2))?;
        let record = normalize_row(&row, &layout)
            .with_context(|| format!("line {} of {}", line + 2, input.display()))?;
        records.push(record);
    }

    write_columns_table(&records, &layout, &out_dir.join(COLUMNS_FILE))?;

    let students = records.len();
    let categories = layout.categories();
    let summary_path = out_dir.join(SUMMARY_FILE);
    write_summary_table(aggregate(records, &categories), &layout, &summary_path)?;

    info!(
        path = %summary_path.display(),
        students,
        "processed data saved"
    );

    Ok(PipelineSummary {
        students,
        lateness_columns: layout.lateness.len(),
    })
}

/// Reorder one raw row's identity fields and normalize its lateness cells.
fn normalize_row(row: &csv::StringRecord, layout: &ColumnLayout) -> Result<NormalizedRecord> {
    let mut lateness = Vec::with_capacity(layout.lateness.len());
    for column in &layout.lateness {
        let days = normalize(cell(row, column.index)?)
            .with_context(|| format!("column {:?}", column.name))?;
        lateness.push(days);
    }

    let [last, first, field3, field4] = layout.identity;
    Ok(NormalizedRecord {
        last: cell(row, last)?.to_string(),
        first: cell(row, first)?.to_string(),
        field3: cell(row, field3)?.to_string(),
        field4: cell(row, field4)?.to_string(),
        lateness,
    })
}

fn cell(row: &csv::StringRecord, index: usize) -> Result<&str> {
    row.get(index)
        .ok_or_else(|| anyhow!("row has {} cells, column {} required", row.len(), index + 1))
}

/// Write the auxiliary table: reordered identity fields plus the normalized
/// fractional-day values, in original row order.
fn write_columns_table(
    records: &[NormalizedRecord],
    layout: &ColumnLayout,
    path: &Path,
) -> Result<()> {
    let mut header = layout.identity_names.clone();
    header.extend(layout.lateness.iter().map(|column| column.name.clone()));

    let mut table = CsvTable::new(header);
    for record in records {
        let mut row = vec![
            record.last.clone(),
            record.first.clone(),
            record.field3.clone(),
            record.field4.clone(),
        ];
        row.extend(record.lateness.iter().map(|days| days.to_string()));
        table.push_row(row);
    }
    table.write_to(path)
}

/// Write the sorted per-student summary table.
fn write_summary_table(
    records: Vec<OutputRecord>,
    layout: &ColumnLayout,
    path: &Path,
) -> Result<()> {
    let mut header = layout.identity_names.clone();
    header.extend(COUNT_HEADERS.iter().map(|name| name.to_string()));

    let mut table = CsvTable::new(header);
    for record in records {
        table.push_row(vec![
            record.last,
            record.first,
            record.field3,
            record.field4,
            record.hw_late_days.to_string(),
            record.lab_late_days.to_string(),
        ]);
    }
    table.write_to(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const FIXTURE: &str = "\
First,Last,ID,Section,HW1 Lateness (H:M:S),Lab1 Lateness (H:M:S),Total Lateness (H:M:S)\n\
Ann,Smith,1,A,01:00:00,00:00:00,01:00:00\n\
Bob,Jones,2,B,25:00:00,10:00:00,35:00:00\n";

    fn run_fixture(contents: &str) -> (tempfile::TempDir, Result<PipelineSummary>) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.csv");
        fs::write(&input, contents).unwrap();
        let result = run(&input, dir.path());
        (dir, result)
    }

    #[test]
    fn test_summary_table_contents() {
        let (dir, result) = run_fixture(FIXTURE);
        let summary = result.unwrap();
        assert_eq!(
            summary,
            PipelineSummary {
                students: 2,
                lateness_columns: 2,
            }
        );

        let written = fs::read_to_string(dir.path().join(SUMMARY_FILE)).unwrap();
        assert_eq!(
            written,
            "Last,First,ID,Section,Num HW Late Days,Num Lab Late Days\n\
             Jones,Bob,2,B,2,1\n\
             Smith,Ann,1,A,1,0\n"
        );
    }

    #[test]
    fn test_columns_table_contents() {
        let (dir, result) = run_fixture(FIXTURE);
        result.unwrap();

        // Original row order, suffix-stripped headers, normalized values.
        let written = fs::read_to_string(dir.path().join(COLUMNS_FILE)).unwrap();
        assert_eq!(
            written,
            "Last,First,ID,Section,HW1 Lateness,Lab1 Lateness\n\
             Smith,Ann,1,A,0.0417,0\n\
             Jones,Bob,2,B,1.0417,0.4167\n"
        );
    }

    #[test]
    fn test_missing_input_fails_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&dir.path().join("absent.csv"), dir.path()).unwrap_err();
        assert!(err.to_string().contains("absent.csv"));
        assert!(!dir.path().join(COLUMNS_FILE).exists());
        assert!(!dir.path().join(SUMMARY_FILE).exists());
    }

    #[test]
    fn test_malformed_lateness_cell_is_fatal() {
        let (dir, result) = run_fixture(
            "First,Last,ID,Section,HW1 Lateness (H:M:S),Total Lateness (H:M:S)\n\
             Ann,Smith,1,A,01:bad:00,01:00:00\n",
        );
        let err = result.unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("line 2"));
        assert!(chain.contains("HW1 Lateness"));
        assert!(!dir.path().join(SUMMARY_FILE).exists());
    }

    #[test]
    fn test_header_without_lateness_columns_is_fatal() {
        let (_dir, result) = run_fixture("First,Last,ID,Section\nAnn,Smith,1,A\n");
        let chain = format!("{:#}", result.unwrap_err());
        assert!(chain.contains("Lateness"));
    }

    #[test]
    fn test_short_row_reports_line_number() {
        let (_dir, result) = run_fixture(
            "First,Last,ID,Section,HW1 Lateness (H:M:S),Total Lateness (H:M:S)\n\
             Ann,Smith,1,A,01:00:00,01:00:00\n\
             Bob,Jones\n",
        );
        let chain = format!("{:#}", result.unwrap_err());
        assert!(chain.contains("line 3"));
    }

    #[test]
    fn test_empty_lateness_cells_count_as_zero() {
        let (dir, result) = run_fixture(
            "First,Last,ID,Section,HW1 Lateness (H:M:S),Total Lateness (H:M:S)\n\
             Ann,Smith,1,A,,\n",
        );
        result.unwrap();
        let written = fs::read_to_string(dir.path().join(SUMMARY_FILE)).unwrap();
        assert!(written.contains("Smith,Ann,1,A,0,0"));
    }
}
