//! Per-student late-day accounting
//!
//! Each record is folded independently over its classified lateness columns;
//! there is no shared state across records.

use tracing::debug;

use crate::schema::Category;

/// Ceiling at which a single assignment forfeits credit entirely. A student
/// more than 2 days late on one assignment contributes nothing for it; the
/// contribution is excluded, not capped.
const FORFEIT_AT: u32 = 3;

/// One student row after identity reordering and lateness normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub last: String,
    pub first: String,
    pub field3: String,
    pub field4: String,
    /// Fractional-day lateness, one per retained lateness column.
    pub lateness: Vec<f64>,
}

/// One summary row: identity fields plus the two late-day counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub last: String,
    pub first: String,
    pub field3: String,
    pub field4: String,
    pub hw_late_days: u32,
    pub lab_late_days: u32,
}

/// Count homework and lab late days for one record.
///
/// A column's contribution is `ceil(days)` when that is below [`FORFEIT_AT`],
/// otherwise nothing. An exact 2.0-day lateness ceils to 2 and is included.
/// Unclassified columns are skipped.
fn tally(lateness: &[f64], categories: &[Category]) -> (u32, u32) {
    lateness
        .iter()
        .zip(categories)
        .fold((0, 0), |(hw, lab), (&days, category)| {
            let used = days.ceil() as u32;
            if used >= FORFEIT_AT {
                return (hw, lab);
            }
            match category {
                Category::Homework => (hw + used, lab),
                Category::Lab => (hw, lab + used),
                Category::Unclassified => (hw, lab),
            }
        })
}

/// Produce one output record per student, sorted by last name.
///
/// The sort is stable and byte-wise case-sensitive, so input order breaks
/// ties between students sharing a surname.
pub fn aggregate(records: Vec<NormalizedRecord>, categories: &[Category]) -> Vec<OutputRecord> {
    let mut out: Vec<OutputRecord> = records
        .into_iter()
        .map(|record| {
            let (hw_late_days, lab_late_days) = tally(&record.lateness, categories);
            debug!(
                last = %record.last,
                first = %record.first,
                hw_late_days,
                lab_late_days,
                "tallied late days"
            );
            OutputRecord {
                last: record.last,
                first: record.first,
                field3: record.field3,
                field4: record.field4,
                hw_late_days,
                lab_late_days,
            }
        })
        .collect();

    out.sort_by(|a, b| a.last.cmp(&b.last));
    out
}
