//! latedays - Gradescope lateness export processor
//!
//! Converts `"H:M:S"` assignment lateness into fractional-day values and
//! tallies per-student homework and lab late days used, writing a summary
//! table sorted by surname.

pub mod aggregate;
pub mod cli;
pub mod lateness;
pub mod output;
pub mod pipeline;
pub mod schema;
