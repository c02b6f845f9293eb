//! Lateness duration normalization
//!
//! Gradescope reports assignment lateness as an `"H:M:S"` string. This module
//! converts it to a fractional-day value: one hour is 1/24 of a day, one
//! minute 1/1440, one second 1/86400. Lateness under one hour is forgiven and
//! collapses to 0.0; everything else is rounded to 4 decimal places.

use thiserror::Error;
use tracing::debug;

/// Errors from parsing an `"H:M:S"` lateness cell
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LatenessError {
    #[error("expected H:M:S, got {value:?} ({found} segments)")]
    MissingSegments { value: String, found: usize },

    #[error("invalid {unit} segment in lateness value {value:?}")]
    InvalidSegment { value: String, unit: &'static str },
}

/// One hour expressed as a fraction of a day. Lateness below this is forgiven.
const ONE_HOUR_DAYS: f64 = 1.0 / 24.0;

/// Convert an `"H:M:S"` lateness string to fractional days.
///
/// Empty cells and the literal `"00:00:00"` short-circuit to 0.0 without any
/// rounding. Hours are unbounded (a 25-hour lateness is just over one day).
/// Segments past the third are ignored. Rounding is to 4 decimal places,
/// ties to even.
pub fn normalize(duration: &str) -> Result<f64, LatenessError> {
    if duration.is_empty() || duration == "00:00:00" {
        return Ok(0.0);
    }

    let parts: Vec<&str> = duration.split(':').collect();
    if parts.len() < 3 {
        return Err(LatenessError::MissingSegments {
            value: duration.to_string(),
            found: parts.len(),
        });
    }

    let hours = parse_segment(parts[0], duration, "hours")?;
    let minutes = parse_segment(parts[1], duration, "minutes")?;
    let seconds = parse_segment(parts[2], duration, "seconds")?;

    let days = hours as f64 / 24.0 + minutes as f64 / 1440.0 + seconds as f64 / 86400.0;

    if days < ONE_HOUR_DAYS {
        debug!(%duration, "lateness under one hour, forgiven as 0.0");
        return Ok(0.0);
    }

    Ok(round4(days))
}

fn parse_segment(text: &str, value: &str, unit: &'static str) -> Result<i64, LatenessError> {
    text.trim().parse().map_err(|_| LatenessError::InvalidSegment {
        value: value.to_string(),
        unit,
    })
}

/// Round to 4 decimal places, ties to even.
fn round4(days: f64) -> f64 {
    (days * 10_000.0).round_ties_even() / 10_000.0
}
