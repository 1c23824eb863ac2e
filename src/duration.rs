//! Human-friendly borrow duration parsing.
//!
//! Turns strings like `"3"`, `"5d"`, `"36h"` or `"2w"` into a whole number
//! of loan days.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref DURATION_RE: Regex =
        Regex::new(r"^(\d+)\s*(d|day|days|h|hr|hrs|hour|hours|w|week|weeks)?$").unwrap();
}

/// Error returned when a duration string does not match the accepted
/// grammar.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid duration format: {input:?}")]
pub struct DurationParseError {
    /// The rejected input, as the caller passed it.
    pub input: String,
}

impl DurationParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// Parse a human duration string into a whole number of loan days.
///
/// The accepted grammar is a non-negative integer followed by an optional
/// unit: `d`/`day`/`days`, `h`/`hr`/`hrs`/`hour`/`hours`, or
/// `w`/`week`/`weeks`. Matching is case-insensitive and surrounding
/// whitespace is ignored. A bare number means days, hours round up to the
/// next whole day, and every variant yields at least one day.
pub fn parse_duration_to_days(input: &str) -> Result<i64, DurationParseError> {
    let normalized = input.trim().to_lowercase();
    let captures = DURATION_RE
        .captures(&normalized)
        .ok_or_else(|| DurationParseError::new(input))?;

    // Bound the value so day arithmetic cannot overflow downstream.
    let value: i64 = match captures[1].parse::<u32>() {
        Ok(v) => i64::from(v),
        Err(_) => return Err(DurationParseError::new(input)),
    };

    let days = match captures.get(2).and_then(|m| m.as_str().chars().next()) {
        None | Some('d') => value.max(1),
        Some('h') => ((value + 23) / 24).max(1), // ceiling division
        _ => (value * 7).max(1),
    };

    Ok(days)
}
