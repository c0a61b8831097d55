//! Epoch-offset timestamps for calendar events.
//!
//! The calendar store records event start times as a number of seconds
//! since a fixed origin, 2001-01-01T00:00:00. This module provides
//! [`RawStart`] for the value as it was read from the store and the
//! conversion to a naive [`NaiveDateTime`] plus its canonical textual form.
//!
//! No timezone is ever applied: the origin and every converted value are
//! naive wall-clock times.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Canonical, fixed-width and sortable timestamp format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Largest magnitude, in microseconds, accepted for fractional offsets.
///
/// Keeps the float to integer conversion well inside `i64`.
const MAX_OFFSET_MICROS: f64 = 9.0e18;

/// Returns the epoch origin, 2001-01-01T00:00:00.
pub fn epoch_origin() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2001, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid epoch origin")
}

/// A start-time value exactly as stored in the calendar database.
///
/// SQLite columns are dynamically typed, so the same column can hold
/// integers, reals or text depending on which application wrote the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RawStart {
    /// Whole seconds since the epoch origin.
    Integer(i64),
    /// Seconds since the epoch origin, possibly fractional.
    Real(f64),
    /// Text that may or may not hold a number.
    Text(String),
    /// Binary data, never a valid offset.
    Blob(Vec<u8>),
}

impl RawStart {
    /// Returns the numeric interpretation of this value, if it has one.
    ///
    /// Text is trimmed and parsed as a float. Blobs are never numeric.
    pub fn seconds(&self) -> Option<f64> {
        match self {
            Self::Integer(secs) => Some(*secs as f64),
            Self::Real(secs) => Some(*secs),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
            Self::Blob(_) => None,
        }
    }
}

impl From<i64> for RawStart {
    fn from(secs: i64) -> Self {
        Self::Integer(secs)
    }
}

impl From<i32> for RawStart {
    fn from(secs: i32) -> Self {
        Self::Integer(secs.into())
    }
}

impl From<f64> for RawStart {
    fn from(secs: f64) -> Self {
        Self::Real(secs)
    }
}

impl From<&str> for RawStart {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Converts a raw offset to an absolute timestamp.
///
/// Returns `None` when the value is absent, not numeric, not finite, or
/// lands outside the range chrono can represent. Fractional seconds are
/// kept at microsecond precision.
pub fn to_absolute_time(raw: Option<&RawStart>) -> Option<NaiveDateTime> {
    let origin = epoch_origin();
    let delta = match raw? {
        RawStart::Integer(secs) => TimeDelta::try_seconds(*secs)?,
        other => {
            let micros = (other.seconds()? * 1_000_000.0).round();
            if !micros.is_finite() || micros.abs() >= MAX_OFFSET_MICROS {
                return None;
            }
            TimeDelta::microseconds(micros as i64)
        }
    };
    origin.checked_add_signed(delta)
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SS`.
///
/// The sub-second part is dropped. An absent timestamp formats to an
/// empty string.
pub fn format_timestamp(time: Option<&NaiveDateTime>) -> String {
    time.map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}
