//! Per-calendar report records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::aggregate::{ExtremeEvent, Extremes};
use crate::time::format_timestamp;

/// Report columns, in order.
pub const REPORT_HEADER: [&str; 5] = [
    "Calendar",
    "Earliest Timestamp",
    "Earliest Name",
    "Latest Timestamp",
    "Latest Name",
];

/// Optional trailing column holding the run-wide export time.
pub const EXPORTED_AT_COLUMN: &str = "Exported At";

/// Returns the report header, with or without the `Exported At` column.
pub fn report_header(include_exported_at: bool) -> Vec<&'static str> {
    let mut header = REPORT_HEADER.to_vec();
    if include_exported_at {
        header.push(EXPORTED_AT_COLUMN);
    }
    header
}

/// Builds the calendar column: `"<owner> — <title>"`.
///
/// Without an owner label the column reads `"— <title>"`.
pub fn calendar_label(owner_label: &str, title: &str) -> String {
    let owner = owner_label.trim();
    if owner.is_empty() {
        format!("— {title}")
    } else {
        format!("{owner} — {title}")
    }
}

/// One output row: a calendar and its earliest/latest events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarExtremeRecord {
    /// Calendar label, see [`calendar_label`].
    pub calendar: String,
    /// Earliest and latest events.
    #[serde(flatten)]
    pub extremes: Extremes,
}

impl CalendarExtremeRecord {
    /// Creates a new record.
    pub fn new(calendar: impl Into<String>, extremes: Extremes) -> Self {
        Self {
            calendar: calendar.into(),
            extremes,
        }
    }

    /// Renders the record as report fields.
    ///
    /// When `exported_at` is given, it is appended as a sixth field.
    pub fn to_row(&self, exported_at: Option<&NaiveDateTime>) -> Vec<String> {
        let (early_time, early_name) = event_fields(self.extremes.earliest.as_ref());
        let (late_time, late_name) = event_fields(self.extremes.latest.as_ref());

        let mut row = vec![
            self.calendar.clone(),
            early_time,
            early_name,
            late_time,
            late_name,
        ];
        if let Some(at) = exported_at {
            row.push(format_timestamp(Some(at)));
        }
        row
    }
}

fn event_fields(event: Option<&ExtremeEvent>) -> (String, String) {
    match event {
        Some(e) => (format_timestamp(Some(&e.start)), e.summary.clone()),
        None => (String::new(), String::new()),
    }
}
