//! Earliest/latest event selection.
//!
//! [`extremes`] reduces the events of one calendar to the first and last
//! event by start time in a single pass, without sorting.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::time::{RawStart, to_absolute_time};

/// An event as read from a calendar, before its start is converted.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    /// Event summary (title). Empty when the store has none.
    pub summary: String,
    /// Raw start value.
    pub start: RawStart,
}

impl EventRow {
    /// Creates a new event row.
    pub fn new(summary: impl Into<String>, start: impl Into<RawStart>) -> Self {
        Self {
            summary: summary.into(),
            start: start.into(),
        }
    }
}

/// An event selected as earliest or latest, with its converted start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtremeEvent {
    /// Event summary.
    pub summary: String,
    /// Absolute start time.
    pub start: NaiveDateTime,
}

/// The earliest and latest events of one calendar.
///
/// Both sides are either present or absent together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extremes {
    /// Event with the smallest start time (first seen on ties).
    pub earliest: Option<ExtremeEvent>,
    /// Event with the largest start time (last seen on ties).
    pub latest: Option<ExtremeEvent>,
}

impl Extremes {
    /// Returns `true` if no qualifying event was found.
    pub fn is_empty(&self) -> bool {
        self.earliest.is_none()
    }
}

/// Finds the earliest and latest events by start time.
///
/// Events whose start cannot be converted to an absolute time are skipped.
pub fn extremes<I>(events: I) -> Extremes
where
    I: IntoIterator<Item = EventRow>,
{
    let mut result = Extremes::default();

    for event in events {
        let Some(start) = to_absolute_time(Some(&event.start)) else {
            debug!(
                summary = %event.summary,
                start = ?event.start,
                "Skipping event with malformed start"
            );
            continue;
        };

        let candidate = ExtremeEvent {
            summary: event.summary,
            start,
        };

        if result
            .latest
            .as_ref()
            .is_none_or(|latest| candidate.start >= latest.start)
        {
            result.latest = Some(candidate.clone());
        }

        if result
            .earliest
            .as_ref()
            .is_none_or(|earliest| candidate.start < earliest.start)
        {
            result.earliest = Some(candidate);
        }
    }

    result
}
