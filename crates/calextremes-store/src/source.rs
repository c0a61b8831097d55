//! CalendarSource trait definition.
//!
//! This module defines the [`CalendarSource`] trait, which hides which of
//! the known table layouts a calendar store uses, and [`open_source`],
//! which opens a store read-only and picks the matching implementation.

use std::fmt;
use std::path::Path;

use calextremes_core::EventRow;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::current::CurrentSource;
use crate::error::{StoreError, StoreResult};
use crate::legacy::LegacySource;
use crate::sqlite::{has_column, open_readonly, table_columns, table_exists};

/// The table layouts a calendar store can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Calendars reference an account row in the `Store` table.
    Legacy,
    /// Calendars carry the owner email in `owner_identity_email`.
    Current,
}

impl Layout {
    /// Returns a short name for this layout.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Current => "current",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a calendar's owner label comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerRef {
    /// The label is stored on the calendar itself.
    Label(String),
    /// The label lives in the account table under this key.
    Account(i64),
    /// The calendar has no owner.
    Unset,
}

/// A calendar as listed by a [`CalendarSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRow {
    /// Row key, used to select the calendar's events.
    pub id: i64,
    /// Display title. Empty when the store has none.
    pub title: String,
    /// Owner label or the reference needed to resolve it.
    pub owner: OwnerRef,
}

impl CalendarRow {
    /// Creates a new calendar row.
    pub fn new(id: i64, title: impl Into<String>, owner: OwnerRef) -> Self {
        Self {
            id,
            title: title.into(),
            owner,
        }
    }
}

/// Read-only access to the calendars and events of one store.
///
/// Implementations never write to the store.
pub trait CalendarSource {
    /// Returns the layout this source reads.
    fn layout(&self) -> Layout;

    /// Lists every calendar, in store order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Query` if the calendar table cannot be read.
    fn list_calendars(&self) -> StoreResult<Vec<CalendarRow>>;

    /// Resolves a calendar's owner label.
    ///
    /// Returns `None` when the calendar has no owner or when the label
    /// cannot be looked up. A failed lookup never fails the run.
    fn resolve_owner_label(&self, owner: &OwnerRef) -> Option<String>;

    /// Returns the events of a calendar that have a start time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Query` if the event table cannot be read.
    fn events_for_calendar(&self, calendar_id: i64) -> StoreResult<Vec<EventRow>>;
}

/// Opens a calendar store read-only and selects the source for its layout.
///
/// # Errors
///
/// Returns `StoreError::Unavailable` if the file cannot be opened or read
/// as a database, and `StoreError::UnknownLayout` if it matches no known
/// layout.
pub fn open_source(path: impl AsRef<Path>) -> StoreResult<Box<dyn CalendarSource>> {
    let path = path.as_ref();
    let conn = open_readonly(path)?;
    let layout = detect_layout(&conn, path)?;

    info!(path = %path.display(), layout = %layout, "Detected calendar store layout");

    Ok(match layout {
        Layout::Current => Box::new(CurrentSource::new(conn)),
        Layout::Legacy => Box::new(LegacySource::new(conn)),
    })
}

/// Probes the schema to find out which layout a store uses.
///
/// # Errors
///
/// Any probe failure means the file is not a readable database and maps
/// to `StoreError::Unavailable`.
pub fn detect_layout(conn: &Connection, path: &Path) -> StoreResult<Layout> {
    let probe = |e| StoreError::unavailable(path, e);

    for table in ["Calendar", "CalendarItem"] {
        if !table_exists(conn, table).map_err(probe)? {
            return Err(StoreError::unknown_layout(
                path,
                format!("missing table {table}"),
            ));
        }
    }

    let columns = table_columns(conn, "Calendar").map_err(probe)?;
    debug!(columns = ?columns, "Calendar table columns");

    if has_column(&columns, "owner_identity_email") {
        Ok(Layout::Current)
    } else if has_column(&columns, "store_id") {
        Ok(Layout::Legacy)
    } else {
        Err(StoreError::unknown_layout(
            path,
            "Calendar table has neither owner_identity_email nor store_id",
        ))
    }
}
