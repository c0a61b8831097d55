//! Current layout: owner email stored on the calendar row.

use calextremes_core::EventRow;
use rusqlite::Connection;

use crate::error::StoreResult;
use crate::source::{CalendarRow, CalendarSource, Layout, OwnerRef};
use crate::sqlite::{query_events, text_value};

/// Calendar source for stores with `Calendar.owner_identity_email`.
pub struct CurrentSource {
    conn: Connection,
}

impl CurrentSource {
    /// Wraps a read-only connection to a current-layout store.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl CalendarSource for CurrentSource {
    fn layout(&self) -> Layout {
        Layout::Current
    }

    fn list_calendars(&self) -> StoreResult<Vec<CalendarRow>> {
        let mut stmt = self
            .conn
            .prepare("SELECT ROWID, title, owner_identity_email FROM Calendar ORDER BY ROWID")?;
        let rows = stmt.query_map([], |row| {
            let owner = match text_value(row.get_ref(2)?) {
                Some(email) => OwnerRef::Label(email),
                None => OwnerRef::Unset,
            };
            Ok(CalendarRow::new(
                row.get(0)?,
                text_value(row.get_ref(1)?).unwrap_or_default(),
                owner,
            ))
        })?;

        let mut calendars = Vec::new();
        for row in rows {
            calendars.push(row?);
        }
        Ok(calendars)
    }

    fn resolve_owner_label(&self, owner: &OwnerRef) -> Option<String> {
        match owner {
            OwnerRef::Label(label) if !label.is_empty() => Some(label.clone()),
            _ => None,
        }
    }

    fn events_for_calendar(&self, calendar_id: i64) -> StoreResult<Vec<EventRow>> {
        query_events(&self.conn, calendar_id)
    }
}
