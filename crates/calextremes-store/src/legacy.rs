//! Legacy layout: owner resolved through the `Store` account table.

use calextremes_core::EventRow;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::source::{CalendarRow, CalendarSource, Layout, OwnerRef};
use crate::sqlite::{has_column, integer_value, query_events, table_columns, text_value};

/// Calendar source for stores with `Calendar.store_id`.
///
/// The account table is optional. When it is missing or has no `name`
/// column, every owner label resolves to `None`.
pub struct LegacySource {
    conn: Connection,
    accounts_available: bool,
}

impl LegacySource {
    /// Wraps a read-only connection to a legacy-layout store.
    ///
    /// Probes the account table once up front.
    pub fn new(conn: Connection) -> Self {
        let accounts_available = match table_columns(&conn, "Store") {
            Ok(columns) if has_column(&columns, "name") => true,
            Ok(columns) if columns.is_empty() => {
                warn!("Account table Store is missing, owner labels will be empty");
                false
            }
            Ok(columns) => {
                warn!(
                    columns = ?columns,
                    "Account table Store has no name column, owner labels will be empty"
                );
                false
            }
            Err(e) => {
                warn!(error = %e, "Cannot inspect account table Store, owner labels will be empty");
                false
            }
        };
        Self {
            conn,
            accounts_available,
        }
    }

    fn account_name(&self, account_id: i64) -> rusqlite::Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT name FROM Store WHERE ROWID = ?1",
                params![account_id],
                |row| Ok(text_value(row.get_ref(0)?)),
            )
            .optional()
            .map(Option::flatten)
    }
}

impl CalendarSource for LegacySource {
    fn layout(&self) -> Layout {
        Layout::Legacy
    }

    fn list_calendars(&self) -> StoreResult<Vec<CalendarRow>> {
        let mut stmt = self
            .conn
            .prepare("SELECT ROWID, title, store_id FROM Calendar ORDER BY ROWID")?;
        let rows = stmt.query_map([], |row| {
            let owner = match integer_value(row.get_ref(2)?) {
                Some(account_id) => OwnerRef::Account(account_id),
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
        let OwnerRef::Account(account_id) = owner else {
            return None;
        };
        if !self.accounts_available {
            return None;
        }

        match self.account_name(*account_id) {
            Ok(Some(name)) if !name.is_empty() => Some(name),
            Ok(_) => {
                debug!(account_id, "No account name for calendar owner");
                None
            }
            Err(e) => {
                warn!(account_id, error = %e, "Account lookup failed, using empty owner label");
                None
            }
        }
    }

    fn events_for_calendar(&self, calendar_id: i64) -> StoreResult<Vec<EventRow>> {
        query_events(&self.conn, calendar_id)
    }
}
