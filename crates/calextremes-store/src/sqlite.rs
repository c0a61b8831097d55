//! SQLite helpers: read-only connections, schema probes and value mapping.

use std::path::Path;
use std::time::Duration;

use calextremes_core::{EventRow, RawStart};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// How long to wait on a lock held by the store's owning application.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the store strictly read-only.
///
/// The connection is opened with `SQLITE_OPEN_READ_ONLY` and additionally
/// marked `query_only`. No statement that could take a write lock is ever
/// issued, including journal mode changes.
pub fn open_readonly(path: &Path) -> StoreResult<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| StoreError::unavailable(path, e))?;

    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(|e| StoreError::unavailable(path, e))?;
    conn.execute_batch("PRAGMA query_only = ON;")
        .map_err(|e| StoreError::unavailable(path, e))?;

    debug!(path = %path.display(), "Opened calendar store read-only");
    Ok(conn)
}

/// Returns true if a table with this name exists.
pub fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
        params![table],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
}

/// Returns the column names of a table, empty if it does not exist.
pub fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let rows = stmt.query_map(params![table], |row| row.get::<_, String>(0))?;
    rows.collect()
}

/// Returns true if the table has a column with this name (case-insensitive,
/// as SQLite itself treats identifiers).
pub fn has_column(columns: &[String], column: &str) -> bool {
    columns.iter().any(|c| c.eq_ignore_ascii_case(column))
}

/// Reads a column as display text, whatever its storage class.
///
/// NULL reads as `None`; numbers are rendered in their usual form.
pub fn text_value(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
    }
}

/// Reads a column as an integer key, if it holds one.
pub fn integer_value(value: ValueRef<'_>) -> Option<i64> {
    match value {
        ValueRef::Integer(i) => Some(i),
        _ => None,
    }
}

/// Maps a start-time column to a [`RawStart`]. NULL has no raw start.
pub fn raw_start(value: ValueRef<'_>) -> Option<RawStart> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(RawStart::Integer(i)),
        ValueRef::Real(f) => Some(RawStart::Real(f)),
        ValueRef::Text(t) => Some(RawStart::Text(String::from_utf8_lossy(t).into_owned())),
        ValueRef::Blob(b) => Some(RawStart::Blob(b.to_vec())),
    }
}

/// Fetches the events of one calendar that have a start time.
///
/// Both known layouts share the `CalendarItem` table. Rows come back in
/// `ROWID` order so that ties resolve the same way on every run.
pub fn query_events(conn: &Connection, calendar_id: i64) -> StoreResult<Vec<EventRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT summary, start_date
         FROM CalendarItem
         WHERE calendar_id = ?1
           AND start_date IS NOT NULL
         ORDER BY ROWID",
    )?;

    let rows = stmt.query_map(params![calendar_id], |row| {
        let summary = text_value(row.get_ref(0)?).unwrap_or_default();
        Ok(raw_start(row.get_ref(1)?).map(|start| EventRow { summary, start }))
    })?;

    let mut events = Vec::new();
    for row in rows {
        if let Some(event) = row? {
            events.push(event);
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn open_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_readonly(&dir.path().join("nope.sqlitedb")).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }

    #[test]
    fn connection_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::current_store(dir.path());
        let conn = open_readonly(&path).unwrap();

        assert!(conn.execute("DELETE FROM CalendarItem", []).is_err());
        assert!(conn.execute_batch("CREATE TABLE scratch (x)").is_err());
    }

    #[test]
    fn schema_probes() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::legacy_store(dir.path());
        let conn = open_readonly(&path).unwrap();

        assert!(table_exists(&conn, "Calendar").unwrap());
        assert!(table_exists(&conn, "Store").unwrap());
        assert!(!table_exists(&conn, "Participant").unwrap());

        let columns = table_columns(&conn, "Calendar").unwrap();
        assert!(has_column(&columns, "store_id"));
        assert!(has_column(&columns, "STORE_ID"));
        assert!(!has_column(&columns, "owner_identity_email"));
        assert!(table_columns(&conn, "Missing").unwrap().is_empty());
    }

    #[test]
    fn value_mapping() {
        assert_eq!(text_value(ValueRef::Null), None);
        assert_eq!(text_value(ValueRef::Integer(7)), Some("7".to_string()));
        assert_eq!(text_value(ValueRef::Text(b"Lunch")), Some("Lunch".to_string()));

        assert_eq!(integer_value(ValueRef::Integer(3)), Some(3));
        assert_eq!(integer_value(ValueRef::Text(b"3")), None);

        assert_eq!(raw_start(ValueRef::Null), None);
        assert_eq!(raw_start(ValueRef::Real(1.5)), Some(RawStart::Real(1.5)));
        assert_eq!(
            raw_start(ValueRef::Text(b"soon")),
            Some(RawStart::Text("soon".to_string()))
        );
    }

    #[test]
    fn events_skip_null_starts_and_keep_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::current_store(dir.path());
        let conn = open_readonly(&path).unwrap();

        let events = query_events(&conn, fixtures::WORK_CALENDAR).unwrap();
        let summaries: Vec<_> = events.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, vec!["Retro", "Standup", "", "Garbage"]);
        assert_eq!(events[2].start, RawStart::Real(43_200.5));
        assert_eq!(events[3].start, RawStart::Text("next week".to_string()));

        assert!(query_events(&conn, fixtures::EMPTY_CALENDAR).unwrap().is_empty());
    }
}
