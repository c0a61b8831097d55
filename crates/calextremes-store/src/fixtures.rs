//! Test stores for both layouts.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

/// Calendar with several events, including malformed and NULL starts.
pub const WORK_CALENDAR: i64 = 1;
/// Calendar without any event that has a start time.
pub const EMPTY_CALENDAR: i64 = 2;
/// Calendar with exactly one event.
pub const SINGLE_CALENDAR: i64 = 3;

const EVENTS: &str = "
    CREATE TABLE CalendarItem (
        summary TEXT,
        start_date,
        calendar_id INTEGER
    );
    INSERT INTO CalendarItem (summary, start_date, calendar_id) VALUES
        ('Retro', 86400, 1),
        ('Standup', 0, 1),
        (NULL, 43200.5, 1),
        ('Garbage', 'next week', 1),
        ('No start', NULL, 1),
        ('Unscheduled', NULL, 2),
        ('Dentist', 100000, 3);
";

fn build(dir: &Path, name: &str, schema: &str) -> PathBuf {
    let path = dir.join(name);
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(schema).unwrap();
    conn.execute_batch(EVENTS).unwrap();
    path
}

/// A store where calendars carry the owner email directly.
pub fn current_store(dir: &Path) -> PathBuf {
    build(
        dir,
        "current.sqlitedb",
        "
        CREATE TABLE Calendar (title TEXT, owner_identity_email TEXT);
        INSERT INTO Calendar (ROWID, title, owner_identity_email) VALUES
            (1, 'Work', 'alice@example.com'),
            (2, 'Holidays', NULL),
            (3, 'Personal', 'bob@example.com');
        ",
    )
}

/// A store where calendars reference an account row in `Store`.
pub fn legacy_store(dir: &Path) -> PathBuf {
    build(
        dir,
        "legacy.sqlitedb",
        "
        CREATE TABLE Store (name TEXT);
        INSERT INTO Store (ROWID, name) VALUES (1, 'iCloud'), (2, 'On My Mac');
        CREATE TABLE Calendar (title TEXT, store_id INTEGER);
        INSERT INTO Calendar (ROWID, title, store_id) VALUES
            (1, 'Work', 1),
            (2, 'Holidays', NULL),
            (3, 'Personal', 99);
        ",
    )
}

/// A legacy store whose account table is missing.
pub fn legacy_store_without_accounts(dir: &Path) -> PathBuf {
    build(
        dir,
        "legacy-no-store.sqlitedb",
        "
        CREATE TABLE Calendar (title TEXT, store_id INTEGER);
        INSERT INTO Calendar (ROWID, title, store_id) VALUES (1, 'Work', 1);
        ",
    )
}

/// A legacy store whose account table lacks the name column.
pub fn legacy_store_with_malformed_accounts(dir: &Path) -> PathBuf {
    build(
        dir,
        "legacy-bad-store.sqlitedb",
        "
        CREATE TABLE Store (label TEXT);
        INSERT INTO Store (ROWID, label) VALUES (1, 'iCloud');
        CREATE TABLE Calendar (title TEXT, store_id INTEGER);
        INSERT INTO Calendar (ROWID, title, store_id) VALUES (1, 'Work', 1);
        ",
    )
}
