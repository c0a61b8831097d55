//! Read-only access to calendar SQLite stores.
//!
//! Calendar stores come in two table layouts. This crate hides the
//! difference behind a single trait:
//!
//! - [`CalendarSource`] - Lists calendars, resolves owner labels, reads events
//! - [`open_source`] - Opens a store read-only and picks the right source
//! - [`StoreError`] - Error types for store operations
//!
//! # Architecture
//!
//! ```text
//!            Calendar.sqlitedb
//!                    │
//!                    ▼ open_source() / detect_layout()
//!          ┌─────────┴──────────┐
//!          ▼                    ▼
//! ┌─────────────────┐  ┌─────────────────┐
//! │  CurrentSource  │  │  LegacySource   │
//! │ owner_identity_ │  │ store_id ──►    │
//! │ email           │  │ Store.name      │
//! └────────┬────────┘  └────────┬────────┘
//!          │   CalendarSource   │
//!          └─────────┬──────────┘
//!                    ▼
//!             CalendarRow / EventRow
//! ```

pub mod current;
pub mod error;
pub mod legacy;
pub mod source;
pub mod sqlite;

#[cfg(test)]
mod fixtures;

pub use current::CurrentSource;
pub use error::{StoreError, StoreResult};
pub use legacy::LegacySource;
pub use source::{CalendarRow, CalendarSource, Layout, OwnerRef, detect_layout, open_source};
