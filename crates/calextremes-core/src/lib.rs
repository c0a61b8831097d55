//! Core types: epoch timestamps, event extremes, report records

pub mod aggregate;
pub mod record;
pub mod time;
pub mod tracing;

pub use aggregate::{EventRow, ExtremeEvent, Extremes, extremes};
pub use record::{
    CalendarExtremeRecord, EXPORTED_AT_COLUMN, REPORT_HEADER, calendar_label, report_header,
};
pub use time::{RawStart, TIMESTAMP_FORMAT, epoch_origin, format_timestamp, to_absolute_time};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
