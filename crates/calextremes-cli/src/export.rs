//! The export pipeline: store → extremes → CSV report.

use std::path::PathBuf;

use calextremes_core::{CalendarExtremeRecord, calendar_label, extremes, report_header};
use calextremes_store::{CalendarSource, Layout, open_source};
use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::error::ExportResult;
use crate::report::write_report;

/// What to export and where.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Calendar store to read.
    pub database: PathBuf,
    /// Report to write.
    pub output: PathBuf,
    /// Export time for the `Exported At` column. `None` omits the column.
    pub exported_at: Option<NaiveDateTime>,
}

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Report that was written.
    pub output: PathBuf,
    /// Layout of the store that was read.
    pub layout: Layout,
    /// Number of calendars, equal to the number of report rows.
    pub calendars: usize,
    /// Calendars that had no event with a usable start time.
    pub calendars_without_events: usize,
}

/// Builds one record per calendar, in store order.
///
/// # Errors
///
/// Returns `StoreError::Query` (wrapped) if calendars or events cannot be
/// read. Missing owner labels and malformed start times are not errors.
pub fn collect_records(source: &dyn CalendarSource) -> ExportResult<Vec<CalendarExtremeRecord>> {
    let calendars = source.list_calendars()?;
    let mut records = Vec::with_capacity(calendars.len());

    for calendar in calendars {
        let owner = source.resolve_owner_label(&calendar.owner).unwrap_or_default();
        let events = source.events_for_calendar(calendar.id)?;
        let event_count = events.len();
        let extremes = extremes(events);

        debug!(
            calendar_id = calendar.id,
            title = %calendar.title,
            events = event_count,
            empty = extremes.is_empty(),
            "Aggregated calendar"
        );

        records.push(CalendarExtremeRecord::new(
            calendar_label(&owner, &calendar.title),
            extremes,
        ));
    }

    Ok(records)
}

/// Runs a full export.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or read, or if the report
/// cannot be written. Nothing is written when the store fails.
pub fn run_export(options: &ExportOptions) -> ExportResult<ExportSummary> {
    let source = open_source(&options.database)?;
    let layout = source.layout();
    let records = collect_records(source.as_ref())?;
    drop(source);

    let calendars_without_events = records.iter().filter(|r| r.extremes.is_empty()).count();
    let header = report_header(options.exported_at.is_some());
    let rows = records
        .iter()
        .map(|record| record.to_row(options.exported_at.as_ref()));
    let calendars = write_report(&options.output, &header, rows)?;

    info!(
        output = %options.output.display(),
        layout = %layout,
        calendars,
        calendars_without_events,
        "Export complete"
    );

    Ok(ExportSummary {
        output: options.output.clone(),
        layout,
        calendars,
        calendars_without_events,
    })
}
