//! Export command.

use chrono::{Local, NaiveDateTime, Timelike};

use crate::config::ExportConfig;
use crate::error::ExportResult;
use crate::export::{ExportOptions, ExportSummary, run_export};

/// Returns the current local time, truncated to whole seconds.
pub fn export_time() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Builds export options from configuration and a run-wide export time.
pub fn options(config: &ExportConfig, exported_at: NaiveDateTime) -> ExportOptions {
    ExportOptions {
        database: config.source.database.clone(),
        output: config.output.path.clone(),
        exported_at: config.output.include_exported_at.then_some(exported_at),
    }
}

/// Run the export and print where the report went.
pub fn run(config: &ExportConfig) -> ExportResult<ExportSummary> {
    let summary = run_export(&options(config, export_time()))?;
    println!("Exported to {}", summary.output.display());
    Ok(summary)
}
