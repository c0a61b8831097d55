//! CLI, configuration, CSV report writer
//!
//! This crate provides the `calextremes` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod report;

pub use cli::Cli;
pub use config::ExportConfig;
pub use error::{ExportError, ExportResult};
pub use export::{ExportOptions, ExportSummary, collect_records, run_export};
pub use report::write_report;
