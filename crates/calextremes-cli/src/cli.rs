//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use calextremes_core::TracingOutputFormat;

use crate::config::ExportConfig;

/// calextremes - Earliest and latest event of every calendar, as CSV
#[derive(Debug, Parser)]
#[command(name = "calextremes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "CALEXTREMES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    // --- Export overrides ---
    /// Calendar SQLite database to read
    #[arg(long, short)]
    pub database: Option<PathBuf>,

    /// CSV report to write
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Omit the trailing `Exported At` column
    #[arg(long)]
    pub no_exported_at: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut ExportConfig) {
        if self.debug {
            config.debug = true;
        }
        if let Some(ref database) = self.database {
            config.source.database = database.clone();
        }
        if let Some(ref output) = self.output {
            config.output.path = output.clone();
        }
        if self.no_exported_at {
            config.output.include_exported_at = false;
        }
    }
}

/// Log output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Multi-line human-readable output
    Pretty,
    /// Single-line output
    Compact,
    /// JSON lines
    Json,
}

impl From<LogFormat> for TracingOutputFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
            LogFormat::Json => Self::Json,
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export the report (default)
    Export,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump effective configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
