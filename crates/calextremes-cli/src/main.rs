//! calextremes CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use calextremes_cli::cli::{Cli, Command, ConfigAction};
use calextremes_cli::commands;
use calextremes_cli::config::ExportConfig;
use calextremes_cli::error::{ExportError, ExportResult};
use calextremes_core::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing
    let tracing_config = if config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing_config.with_format(cli.log_format.into())) {
        eprintln!("warning: {}", e);
    }

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Run failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> ExportResult<ExportConfig> {
    let mut config = match cli.config {
        Some(ref path) => ExportConfig::load_from(path).map_err(ExportError::Config)?,
        None => ExportConfig::load().map_err(ExportError::Config)?,
    };
    cli.apply_overrides(&mut config);
    Ok(config)
}

fn run(cli: &Cli, config: &ExportConfig) -> ExportResult<()> {
    match cli.command {
        Some(Command::Config { ref action }) => match action {
            ConfigAction::Dump => commands::config::dump(config),
            ConfigAction::Validate => commands::config::validate(config),
            ConfigAction::Path => commands::config::path(),
        },
        Some(Command::Export) | None => commands::export::run(config).map(|_| ()),
    }
}
