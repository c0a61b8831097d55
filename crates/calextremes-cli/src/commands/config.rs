//! Configuration commands.

use crate::config::ExportConfig;
use crate::error::{ExportError, ExportResult};

/// Dump the effective configuration to stdout.
pub fn dump(config: &ExportConfig) -> ExportResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ExportError::config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", ExportConfig::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ExportConfig) -> ExportResult<()> {
    config
        .validate()
        .map_err(|problems| ExportError::config(problems.join("; ")))?;

    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> ExportResult<()> {
    let config_path = ExportConfig::default_path();
    println!("config: {}", config_path.display());
    Ok(())
}
