//! Export configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/calextremes/config.toml` by default. Every key is optional;
//! command-line flags take precedence over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File name of the calendar store looked up by default.
pub const DEFAULT_DATABASE_NAME: &str = "Calendar.sqlitedb";

/// File name of the report written by default.
pub const DEFAULT_REPORT_NAME: &str = "calendar_event_extremes.csv";

// ---------------------------------------------------------------------------
// ExportConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the calextremes export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Debug mode.
    pub debug: bool,

    /// Calendar store settings.
    #[serde(default)]
    pub source: SourceSettings,

    /// Report settings.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Where the calendar store lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Path to the calendar SQLite database.
    pub database: PathBuf,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            database: default_documents_dir().join(DEFAULT_DATABASE_NAME),
        }
    }
}

/// Where and how the report is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Path of the CSV report.
    pub path: PathBuf,

    /// Whether to append the `Exported At` column.
    pub include_exported_at: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: default_documents_dir().join(DEFAULT_REPORT_NAME),
            include_exported_at: true,
        }
    }
}

impl ExportConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Checks that the configured paths are usable.
    ///
    /// The store must be an existing file and the report's directory must
    /// exist. Returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if !self.source.database.is_file() {
            problems.push(format!(
                "calendar store not found: {}",
                self.source.database.display()
            ));
        }

        if let Some(dir) = self.output.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.is_dir() {
                problems.push(format!("report directory not found: {}", dir.display()));
            }
        }

        if self.output.path.is_dir() {
            problems.push(format!(
                "report path is a directory: {}",
                self.output.path.display()
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calextremes")
    }
}

/// Returns the user's documents directory, falling back to the home
/// directory and then the working directory.
pub fn default_documents_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
