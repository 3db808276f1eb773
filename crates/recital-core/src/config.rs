//! Configuration module for the recital planner.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::DEFAULT_RECITAL_ID;

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sheets: SheetsConfig,
    pub auth: AuthConfig,
    pub schedule: ScheduleConfig,
    pub logging: LoggingConfig,
}

/// Spreadsheet location and layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    /// Spreadsheet holding the roster, recitals and schedules. `None` until
    /// the user configures one.
    pub spreadsheet_id: Option<String>,
    /// Base URL of the Sheets API.
    pub api_base_url: String,
    /// A1 range of the dancer roster, header row included.
    pub dancers_range: String,
    /// A1 range of the recital list, header row included.
    pub recitals_range: String,
    /// Each recital's schedule lives on the sheet `{prefix}{recital id}`.
    pub events_sheet_prefix: String,
    /// Column span of a schedule sheet, header row included.
    pub events_columns: String,
}

/// Credentials for the spreadsheet API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// API key for read-only access.
    pub api_key: Option<String>,
    /// Environment variable holding an OAuth access token for read/write access.
    pub access_token_env: String,
}

/// Schedule settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Recital shown when none is selected explicitly.
    pub default_recital: String,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/recital/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("recital")
            .join("config.yaml")
    }

}

impl SheetsConfig {
    /// Name of the schedule sheet for `recital_id`.
    pub fn events_sheet(&self, recital_id: &str) -> String {
        format!("{}{}", self.events_sheet_prefix, recital_id)
    }

    /// A1 range of the schedule sheet for `recital_id`.
    pub fn events_range(&self, recital_id: &str) -> String {
        format!("{}!{}", self.events_sheet(recital_id), self.events_columns)
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            api_base_url: "https://sheets.googleapis.com".to_string(),
            dancers_range: "Sheet1!A1:H".to_string(),
            recitals_range: "Sheet4!A1:G".to_string(),
            events_sheet_prefix: "Events_".to_string(),
            events_columns: "A1:F".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            access_token_env: "RECITAL_SHEETS_TOKEN".to_string(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            default_recital: DEFAULT_RECITAL_ID.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"sheets.dancers_range"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

fn check_sheet_range(errors: &mut Vec<ValidationError>, field: &str, range: &str) {
    let Some((sheet, cells)) = range.split_once('!') else {
        errors.push(ValidationError {
            field: field.into(),
            message: format!("'{range}' is not an A1 range of the form Sheet!A1:Z"),
        });
        return;
    };
    if sheet.trim().is_empty() || cells.trim().is_empty() {
        errors.push(ValidationError {
            field: field.into(),
            message: format!("'{range}' must name both a sheet and a cell span"),
        });
    }
}

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- sheets ---
        if let Some(id) = &self.sheets.spreadsheet_id {
            if id.trim().is_empty() {
                errors.push(ValidationError {
                    field: "sheets.spreadsheet_id".into(),
                    message: "must not be blank when set".into(),
                });
            }
        }
        let base = &self.sheets.api_base_url;
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            errors.push(ValidationError {
                field: "sheets.api_base_url".into(),
                message: format!("'{base}' must be an http(s) URL"),
            });
        }
        check_sheet_range(&mut errors, "sheets.dancers_range", &self.sheets.dancers_range);
        check_sheet_range(&mut errors, "sheets.recitals_range", &self.sheets.recitals_range);
        if self.sheets.events_sheet_prefix.trim().is_empty() {
            errors.push(ValidationError {
                field: "sheets.events_sheet_prefix".into(),
                message: "must not be empty".into(),
            });
        }
        if self.sheets.events_columns.trim().is_empty() || self.sheets.events_columns.contains('!')
        {
            errors.push(ValidationError {
                field: "sheets.events_columns".into(),
                message: "must be a cell span without a sheet name, e.g. A1:F".into(),
            });
        }

        // --- auth ---
        if self.auth.access_token_env.trim().is_empty() {
            errors.push(ValidationError {
                field: "auth.access_token_env".into(),
                message: "must not be empty".into(),
            });
        }

        // --- schedule ---
        if self.schedule.default_recital.trim().is_empty() {
            errors.push(ValidationError {
                field: "schedule.default_recital".into(),
                message: "must not be empty".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use recital_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .spreadsheet_id("1AbCdEf")
///     .api_key("key-123")
///     .logging_level("debug")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- sheets ---

    pub fn spreadsheet_id(mut self, id: impl Into<String>) -> Self {
        self.config.sheets.spreadsheet_id = Some(id.into());
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.sheets.api_base_url = url.into();
        self
    }

    pub fn dancers_range(mut self, range: impl Into<String>) -> Self {
        self.config.sheets.dancers_range = range.into();
        self
    }

    pub fn recitals_range(mut self, range: impl Into<String>) -> Self {
        self.config.sheets.recitals_range = range.into();
        self
    }

    pub fn events_sheet_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.sheets.events_sheet_prefix = prefix.into();
        self
    }

    // --- auth ---

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.auth.api_key = Some(key.into());
        self
    }

    pub fn access_token_env(mut self, var: impl Into<String>) -> Self {
        self.config.auth.access_token_env = var.into();
        self
    }

    // --- schedule ---

    pub fn default_recital(mut self, recital_id: impl Into<String>) -> Self {
        self.config.schedule.default_recital = recital_id.into();
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
