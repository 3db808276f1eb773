//! Config command - View and manage recital planner configuration
//!
//! Provides the `recital config` CLI command which:
//! 1. Shows the current configuration (YAML or JSON)
//! 2. Sets individual configuration values via dot-notation keys
//! 3. Validates the configuration file and reports errors
//! 4. Prints the configuration file path

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use recital_core::config::Config;
use tracing::info;

use crate::output::CommandContext;

/// Keys accepted by `config set`, with a short description
const SETTABLE_KEYS: &[(&str, &str)] = &[
    ("sheets.spreadsheet_id", "Google spreadsheet id"),
    ("sheets.api_base_url", "Sheets API base URL"),
    ("sheets.dancers_range", "Roster range, e.g. Sheet1!A1:H"),
    ("sheets.recitals_range", "Recitals range, e.g. Sheet4!A1:G"),
    ("sheets.events_sheet_prefix", "Prefix of per-recital schedule sheets"),
    ("sheets.events_columns", "Cell span of schedule sheets, e.g. A1:F"),
    ("auth.api_key", "Read-only API key"),
    ("auth.access_token_env", "Environment variable holding the OAuth token"),
    ("schedule.default_recital", "Recital used when none is selected"),
    ("logging.level", "trace|debug|info|warn|error"),
];

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "sheets.spreadsheet_id")
        key: String,
        /// New value
        value: String,
    },
    /// Validate configuration file
    Validate,
    /// Print the configuration file path
    Path,
}

impl ConfigCommand {
    /// Execute the config command
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(ctx),
            ConfigCommand::Set { key, value } => self.execute_set(ctx, key, value),
            ConfigCommand::Validate => self.execute_validate(ctx),
            ConfigCommand::Path => self.execute_path(ctx),
        }
    }

    fn execute_show(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();
        let mut config = ctx.config.clone();
        if config.auth.api_key.is_some() {
            config.auth.api_key = Some("***".to_string());
        }

        info!(config_path = %ctx.config_path.display(), "Showing configuration");

        if ctx.is_json() {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Configuration ({})", ctx.config_path.display()));
            formatter.info("");

            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;
            for line in yaml.lines() {
                formatter.info(line);
            }
        }

        Ok(())
    }

    fn execute_set(&self, ctx: &CommandContext, key: &str, value: &str) -> Result<()> {
        let formatter = ctx.formatter();
        let path = &ctx.config_path;
        let mut config = Config::load_or_default(path);

        info!(key = %key, "Setting configuration value");

        if let Err(e) = apply_config_value(&mut config, key, value) {
            if ctx.is_json() {
                formatter.print_json(&serde_json::json!({
                    "success": false,
                    "key": key,
                    "error": e.to_string(),
                }));
            } else {
                formatter.error(&format!("Failed to set '{key}': {e}"));
                formatter.info("");
                formatter.info("Supported keys:");
                for (name, help) in SETTABLE_KEYS {
                    formatter.info(&format!("  {name:<28} - {help}"));
                }
            }
            return Ok(());
        }

        let errors: Vec<String> = config.validate().iter().map(|e| e.to_string()).collect();
        if !errors.is_empty() {
            if ctx.is_json() {
                formatter.print_json(&serde_json::json!({
                    "success": false,
                    "key": key,
                    "errors": errors,
                }));
            } else {
                formatter.error(&format!("Invalid value for '{key}': {}", errors.join("; ")));
            }
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create configuration directory")?;
        }
        let yaml = serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
        std::fs::write(path, yaml).context("Failed to write configuration file")?;

        if ctx.is_json() {
            formatter.print_json(&serde_json::json!({
                "success": true,
                "key": key,
                "config_path": path.display().to_string(),
            }));
        } else {
            formatter.success(&format!("Set {key}"));
            formatter.info(&format!("Saved to {}", path.display()));
        }
        Ok(())
    }

    fn execute_validate(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();
        let path = &ctx.config_path;

        if !path.exists() {
            if ctx.is_json() {
                formatter.print_json(&serde_json::json!({
                    "valid": true,
                    "config_path": path.display().to_string(),
                    "errors": [],
                    "note": "Configuration file not found. Using defaults.",
                }));
            } else {
                formatter.info(&format!("Configuration file not found at {}", path.display()));
                formatter.info("Using default configuration. Run 'recital config set <key> <value>' to create one.");
            }
            return Ok(());
        }

        let config = match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                if ctx.is_json() {
                    formatter.print_json(&serde_json::json!({
                        "valid": false,
                        "config_path": path.display().to_string(),
                        "errors": [format!("Failed to parse configuration: {e}")],
                    }));
                } else {
                    formatter.error(&format!("Failed to parse configuration: {e}"));
                    formatter.info(&format!("File: {}", path.display()));
                }
                return Ok(());
            }
        };

        info!(config_path = %path.display(), "Validating configuration");
        let errors = config.validate();

        if ctx.is_json() {
            let error_strings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            formatter.print_json(&serde_json::json!({
                "valid": errors.is_empty(),
                "config_path": path.display().to_string(),
                "errors": error_strings,
            }));
        } else if errors.is_empty() {
            formatter.success("Configuration is valid");
            formatter.info(&format!("File: {}", path.display()));
        } else {
            formatter.error(&format!(
                "Configuration has {} error{}:",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" }
            ));
            formatter.info(&format!("File: {}", path.display()));
            formatter.info("");
            for error in &errors {
                formatter.info(&format!("  {} - {}", error.field, error.message));
            }
        }

        Ok(())
    }

    fn execute_path(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();
        if ctx.is_json() {
            formatter.print_json(&serde_json::json!({
                "config_path": ctx.config_path.display().to_string(),
                "exists": ctx.config_path.exists(),
            }));
        } else {
            println!("{}", ctx.config_path.display());
        }
        Ok(())
    }
}

/// Apply a dot-notation key/value pair to a Config
///
/// An empty value clears the optional keys (`sheets.spreadsheet_id`,
/// `auth.api_key`).
fn apply_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let optional = || {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    match key {
        "sheets.spreadsheet_id" => config.sheets.spreadsheet_id = optional(),
        "sheets.api_base_url" => config.sheets.api_base_url = value.to_string(),
        "sheets.dancers_range" => config.sheets.dancers_range = value.to_string(),
        "sheets.recitals_range" => config.sheets.recitals_range = value.to_string(),
        "sheets.events_sheet_prefix" => config.sheets.events_sheet_prefix = value.to_string(),
        "sheets.events_columns" => config.sheets.events_columns = value.to_string(),
        "auth.api_key" => config.auth.api_key = optional(),
        "auth.access_token_env" => config.auth.access_token_env = value.to_string(),
        "schedule.default_recital" => config.schedule.default_recital = value.to_string(),
        "logging.level" => config.logging.level = value.to_lowercase(),
        _ => bail!("Unknown configuration key '{key}'"),
    }
    Ok(())
}
