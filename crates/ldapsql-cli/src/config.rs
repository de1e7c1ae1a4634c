//! Configuration for the ldapsql binary
//!
//! Loads settings from a YAML file (`ldapsql.yaml` by default). Every field
//! has a default, so a missing file is not an error unless it was named
//! explicitly. Environment variables always override file values.

use std::path::Path;

use ldapsql_translator::TranslatorConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::{LogFormat, LogOutput};

/// Looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "ldapsql.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {var}: {reason}")]
    InvalidOverride { var: &'static str, reason: String },
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or module-specific
    pub level: String,

    pub format: LogFormat,

    pub output: LogOutput,

    /// Directory for rotated log files
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            directory: "./logs".to_string(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse a YAML document; an empty document yields the defaults
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load configuration from a YAML file without environment overrides
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit `path` must exist; otherwise [`DEFAULT_CONFIG_FILE`] is
    /// used when present. Process environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Apply overrides from `lookup` (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(scope) = lookup("LDAPSQL_SEARCH_SCOPE") {
            self.translator.default_scope = scope.parse().map_err(|err| invalid("LDAPSQL_SEARCH_SCOPE", err))?;
        }
        if let Some(policy) = lookup("LDAPSQL_UNSEARCHABLE_COLUMNS") {
            self.translator.unsearchable_columns =
                policy.parse().map_err(|err| invalid("LDAPSQL_UNSEARCHABLE_COLUMNS", err))?;
        }
        if let Some(flag) = lookup("LDAPSQL_RESTRICT_TO_OBJECT_CLASS") {
            self.translator.restrict_to_object_class = parse_flag(&flag)
                .ok_or_else(|| invalid("LDAPSQL_RESTRICT_TO_OBJECT_CLASS", format!("not a boolean: {flag}")))?;
        }

        if let Some(level) = lookup("RUST_LOG") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = format.parse().map_err(|err| invalid("LOG_FORMAT", err))?;
        }
        if let Some(output) = lookup("LOG_OUTPUT") {
            self.logging.output = output.parse().map_err(|err| invalid("LOG_OUTPUT", err))?;
        }
        if let Some(dir) = lookup("LOG_DIR") {
            self.logging.directory = dir;
        }

        Ok(())
    }
}

fn invalid(var: &'static str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidOverride {
        var,
        reason: reason.to_string(),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
