//! Structured logging for the ldapsql binary
//!
//! Standard output carries command results, so console logs always go to
//! stderr. Optionally a daily-rotated file receives a plain-text copy.

use std::fmt;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt as tfmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

const LOG_FILE_PREFIX: &str = "ldapsql.log";

/// Log format configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format for development
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        })
    }
}

/// Log output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stderr,
    /// Daily-rotated file under the configured directory
    File,
    Both,
}

impl FromStr for LogOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stderr" => Ok(LogOutput::Stderr),
            "file" => Ok(LogOutput::File),
            "both" => Ok(LogOutput::Both),
            other => Err(format!("unknown log output '{other}'")),
        }
    }
}

impl fmt::Display for LogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogOutput::Stderr => "stderr",
            LogOutput::File => "file",
            LogOutput::Both => "both",
        })
    }
}

/// Install the global subscriber described by `config`.
///
/// `level` accepts anything `EnvFilter` does, e.g. `debug` or
/// `ldapsql_translator=trace,warn`.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("invalid log level directive '{}'", config.level))?;

    match config.output {
        LogOutput::Stderr => tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer(config.format))
            .try_init()?,
        LogOutput::File => tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer(&config.directory)?)
            .try_init()?,
        LogOutput::Both => tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer(config.format))
            .with(file_layer(&config.directory)?)
            .try_init()?,
    }

    tracing::debug!(
        format = %config.format,
        output = %config.output,
        level = %config.level,
        "logging initialized"
    );
    Ok(())
}

fn console_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = tfmt::layer().with_writer(std::io::stderr);
    match format {
        LogFormat::Pretty => layer.pretty().with_target(true).boxed(),
        LogFormat::Json => layer.json().with_current_span(true).boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}

fn file_layer<S>(directory: &str) -> anyhow::Result<Box<dyn Layer<S> + Send + Sync>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    std::fs::create_dir_all(directory)
        .with_context(|| format!("failed to create log directory {directory}"))?;
    let appender = RollingFileAppender::new(Rotation::DAILY, directory, LOG_FILE_PREFIX);

    Ok(tfmt::layer().with_writer(appender).with_ansi(false).boxed())
}
