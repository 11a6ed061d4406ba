//! Structured logging infrastructure for the site crates

use crate::error::{Result, SiteError};
use std::fs::{File, OpenOptions};
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output style of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line human readable output with colors
    #[default]
    Pretty,
    /// Single-line compact output, suited to log files
    Compact,
    /// The default fmt layer output
    Plain,
}

impl FromStr for LogFormat {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "plain" => Ok(Self::Plain),
            other => Err(SiteError::validation_field(
                format!("Unknown log format '{other}'"),
                "format",
            )),
        }
    }
}

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "epicvpn_i18n=trace")
    pub level: String,
    /// Output style
    pub format: LogFormat,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include spans in the output
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

fn open_log_file(path: &str) -> Result<Arc<File>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Arc::new(file))
}

fn install_error(err: impl std::fmt::Display) -> SiteError {
    SiteError::config(format!("Failed to install tracing subscriber: {err}"))
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Returns an error instead of panicking when a global subscriber is
/// already installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let file = config.file_path.as_deref().map(open_log_file).transpose()?;

    let installed = match config.format {
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_span_events(span_events)
                .with_target(config.include_targets);
            match file {
                Some(file) => registry
                    .with(layer.with_ansi(false).with_writer(file))
                    .try_init(),
                None => registry.with(layer).try_init(),
            }
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_span_events(span_events)
                .with_target(config.include_targets);
            match file {
                Some(file) => registry
                    .with(layer.with_ansi(false).with_writer(file))
                    .try_init(),
                None => registry.with(layer).try_init(),
            }
        }
        LogFormat::Plain => {
            let layer = fmt::layer()
                .with_span_events(span_events)
                .with_target(config.include_targets);
            match file {
                Some(file) => registry
                    .with(layer.with_ansi(false).with_writer(file))
                    .try_init(),
                None => registry.with(layer).try_init(),
            }
        }
    };

    installed.map_err(install_error)
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<()> {
    init_logging(LoggingConfig::default())
}

/// Initialize logging for development (pretty, debug level)
pub fn init_dev_logging() -> Result<()> {
    init_logging(LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Pretty,
        include_spans: true,
        ..LoggingConfig::default()
    })
}

/// Initialize logging for production (compact format, info level, file output)
pub fn init_prod_logging(log_file: impl Into<String>) -> Result<()> {
    init_logging(LoggingConfig {
        level: "info".to_string(),
        format: LogFormat::Compact,
        file_path: Some(log_file.into()),
        ..LoggingConfig::default()
    })
}
