//! Configuration loading utilities

use crate::Config;
use epicvpn_common::SiteError;
use std::env;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable pointing at the configuration file
pub const CONFIG_PATH_VAR: &str = "EPICVPN_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for SiteError {
    fn from(err: ConfigError) -> Self {
        SiteError::config_with_source("Failed to load configuration", err)
    }
}

/// Configuration loader for the site
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        debug!("Loading configuration from {:?}", path.as_ref());
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::load_from_str(&content, |var| env::var(var).ok())
    }

    /// Parse YAML, apply overrides resolved through `lookup`, then validate
    pub fn load_from_str<F>(content: &str, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // An empty document deserializes to null rather than an empty map
        let mut config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content)?
        };

        Self::apply_overrides(&mut config, lookup)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from the environment and well-known file names
    pub fn load() -> Result<Config, ConfigError> {
        let config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::load_config(&config_path)?
        } else if Path::new("config.yaml").exists() {
            Self::load_config("config.yaml")?
        } else if Path::new("config.yml").exists() {
            Self::load_config("config.yml")?
        } else {
            info!("No configuration file found, using defaults");
            Self::load_from_str("", |var| env::var(var).ok())?
        };

        Ok(config)
    }

    /// Apply environment-style overrides to configuration
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Localization overrides
        if let Some(locale) = lookup("EPICVPN_DEFAULT_LOCALE") {
            config.i18n.default_locale = locale;
        }

        if let Some(key) = lookup("EPICVPN_STORAGE_KEY") {
            config.i18n.storage_key = key;
        }

        if let Some(dir) = lookup("EPICVPN_TRANSLATIONS_DIR") {
            config.i18n.translations_dir = Some(dir);
        }

        if let Some(file) = lookup("EPICVPN_PREFERENCE_FILE") {
            config.i18n.preference_file = Some(file);
        }

        // Page behaviour overrides
        if let Some(breakpoint) = lookup("EPICVPN_MOBILE_BREAKPOINT") {
            config.layout.mobile_breakpoint = parse_var("EPICVPN_MOBILE_BREAKPOINT", &breakpoint)?;
        }

        if let Some(enabled) = lookup("EPICVPN_ANALYTICS_ENABLED") {
            config.analytics.enabled = parse_var("EPICVPN_ANALYTICS_ENABLED", &enabled)?;
        }

        // Logging overrides
        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(file) = lookup("LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParse {
        var: var.to_string(),
        source: Box::new(e),
    })
}
