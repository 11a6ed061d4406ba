//! Configuration management for the Epic Cash VPN site
//!
//! Settings are read from YAML, overridden from the environment and
//! validated before use. Every field has a default matching the values the
//! production page ships with, so an empty file is a valid configuration.

pub mod defaults;
pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{
    AnalyticsSettings, Config, I18nSettings, LayoutSettings, LoggingSettings,
    NotificationSettings, RevealSettings, ScrollSettings, TouchSettings,
};
