//! Application configuration structures

use crate::defaults;
use epicvpn_common::{LogFormat, LoggingConfig};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main site configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Localization engine settings
    #[validate(nested)]
    pub i18n: I18nSettings,

    /// Navbar and parallax behaviour
    #[validate(nested)]
    pub scroll: ScrollSettings,

    /// Mobile menu breakpoint and resize handling
    #[validate(nested)]
    pub layout: LayoutSettings,

    /// Fade-in reveal
    #[validate(nested)]
    pub reveal: RevealSettings,

    /// Toasts and loading screen timing
    #[validate(nested)]
    pub notifications: NotificationSettings,

    /// Analytics emission
    #[validate(nested)]
    pub analytics: AnalyticsSettings,

    /// Touch feedback and device profile
    #[validate(nested)]
    pub touch: TouchSettings,

    /// Logging configuration
    #[validate(nested)]
    pub logging: LoggingSettings,
}

/// Localization engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct I18nSettings {
    /// Locale used when no valid preference is stored
    #[validate(custom(function = "crate::validation::validate_locale_code", message = "Default locale must be a language code such as 'en'"))]
    pub default_locale: String,

    /// Key under which the chosen locale is persisted
    #[validate(custom(function = "crate::validation::validate_storage_key", message = "Storage key cannot be empty or padded"))]
    pub storage_key: String,

    /// Attribute declaring the translation key on an element
    #[validate(custom(function = "crate::validation::validate_attribute_name", message = "Binding attribute must be a valid attribute name"))]
    pub attribute: String,

    /// Class shared by locale selector buttons
    #[validate(custom(function = "crate::validation::validate_css_class", message = "Selector class must be a single class name"))]
    pub selector_class: String,

    /// Id prefix of locale selector buttons
    #[validate(length(min = 1, message = "Selector prefix cannot be empty"))]
    pub selector_prefix: String,

    /// Class set on the active selector
    #[validate(custom(function = "crate::validation::validate_css_class", message = "Active class must be a single class name"))]
    pub active_class: String,

    /// Directory of `<code>.json` files; the built-in table is used when unset
    pub translations_dir: Option<String>,

    /// JSON file backing the locale preference; in-memory when unset
    pub preference_file: Option<String>,
}

/// Scroll effect configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ScrollSettings {
    /// Scroll offset past which the navbar gets the `scrolled` class
    #[validate(range(min = 0.0, max = 10000.0, message = "Navbar threshold must be between 0 and 10000 pixels"))]
    pub navbar_threshold: f64,

    /// Hero translation per scrolled pixel
    #[validate(range(min = 0.0, max = 2.0, message = "Parallax speed must be between 0 and 2"))]
    pub parallax_speed: f64,

    /// Height of the fixed navbar, subtracted from anchor targets
    #[validate(range(min = 0.0, max = 1000.0, message = "Anchor offset must be between 0 and 1000 pixels"))]
    pub anchor_offset: f64,
}

/// Layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LayoutSettings {
    /// Viewport widths at or below this use the mobile menu
    #[validate(range(min = 240, max = 4096, message = "Mobile breakpoint must be between 240 and 4096 pixels"))]
    pub mobile_breakpoint: u32,

    /// Debounce applied to resize handling
    #[validate(range(max = 5000, message = "Resize debounce cannot exceed 5000 ms"))]
    pub resize_debounce_ms: u64,
}

/// Fade-in reveal configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RevealSettings {
    /// Visible fraction of an element that triggers the reveal
    #[validate(range(min = 0.0, max = 1.0, message = "Reveal threshold must be between 0 and 1"))]
    pub threshold: f64,
}

/// Notification configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NotificationSettings {
    /// Lifetime of a toast before it is removed automatically
    #[validate(range(min = 500, max = 60000, message = "Auto dismiss must be between 500 and 60000 ms"))]
    pub auto_dismiss_ms: u64,

    /// Delay between fading the loading screen and removing it
    #[validate(range(max = 5000, message = "Loading fade cannot exceed 5000 ms"))]
    pub loading_fade_ms: u64,
}

/// Analytics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Whether analytics events are emitted at all
    pub enabled: bool,

    /// Scroll depth percentage granularity
    #[validate(range(min = 1, max = 100, message = "Scroll depth step must be between 1 and 100"))]
    pub scroll_depth_step: u32,

    /// Debounce applied to scroll depth tracking
    #[validate(range(max = 5000, message = "Scroll debounce cannot exceed 5000 ms"))]
    pub scroll_debounce_ms: u64,
}

/// Touch configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TouchSettings {
    /// Window in which a second touch end is treated as a double tap
    #[validate(range(max = 2000, message = "Double tap window cannot exceed 2000 ms"))]
    pub double_tap_ms: u64,

    /// Core count below which transitions are disabled
    #[validate(range(max = 256, message = "Low-end concurrency cannot exceed 256"))]
    pub low_end_concurrency: u32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error, off)
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be one of: trace, debug, info, warn, error, off"))]
    pub level: String,

    /// Optional log file path
    pub file: Option<String>,

    /// Output style (pretty, compact, plain)
    #[validate(custom(function = "crate::validation::validate_log_format", message = "Log format must be one of: pretty, compact, plain"))]
    pub format: String,
}

impl Config {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        // First run the standard validator validation
        self.validate()?;

        // Then the optional paths, which the derive does not reach
        self.validate_paths()?;

        Ok(())
    }

    fn validate_paths(&self) -> Result<(), validator::ValidationErrors> {
        let mut errors = validator::ValidationErrors::new();

        if let Some(ref dir) = self.i18n.translations_dir {
            if let Err(err) = crate::validation::validate_file_path(dir) {
                errors.add("translations_dir", err);
            }
        }

        if let Some(ref file) = self.i18n.preference_file {
            if let Err(err) = crate::validation::validate_file_path(file) {
                errors.add("preference_file", err);
            }
        }

        if let Some(ref file) = self.logging.file {
            if let Err(err) = crate::validation::validate_file_path(file) {
                errors.add("log_file", err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_locale: defaults::DEFAULT_LOCALE.to_string(),
            storage_key: defaults::STORAGE_KEY.to_string(),
            attribute: defaults::I18N_ATTRIBUTE.to_string(),
            selector_class: defaults::SELECTOR_CLASS.to_string(),
            selector_prefix: defaults::SELECTOR_PREFIX.to_string(),
            active_class: defaults::ACTIVE_CLASS.to_string(),
            translations_dir: None,
            preference_file: None,
        }
    }
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            navbar_threshold: defaults::NAVBAR_THRESHOLD,
            parallax_speed: defaults::PARALLAX_SPEED,
            anchor_offset: defaults::ANCHOR_OFFSET,
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            mobile_breakpoint: defaults::MOBILE_BREAKPOINT,
            resize_debounce_ms: defaults::RESIZE_DEBOUNCE_MS,
        }
    }
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            threshold: defaults::REVEAL_THRESHOLD,
        }
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            auto_dismiss_ms: defaults::NOTIFICATION_DISMISS_MS,
            loading_fade_ms: defaults::LOADING_FADE_MS,
        }
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            scroll_depth_step: defaults::SCROLL_DEPTH_STEP,
            scroll_debounce_ms: defaults::SCROLL_DEPTH_DEBOUNCE_MS,
        }
    }
}

impl Default for TouchSettings {
    fn default() -> Self {
        Self {
            double_tap_ms: defaults::DOUBLE_TAP_MS,
            low_end_concurrency: defaults::LOW_END_CONCURRENCY,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            file: None,
            format: defaults::LOG_FORMAT.to_string(),
        }
    }
}

impl From<&LoggingSettings> for LoggingConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level.clone(),
            format: settings.format.parse().unwrap_or(LogFormat::Pretty),
            file_path: settings.file.clone(),
            ..LoggingConfig::default()
        }
    }
}
