//! Default values shared by the settings structs and the page runtime.

/// Locale used when nothing usable is persisted
pub const DEFAULT_LOCALE: &str = "en";

/// Durable storage key holding the last chosen locale
pub const STORAGE_KEY: &str = "epic_vpn_lang";

/// Attribute carrying the translation key on bound elements
pub const I18N_ATTRIBUTE: &str = "data-i18n";

/// Class shared by all locale selector buttons
pub const SELECTOR_CLASS: &str = "lang-btn";

/// Id prefix of locale selector buttons (`lang-en`, `lang-ru`)
pub const SELECTOR_PREFIX: &str = "lang-";

/// Class marking the active locale selector
pub const ACTIVE_CLASS: &str = "active";

/// Scroll offset in pixels past which the navbar is marked as scrolled
pub const NAVBAR_THRESHOLD: f64 = 50.0;

/// Hero parallax factor
pub const PARALLAX_SPEED: f64 = 0.5;

/// Fixed navbar height subtracted from anchor scroll targets
pub const ANCHOR_OFFSET: f64 = 80.0;

/// Widths at or below this are treated as mobile
pub const MOBILE_BREAKPOINT: u32 = 768;

pub const RESIZE_DEBOUNCE_MS: u64 = 250;

/// Intersection ratio at which fade-in elements become visible
pub const REVEAL_THRESHOLD: f64 = 0.1;

pub const NOTIFICATION_DISMISS_MS: u64 = 5000;

pub const LOADING_FADE_MS: u64 = 300;

/// Scroll depth is reported at multiples of this percentage
pub const SCROLL_DEPTH_STEP: u32 = 25;

pub const SCROLL_DEPTH_DEBOUNCE_MS: u64 = 100;

/// Two touch ends closer than this count as a double tap
pub const DOUBLE_TAP_MS: u64 = 300;

/// Devices reporting fewer logical cores get transitions disabled
pub const LOW_END_CONCURRENCY: u32 = 4;

pub const LOG_LEVEL: &str = "info";

pub const LOG_FORMAT: &str = "pretty";
