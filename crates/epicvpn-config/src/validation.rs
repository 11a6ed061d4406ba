//! Validation utilities and regex patterns

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Regex for locale codes accepted in configuration (`en`, `ru`, `pt-BR`)
pub static LOCALE_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("Invalid locale code regex pattern")
});

/// Regex for HTML attribute names usable as the binding attribute
pub static ATTRIBUTE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_.:-]*$").expect("Invalid attribute name regex pattern")
});

/// Regex for a single CSS class name
pub static CSS_CLASS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?[A-Za-z_][A-Za-z0-9_-]*$").expect("Invalid css class regex pattern")
});

/// Validate a locale code
pub fn validate_locale_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() {
        return Err(ValidationError::new("empty_locale_code"));
    }
    if LOCALE_CODE_REGEX.is_match(code) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_locale_code"))
    }
}

/// Validate the name of the translation binding attribute
pub fn validate_attribute_name(name: &str) -> Result<(), ValidationError> {
    if ATTRIBUTE_NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_attribute_name"))
    }
}

/// Validate a CSS class name
pub fn validate_css_class(class: &str) -> Result<(), ValidationError> {
    if CSS_CLASS_REGEX.is_match(class) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_css_class"))
    }
}

/// Validate a storage key (non-empty, no surrounding whitespace)
pub fn validate_storage_key(key: &str) -> Result<(), ValidationError> {
    if key.is_empty() || key.trim() != key {
        return Err(ValidationError::new("invalid_storage_key"));
    }
    Ok(())
}

/// Validate log level filter (plain level names only)
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level.to_ascii_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}

/// Validate log output format
pub fn validate_log_format(format: &str) -> Result<(), ValidationError> {
    match format {
        "pretty" | "compact" | "plain" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_format")),
    }
}

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    // Colon is allowed for Windows drive letters
    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}
