//! Locale identifiers

use crate::error::{I18nError, I18nResult};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use unic_langid::LanguageIdentifier;

/// Locale used when nothing else is known
pub const DEFAULT_LOCALE: &str = "en";

/// A locale identifier such as `en` or `ru`.
///
/// Any string is accepted. A locale that has no row in the translation table
/// is still a valid value for the current-locale state; it simply resolves
/// no keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Default for Locale {
    fn default() -> Self {
        Self(DEFAULT_LOCALE.to_string())
    }
}

impl Locale {
    /// Wrap a locale code as-is
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the locale code
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the selector element for this locale, e.g. `lang-ru`
    pub fn selector_id(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.0)
    }

    /// Recover the locale from a selector id, if it carries the prefix
    pub fn from_selector_id(id: &str, prefix: &str) -> Option<Self> {
        id.strip_prefix(prefix)
            .filter(|code| !code.is_empty())
            .map(Self::new)
    }

    /// Parse as a BCP 47 language identifier
    pub fn to_language_identifier(&self) -> I18nResult<LanguageIdentifier> {
        self.0
            .parse()
            .map_err(|_| I18nError::InvalidLanguageId(self.0.clone()))
    }

    /// Whether the code is a well-formed language tag
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty() && self.to_language_identifier().is_ok()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for Locale {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Locale {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale() {
        assert_eq!(Locale::default().as_str(), "en");
    }

    #[test]
    fn test_selector_ids() {
        let locale = Locale::new("ru");
        assert_eq!(locale.selector_id("lang-"), "lang-ru");

        assert_eq!(Locale::from_selector_id("lang-en", "lang-"), Some(Locale::new("en")));
        assert_eq!(Locale::from_selector_id("lang-", "lang-"), None);
        assert_eq!(Locale::from_selector_id("menu-en", "lang-"), None);
    }

    #[test]
    fn test_language_identifier_conversion() {
        let lang_id = Locale::new("en-US").to_language_identifier().unwrap();
        assert_eq!(lang_id.to_string(), "en-US");

        assert!(Locale::new("ru").is_well_formed());
        assert!(!Locale::new("").is_well_formed());
        assert!(!Locale::new("not a locale").is_well_formed());
        assert!(matches!(
            Locale::new("!!").to_language_identifier(),
            Err(I18nError::InvalidLanguageId(_))
        ));
    }

    #[test]
    fn test_unknown_locales_are_accepted() {
        // No closed set: anything is a locale, even if no table row exists
        let locale: Locale = "fr".into();
        assert_eq!(locale.to_string(), "fr");
    }
}
