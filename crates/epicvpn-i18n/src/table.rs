//! The translation table: locale → key → localized text

use crate::error::{I18nError, I18nResult};
use crate::locale::Locale;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Locale files compiled into the binary
const BUILTIN_RESOURCES: &[(&str, &str)] = &[
    ("en", include_str!("../../../locales/en.json")),
    ("ru", include_str!("../../../locales/ru.json")),
];

/// Immutable two-level mapping from locale to key to text.
///
/// Lookups are exact on both levels: there is no fallback from `en-US` to
/// `en` and no fallback to another locale. Text is stored verbatim and is
/// never interpreted as markup or as a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    entries: HashMap<Locale, HashMap<String, String>>,
}

impl TranslationTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The table shipped with the site (`locales/*.json`)
    pub fn builtin() -> I18nResult<Self> {
        let mut table = Self::new();
        for (code, content) in BUILTIN_RESOURCES {
            table = table.with_json(*code, content, &format!("builtin:{code}.json"))?;
        }
        debug!("Loaded built-in translation table with {} locales", table.entries.len());
        Ok(table)
    }

    /// Load every `<code>.json` file in a directory
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> I18nResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            warn!("Translations directory does not exist: {:?}", dir);
            return Err(I18nError::ResourceLoad {
                path: dir.to_string_lossy().to_string(),
            });
        }

        let mut table = Self::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(code) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let content = fs::read_to_string(&path).map_err(|_| I18nError::ResourceLoad {
                path: path.to_string_lossy().to_string(),
            })?;
            table = table.with_json(code, &content, &path.to_string_lossy())?;
        }

        info!(
            "Loaded {} locales from {:?}",
            table.entries.len(),
            dir
        );
        Ok(table)
    }

    /// Build a single-locale table from a JSON document
    pub fn from_json(locale: impl Into<Locale>, json: &str) -> I18nResult<Self> {
        let locale = locale.into();
        let origin = format!("{locale}.json");
        Self::new().with_json(locale, json, &origin)
    }

    /// Add (or extend) a locale from a JSON document.
    ///
    /// Nested objects are flattened into dot-separated keys, so
    /// `{"nav": {"start": "Go"}}` yields `nav.start`. Any non-string leaf is
    /// rejected.
    pub fn with_json(self, locale: impl Into<Locale>, json: &str, origin: &str) -> I18nResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(|source| I18nError::ResourceParse {
            path: origin.to_string(),
            source,
        })?;

        let mut flat = HashMap::new();
        match value {
            Value::Object(_) => flatten_into(&mut flat, None, &value, origin)?,
            _ => {
                return Err(I18nError::InvalidEntry {
                    path: origin.to_string(),
                    key: String::new(),
                })
            }
        }

        let locale = locale.into();
        debug!("Parsed {} entries for locale {} from {}", flat.len(), locale, origin);
        Ok(self.with_locale(locale, flat))
    }

    /// Add (or extend) a locale from an in-memory map
    pub fn with_locale<I, K, V>(mut self, locale: impl Into<Locale>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.entries
            .entry(locale.into())
            .or_default()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a single entry
    pub fn with_entry(
        self,
        locale: impl Into<Locale>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let entry: (String, String) = (key.into(), text.into());
        self.with_locale(locale, [entry])
    }

    /// Exact two-level lookup
    pub fn lookup(&self, locale: &Locale, key: &str) -> Option<&str> {
        self.entries
            .get(locale)
            .and_then(|row| row.get(key))
            .map(String::as_str)
    }

    /// Whether the table has a row for the locale
    pub fn has_locale(&self, locale: &Locale) -> bool {
        self.entries.contains_key(locale)
    }

    /// All locales with a row, sorted
    pub fn locales(&self) -> Vec<&Locale> {
        let mut locales: Vec<&Locale> = self.entries.keys().collect();
        locales.sort();
        locales
    }

    /// Keys of one locale, sorted; empty for an unknown locale
    pub fn keys(&self, locale: &Locale) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .entries
            .get(locale)
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Keys present for `reference` but absent for `target`, sorted
    pub fn missing_keys(&self, reference: &Locale, target: &Locale) -> Vec<&str> {
        let target_row = self.entries.get(target);
        let mut missing: Vec<&str> = self
            .keys(reference)
            .into_iter()
            .filter(|key| target_row.map_or(true, |row| !row.contains_key(*key)))
            .collect();
        missing.sort_unstable();
        missing
    }

    /// Number of entries for a locale
    pub fn len(&self, locale: &Locale) -> usize {
        self.entries.get(locale).map_or(0, HashMap::len)
    }

    /// Whether the table has no locales at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten_into(
    out: &mut HashMap<String, String>,
    prefix: Option<&str>,
    value: &Value,
    origin: &str,
) -> I18nResult<()> {
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                let key = match prefix {
                    Some(prefix) => format!("{prefix}.{name}"),
                    None => name.clone(),
                };
                flatten_into(out, Some(&key), child, origin)?;
            }
            Ok(())
        }
        Value::String(text) => {
            out.insert(prefix.unwrap_or_default().to_string(), text.clone());
            Ok(())
        }
        _ => Err(I18nError::InvalidEntry {
            path: origin.to_string(),
            key: prefix.unwrap_or_default().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TranslationTable {
        TranslationTable::new()
            .with_entry("en", "hero.title", "Hello")
            .with_entry("en", "nav.start", "Start for Free")
            .with_entry("ru", "hero.title", "Привет")
    }

    #[test]
    fn test_exact_lookup() {
        let table = sample();
        assert_eq!(table.lookup(&"en".into(), "hero.title"), Some("Hello"));
        assert_eq!(table.lookup(&"ru".into(), "hero.title"), Some("Привет"));
        assert_eq!(table.lookup(&"ru".into(), "nav.start"), None);
    }

    #[test]
    fn test_no_locale_fallback() {
        let table = sample();
        // Regional variants do not fall back to the base language
        assert_eq!(table.lookup(&"en-US".into(), "hero.title"), None);
        assert_eq!(table.lookup(&"fr".into(), "hero.title"), None);
        assert!(!table.has_locale(&"fr".into()));
    }

    #[test]
    fn test_nested_json_is_flattened() {
        let table = TranslationTable::from_json(
            "en",
            r#"{"nav": {"start": "Start", "main": "Home"}, "hero.title": "Hello"}"#,
        )
        .unwrap();

        let en = Locale::new("en");
        assert_eq!(table.lookup(&en, "nav.start"), Some("Start"));
        assert_eq!(table.lookup(&en, "nav.main"), Some("Home"));
        assert_eq!(table.lookup(&en, "hero.title"), Some("Hello"));
        assert_eq!(table.len(&en), 3);
    }

    #[test]
    fn test_markup_is_kept_verbatim() {
        let table =
            TranslationTable::from_json("en", r#"{"x": "<b>bold</b> & {name}"}"#).unwrap();
        assert_eq!(table.lookup(&"en".into(), "x"), Some("<b>bold</b> & {name}"));
    }

    #[test]
    fn test_non_string_leaf_is_rejected() {
        let result = TranslationTable::from_json("en", r#"{"pricing": {"monthly": 5}}"#);
        match result {
            Err(I18nError::InvalidEntry { key, .. }) => assert_eq!(key, "pricing.monthly"),
            other => panic!("expected InvalidEntry, got {other:?}"),
        }

        assert!(matches!(
            TranslationTable::from_json("en", r#"["not", "an", "object"]"#),
            Err(I18nError::InvalidEntry { .. })
        ));
        assert!(matches!(
            TranslationTable::from_json("en", "{broken"),
            Err(I18nError::ResourceParse { .. })
        ));
    }

    #[test]
    fn test_missing_keys() {
        let table = sample();
        assert_eq!(table.missing_keys(&"en".into(), &"ru".into()), vec!["nav.start"]);
        assert!(table.missing_keys(&"ru".into(), &"en".into()).is_empty());
        assert_eq!(table.missing_keys(&"en".into(), &"fr".into()).len(), 2);
    }

    #[test]
    fn test_builtin_table() {
        let table = TranslationTable::builtin().unwrap();
        let en = Locale::new("en");
        let ru = Locale::new("ru");

        assert_eq!(table.locales(), vec![&en, &ru]);
        assert_eq!(table.lookup(&en, "nav.main"), Some("Home"));
        assert_eq!(table.lookup(&ru, "nav.main"), Some("Главная"));
        assert_eq!(table.len(&en), table.len(&ru));
        assert!(table.missing_keys(&en, &ru).is_empty());
    }
}
