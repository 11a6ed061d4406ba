//! Construction of the localization engine from configuration

use epicvpn_common::Result;
use epicvpn_config::I18nSettings;
use epicvpn_i18n::{
    Document, EngineOptions, FileStore, LocalizationEngine, Locale, MemoryStore, PreferenceStore,
    TranslationTable,
};
use std::cell::RefCell;
use tracing::{info, warn};

/// The configured translation directory, or the built-in table
pub fn load_table(settings: &I18nSettings) -> Result<TranslationTable> {
    let table = match &settings.translations_dir {
        Some(dir) => {
            info!("Loading translations from {}", dir);
            TranslationTable::load_dir(dir)?
        }
        None => TranslationTable::builtin()?,
    };
    Ok(table)
}

/// File-backed storage when a preference file is configured, otherwise
/// storage that lasts for the session
pub fn open_store(settings: &I18nSettings) -> Box<dyn PreferenceStore> {
    match &settings.preference_file {
        Some(path) => Box::new(FileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    }
}

pub fn engine_options(settings: &I18nSettings) -> EngineOptions {
    EngineOptions {
        default_locale: Locale::new(settings.default_locale.as_str()),
        storage_key: settings.storage_key.clone(),
        attribute: settings.attribute.clone(),
        selector_class: settings.selector_class.clone(),
        selector_prefix: settings.selector_prefix.clone(),
        active_class: settings.active_class.clone(),
    }
}

pub fn build_engine(settings: &I18nSettings) -> Result<LocalizationEngine> {
    let table = load_table(settings)?;
    Ok(LocalizationEngine::new(
        table,
        open_store(settings),
        engine_options(settings),
    ))
}

/// Switch the locale of an engine shared between event callbacks.
///
/// A switch requested while another one is still running, for instance by a
/// `languageChanged` handler that clicks a selector, is dropped with a
/// warning. Returns whether the switch ran.
pub fn switch_shared_locale<D: Document>(
    state: &RefCell<(LocalizationEngine, D)>,
    locale: impl Into<Locale>,
) -> bool {
    let locale = locale.into();
    let Ok(mut guard) = state.try_borrow_mut() else {
        warn!("Ignoring switch to {} while a locale switch is in progress", locale);
        return false;
    };
    let (engine, document) = &mut *guard;
    engine.set_locale(document, locale);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, MemoryDocument};
    use epicvpn_common::SiteError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_use_builtin_table() {
        let engine = build_engine(&I18nSettings::default()).unwrap();
        assert_eq!(engine.options(), &EngineOptions::default());
        assert!(engine.table().has_locale(&Locale::new("ru")));
    }

    #[test]
    fn test_translation_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("de.json"), r#"{"nav.main": "Start"}"#).unwrap();
        let settings = I18nSettings {
            translations_dir: Some(temp_dir.path().display().to_string()),
            ..I18nSettings::default()
        };

        let table = load_table(&settings).unwrap();
        assert_eq!(table.lookup(&Locale::new("de"), "nav.main"), Some("Start"));
        assert!(!table.has_locale(&Locale::new("en")));
    }

    #[test]
    fn test_broken_translation_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("en.json"), r#"{"nav.main": 1}"#).unwrap();
        let settings = I18nSettings {
            translations_dir: Some(temp_dir.path().display().to_string()),
            ..I18nSettings::default()
        };

        assert!(matches!(
            load_table(&settings),
            Err(SiteError::Localization { .. })
        ));
    }

    #[test]
    fn test_shared_switch_during_switch_is_dropped() {
        let table = TranslationTable::new()
            .with_entry("en", "hero.title", "Hello")
            .with_entry("ru", "hero.title", "Привет");
        let engine =
            LocalizationEngine::new(table, Box::new(MemoryStore::new()), EngineOptions::default());
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let title = doc.append(body, Element::new("h1").with_attr("data-i18n", "hero.title"));
        let state = RefCell::new((engine, doc));

        assert!(switch_shared_locale(&state, "en"));
        assert_eq!(state.borrow().1.text_content(title), "Hello");

        {
            let _running = state.borrow_mut();
            assert!(!switch_shared_locale(&state, "ru"));
        }
        assert_eq!(state.borrow().0.current_locale().as_str(), "en");
        assert_eq!(state.borrow().1.text_content(title), "Hello");

        assert!(switch_shared_locale(&state, "ru"));
        assert_eq!(state.borrow().1.text_content(title), "Привет");
        assert_eq!(state.borrow().1.lang(), Some("ru"));
    }
}
