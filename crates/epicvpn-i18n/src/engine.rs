//! The localization engine

use crate::document::Document;
use crate::events::{ListenerId, LocaleChanged, LocaleListeners};
use crate::locale::Locale;
use crate::slot::slot_kind_of;
use crate::storage::PreferenceStore;
use crate::table::TranslationTable;
use std::fmt;
use tracing::{debug, info, warn};

/// Names shared between the markup and the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Locale used when no valid preference is stored
    pub default_locale: Locale,
    /// Storage key of the persisted locale
    pub storage_key: String,
    /// Attribute carrying the translation key
    pub attribute: String,
    /// Class shared by locale selector elements
    pub selector_class: String,
    /// Selector ids are `<prefix><code>`
    pub selector_prefix: String,
    /// Class marking the active selector
    pub active_class: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            storage_key: "epic_vpn_lang".to_string(),
            attribute: "data-i18n".to_string(),
            selector_class: "lang-btn".to_string(),
            selector_prefix: "lang-".to_string(),
            active_class: "active".to_string(),
        }
    }
}

/// Outcome of one translation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Elements declaring a key
    pub bound: usize,
    /// Elements whose slot was written
    pub applied: usize,
    /// Elements left untouched because the key did not resolve
    pub missing: usize,
}

/// Owns the current locale and applies the translation table to documents.
///
/// Every operation is total: lookup misses, unknown locales and storage
/// failures are logged and absorbed, never returned.
pub struct LocalizationEngine {
    options: EngineOptions,
    table: TranslationTable,
    current: Locale,
    store: Box<dyn PreferenceStore>,
    listeners: LocaleListeners,
}

impl fmt::Debug for LocalizationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizationEngine")
            .field("options", &self.options)
            .field("current", &self.current)
            .field("locales", &self.table.locales())
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl LocalizationEngine {
    /// Create an engine. The current locale starts at the default until
    /// [`initialize`](Self::initialize) runs.
    pub fn new(
        table: TranslationTable,
        store: Box<dyn PreferenceStore>,
        options: EngineOptions,
    ) -> Self {
        let current = options.default_locale.clone();
        Self {
            options,
            table,
            current,
            store,
            listeners: LocaleListeners::new(),
        }
    }

    /// Restore the persisted locale (or the default) and apply it
    pub fn initialize<D: Document>(&mut self, doc: &mut D) {
        let locale = self.resolve_initial_locale();
        info!("Initializing localization with locale {}", locale);
        self.set_locale(doc, locale);
    }

    /// The locale [`initialize`](Self::initialize) would switch to
    pub fn resolve_initial_locale(&self) -> Locale {
        let default = || self.options.default_locale.clone();

        match self.store.load(&self.options.storage_key) {
            Ok(Some(saved)) => {
                let locale = Locale::new(saved.trim());
                if locale.is_well_formed() {
                    locale
                } else {
                    warn!("Ignoring invalid persisted locale {:?}", saved);
                    default()
                }
            }
            Ok(None) => default(),
            Err(e) => {
                warn!("Locale preference unavailable, using default: {}", e);
                default()
            }
        }
    }

    /// Switch the page to `locale`.
    ///
    /// In order: update state, persist, mark the matching selector active,
    /// translate bound elements, set the document language, notify
    /// listeners. Unknown locales are accepted.
    pub fn set_locale<D: Document>(&mut self, doc: &mut D, locale: impl Into<Locale>) {
        let locale = locale.into();
        self.current = locale.clone();

        if let Err(e) = self.store.store(&self.options.storage_key, locale.as_str()) {
            warn!("Failed to persist locale {}: {}", locale, e);
        }

        self.update_selectors(doc, &locale);

        if !self.table.has_locale(&locale) {
            warn!("Locale {} has no translations; content left unchanged", locale);
        }
        let report = self.apply_translations(doc, &locale);

        doc.set_language(locale.as_str());

        let event = LocaleChanged {
            language: locale.clone(),
        };
        self.listeners.emit(&event);
        doc.broadcast_locale_changed(&event);

        info!(
            "Locale set to {} ({} applied, {} missing of {} bound)",
            locale, report.applied, report.missing, report.bound
        );
    }

    /// Write `table[locale][key]` into every bound element whose key
    /// resolves. Elements with unresolved or empty entries keep their content.
    pub fn apply_translations<D: Document>(&self, doc: &mut D, locale: &Locale) -> ApplyReport {
        let bindings = doc.bindings(&self.options.attribute);
        let mut report = ApplyReport {
            bound: bindings.len(),
            ..ApplyReport::default()
        };

        for binding in bindings {
            match self.table.lookup(locale, &binding.key) {
                Some(text) if !text.is_empty() => {
                    doc.write_slot(&binding.node, slot_kind_of(&binding.element), text);
                    report.applied += 1;
                }
                _ => {
                    debug!("No translation for '{}' in locale {}", binding.key, locale);
                    report.missing += 1;
                }
            }
        }

        report
    }

    fn update_selectors<D: Document>(&self, doc: &mut D, locale: &Locale) {
        let active_id = locale.selector_id(&self.options.selector_prefix);
        for selector in doc.locale_selectors(&self.options.selector_class) {
            let active = selector.id.as_deref() == Some(active_id.as_str());
            doc.set_class(&selector.node, &self.options.active_class, active);
        }
    }

    /// Register a listener for locale switches
    pub fn on_locale_changed<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&LocaleChanged) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Remove a previously registered listener
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn current_locale(&self) -> &Locale {
        &self.current
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }
}
