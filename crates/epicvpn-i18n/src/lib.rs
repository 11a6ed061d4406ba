//! Localization engine for the Epic Cash VPN site
//!
//! Elements opt into translation by declaring a key in a designated
//! attribute (`data-i18n` by default). The engine keeps the current locale,
//! writes the matching string from an immutable [`TranslationTable`] into
//! each bound element, persists the choice through a [`PreferenceStore`]
//! and notifies listeners after every switch.
//!
//! Which slot receives the text depends on the element: form fields get a
//! placeholder, images get alt text, everything else gets literal text
//! content (see [`slot_kind_of`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use epicvpn_i18n::{EngineOptions, LocalizationEngine, MemoryStore, TranslationTable};
//!
//! let table = TranslationTable::builtin()?;
//! let mut engine = LocalizationEngine::new(table, Box::new(MemoryStore::new()), EngineOptions::default());
//! engine.initialize(&mut document);
//! engine.set_locale(&mut document, "ru");
//! ```

pub mod document;
pub mod engine;
pub mod error;
pub mod events;
pub mod locale;
pub mod slot;
pub mod storage;
pub mod table;

pub use document::{Binding, Document, Selector};
pub use engine::{ApplyReport, EngineOptions, LocalizationEngine};
pub use error::{I18nError, I18nResult};
pub use events::{ListenerId, LocaleChanged, LocaleListeners, LOCALE_CHANGED_EVENT};
pub use locale::{Locale, DEFAULT_LOCALE};
pub use slot::{slot_kind_of, ElementDescriptor, SlotKind, TagKind};
pub use storage::{FileStore, MemoryStore, PreferenceStore};
pub use table::TranslationTable;
