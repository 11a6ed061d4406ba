//! Translation coverage report

use epicvpn_i18n::{Locale, TranslationTable};
use serde::Serialize;

/// Coverage of one locale against the reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleCoverage {
    pub locale: Locale,
    pub keys: usize,
    /// Keys the reference has and this locale lacks
    pub missing: Vec<String>,
    /// Keys this locale has and the reference lacks
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub reference: Locale,
    pub reference_keys: usize,
    pub locales: Vec<LocaleCoverage>,
}

impl AuditReport {
    /// Compare every other locale of `table` with `reference`. `None` when
    /// the table has no such locale.
    pub fn build(table: &TranslationTable, reference: &Locale) -> Option<Self> {
        if !table.has_locale(reference) {
            return None;
        }
        let locales = table
            .locales()
            .into_iter()
            .filter(|locale| *locale != reference)
            .map(|locale| LocaleCoverage {
                locale: locale.clone(),
                keys: table.len(locale),
                missing: owned(table.missing_keys(reference, locale)),
                extra: owned(table.missing_keys(locale, reference)),
            })
            .collect();

        Some(Self {
            reference: reference.clone(),
            reference_keys: table.len(reference),
            locales,
        })
    }

    pub fn total_missing(&self) -> usize {
        self.locales.iter().map(|coverage| coverage.missing.len()).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.total_missing() == 0
    }
}

fn owned(keys: Vec<&str>) -> Vec<String> {
    keys.into_iter().map(str::to_string).collect()
}
