//! In-memory message catalog for localization tests

use std::collections::HashMap;

use faultmap::{TranslationError, Translator};

/// Translations keyed by locale, then by untranslated message
#[derive(Debug, Default)]
pub struct Catalog {
    locales: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation of `message` for `locale`
    pub fn with(mut self, locale: &str, message: &str, translated: &str) -> Self {
        self.locales
            .entry(locale.to_owned())
            .or_default()
            .insert(message.to_owned(), translated.to_owned());
        self
    }
}

impl Translator for Catalog {
    fn localize(&self, message: &str, locale: &str) -> Result<String, TranslationError> {
        let entries = self
            .locales
            .get(locale)
            .ok_or_else(|| TranslationError::not_supported(locale))?;

        entries
            .get(message)
            .cloned()
            .ok_or_else(|| TranslationError::failed(message, locale, "no catalog entry"))
    }
}
