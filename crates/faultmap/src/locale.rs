//! Translators for localized responses

use std::fmt;

use faultmap_core::{TranslationError, Translator};

/// Falls back to a default text when the wrapped translator does not know a locale
///
/// Other translation failures are passed on.
pub struct WithDefault<T> {
    default: Option<String>,
    translator: T,
}

impl<T: Translator> WithDefault<T> {
    /// Keep the untranslated message for unsupported locales
    pub fn new(translator: T) -> Self {
        Self {
            default: None,
            translator,
        }
    }

    /// Answer unsupported locales with `default`
    pub fn with_text(default: impl Into<String>, translator: T) -> Self {
        Self {
            default: Some(default.into()),
            translator,
        }
    }
}

impl<T: Translator> Translator for WithDefault<T> {
    fn localize(&self, message: &str, locale: &str) -> Result<String, TranslationError> {
        match self.translator.localize(message, locale) {
            Err(TranslationError::LocaleNotSupported { locale }) => {
                tracing::info!(locale = %locale, "locale not supported, returning default text");
                Ok(self.default.clone().unwrap_or_else(|| message.to_owned()))
            }
            other => other,
        }
    }
}

impl<T> fmt::Debug for WithDefault<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WithDefault")
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}
