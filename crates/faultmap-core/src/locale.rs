//! Translating client-facing messages into a requested locale
//!
//! Locales are plain language tags such as `en`, `pl` or `pt-BR`; matching
//! them is left to the [`Translator`].

use thiserror::Error;

/// Error type of failures inside a translator
pub type TranslationSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Renders a message in a given locale
pub trait Translator: Send + Sync {
    /// Translate `message` into `locale`
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::LocaleNotSupported`] when the locale is
    /// unknown to the translator, or [`TranslationError::Failed`] when the
    /// translation itself could not be produced
    fn localize(&self, message: &str, locale: &str) -> Result<String, TranslationError>;
}

impl<T> Translator for T
where
    T: Fn(&str, &str) -> Result<String, TranslationError> + Send + Sync,
{
    fn localize(&self, message: &str, locale: &str) -> Result<String, TranslationError> {
        self(message, locale)
    }
}

/// Errors that can occur while translating a message
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("locale '{locale}' is not supported")]
    LocaleNotSupported { locale: String },

    #[error("translation of message ({message}) into locale '{locale}' failed: {source}")]
    Failed {
        message: String,
        locale: String,
        #[source]
        source: TranslationSource,
    },
}

impl TranslationError {
    pub fn not_supported(locale: &str) -> Self {
        Self::LocaleNotSupported {
            locale: locale.to_owned(),
        }
    }

    pub fn failed(message: &str, locale: &str, source: impl Into<TranslationSource>) -> Self {
        Self::Failed {
            message: message.to_owned(),
            locale: locale.to_owned(),
            source: source.into(),
        }
    }
}
