use serde::Serialize;

use crate::locale::{TranslationError, Translator};

/// Part of the request an invalid value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Query,
    Header,
    Body,
    Path,
}

/// Location of the request data that caused an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    /// Parameter name, header name or body pointer; never blank
    pub location: String,
}

impl Source {
    pub fn new(kind: SourceKind, location: impl Into<String>) -> Self {
        Self {
            kind,
            location: location.into(),
        }
    }

    pub fn query(location: impl Into<String>) -> Self {
        Self::new(SourceKind::Query, location)
    }

    pub fn header(location: impl Into<String>) -> Self {
        Self::new(SourceKind::Header, location)
    }

    pub fn body(location: impl Into<String>) -> Self {
        Self::new(SourceKind::Body, location)
    }

    pub fn path(location: impl Into<String>) -> Self {
        Self::new(SourceKind::Path, location)
    }

    /// Whether the location names something
    pub fn is_valid(&self) -> bool {
        !self.location.trim().is_empty()
    }
}

/// One client-facing error description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    /// Machine-readable code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Offending request data, for invalid-input errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl ErrorEntry {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// Same entry with its message translated; code and source are kept
    pub fn localized(&self, translator: &dyn Translator, locale: &str) -> Result<Self, TranslationError> {
        Ok(Self {
            message: translator.localize(&self.message, locale)?,
            ..self.clone()
        })
    }
}

/// Body of an error response
///
/// `Single` carries exactly one entry. `Multi` carries the entries of every
/// sub-error in extraction order and is never built empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    Single(ErrorEntry),
    Multi { errors: Vec<ErrorEntry> },
}

impl ErrorPayload {
    /// All entries, in order
    pub fn entries(&self) -> &[ErrorEntry] {
        match self {
            Self::Single(entry) => std::slice::from_ref(entry),
            Self::Multi { errors } => errors,
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multi { .. })
    }

    /// Same payload with every message translated, failing on the first error
    pub fn localized(&self, translator: &dyn Translator, locale: &str) -> Result<Self, TranslationError> {
        match self {
            Self::Single(entry) => entry.localized(translator, locale).map(Self::Single),
            Self::Multi { errors } => Ok(Self::Multi {
                errors: errors
                    .iter()
                    .map(|entry| entry.localized(translator, locale))
                    .collect::<Result<_, _>>()?,
            }),
        }
    }
}
