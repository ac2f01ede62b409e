//! Build-time and call-time error types

use std::fmt;

use faultmap_core::{HttpError, InvalidStatus, TranslationError};
use http::StatusCode;
use thiserror::Error;

/// Error returned by fallible user-supplied providers
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which provider a missing mapping belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingKind {
    Code,
    Message,
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code => f.write_str("code"),
            Self::Message => f.write_str("message"),
        }
    }
}

/// Errors that can occur while answering a fault
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No rule's resolver recognized the fault
    #[error("no cause resolver matched fault of type {fault_type}")]
    UnresolvedCause { fault_type: &'static str },

    /// A map-based provider has no entry for the cause
    #[error("no {kind} mapping found for cause '{cause_id}'")]
    MissingMapping { kind: MappingKind, cause_id: String },

    /// A derived status fell outside `100..=599`
    #[error(transparent)]
    InvalidStatus(#[from] InvalidStatus),

    /// An invalid-value source was produced with a blank location
    #[error("source location for cause '{cause_id}' must not be blank")]
    InvalidSource { cause_id: String },

    /// A multi-error fault yielded no sub-errors
    #[error("fault of type {fault_type} carried no sub-errors")]
    NoSubErrors { fault_type: &'static str },

    /// No composite route accepted the fault
    #[error("no response generator registered for fault of type {fault_type}")]
    NoSubGenerator { fault_type: &'static str },

    /// A user-supplied provider failed; carried through untouched
    #[error(transparent)]
    Provider(BoxError),

    /// Messages could not be rendered in the requested locale
    #[error(transparent)]
    Translation(#[from] TranslationError),
}

impl GenerationError {
    /// Wrap the failure of a user-supplied provider
    pub fn provider(error: impl Into<BoxError>) -> Self {
        Self::Provider(error.into())
    }
}

impl HttpError for GenerationError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_type(&self) -> &str {
        match self {
            Self::UnresolvedCause { .. } | Self::NoSubGenerator { .. } => "unmapped_fault",
            Self::Provider(_) => "provider_error",
            Self::Translation(_) => "translation_error",
            Self::MissingMapping { .. } | Self::InvalidStatus(_) | Self::InvalidSource { .. } | Self::NoSubErrors { .. } => {
                "mapping_error"
            }
        }
    }

    fn client_message(&self) -> String {
        // Mapping failures describe server internals
        "internal server error".to_owned()
    }
}

/// One defect found while building a generator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Problem {
    /// Required slot left unset
    #[error("{0} is not configured")]
    Missing(String),

    /// Constant status outside `100..=599`
    #[error("{slot} has invalid status {code}")]
    InvalidStatus { slot: String, code: u16 },

    /// Map-based provider configured without entries
    #[error("{0} mapping must not be empty")]
    EmptyMapping(String),

    /// Composite generator without any route
    #[error("{0} has no routes")]
    NoRoutes(String),
}

/// Every defect found while building a generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationError {
    problems: Vec<Problem>,
}

impl ConfigurationError {
    pub(crate) fn new(problems: Vec<Problem>) -> Self {
        Self { problems }
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid response generator configuration: ")?;

        for (index, problem) in self.problems.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{problem}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ConfigurationError {}

/// Join a slot name onto its parent path
pub(crate) fn slot(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_owned()
    } else {
        format!("{parent}.{name}")
    }
}
