//! Core types shared by the faultmap crates
//!
//! Holds the data model every other crate speaks: the [`Cause`] a fault
//! resolves into, the [`ErrorEntry`] and [`ErrorPayload`] that describe it to
//! a client, and the [`ErrorResponse`] pairing a payload with an
//! [`HttpStatus`]. Responses can be rendered in a requested locale through
//! a [`Translator`].

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod cause;
pub mod error;
pub mod locale;
pub mod payload;
pub mod response;
pub mod status;

pub use cause::{Cause, Classified};
pub use error::HttpError;
pub use locale::{TranslationError, TranslationSource, Translator};
pub use payload::{ErrorEntry, ErrorPayload, Source, SourceKind};
pub use response::ErrorResponse;
pub use status::{HttpStatus, InvalidStatus};
