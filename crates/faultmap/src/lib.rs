//! Map application faults to HTTP error responses
//!
//! A [`ResponseGenerator`] is assembled once, then shared read-only between
//! threads. Each call to [`ResponseGenerator::respond_to`] walks the
//! configured rules in order: the first resolver that recognizes the fault
//! classifies it into a [`Cause`], that rule's processor turns the cause into
//! an [`ErrorEntry`], and the status provider picks the HTTP status.
//!
//! Generators can be configured as named-field structs or through
//! configurator closures; both go through the same validation and report
//! every missing slot at once. A generator given a [`Translator`] can also
//! answer in a requested locale through [`ResponseGenerator::respond_to_in`].
//!
//! ```
//! #[derive(Debug, thiserror::Error)]
//! #[error("{0}")]
//! struct RuntimeError(String);
//!
//! let generator = faultmap::respond_to::<anyhow::Error>(|config| {
//!     config
//!         .payload(|payloads| {
//!             payloads.error(|rule| {
//!                 rule.identified_by(|resolvers| resolvers.type_of::<RuntimeError>().identified_by_key("RUNTIME_ERR"))
//!                     .processed_by(|processors| {
//!                         processors.standard(|standard| {
//!                             standard.message(|messages| messages.generated_as(|cause| cause.context().to_string()));
//!                         })
//!                     });
//!             })
//!         })
//!         .status(|statuses| statuses.of(500));
//! })
//! .unwrap();
//!
//! let response = generator.respond_to(&anyhow::Error::new(RuntimeError("boom".into()))).unwrap();
//! assert_eq!(response.status.as_u16(), 500);
//! assert_eq!(response.entries()[0].code, "RUNTIME_ERR");
//! assert_eq!(response.entries()[0].message, "boom");
//! ```

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod composite;
mod error;
pub mod locale;
mod mapping;
pub mod payload;
pub mod processor;
pub mod provider;
pub mod resolver;
mod response;
pub mod status;

pub use composite::{CompositeConfig, CompositeResponseGenerator};
pub use error::{BoxError, ConfigurationError, GenerationError, MappingKind, Problem};
pub use faultmap_config::{CauseMapping, MappingConfig};
pub use faultmap_core::{
    Cause, Classified, ErrorEntry, ErrorPayload, ErrorResponse, HttpError, HttpStatus, InvalidStatus, Source,
    SourceKind, TranslationError, Translator,
};
pub use payload::{PayloadConfig, RuleConfig, SingleErrorConfig};
pub use processor::{ProcessorConfig, StandardProcessorConfig};
pub use provider::{CodeConfig, MessageConfig};
pub use resolver::{CauseResolver, Downcast};
pub use response::{ResponseGenerator, ResponseGeneratorConfig};
pub use status::StatusConfig;

/// Build a [`ResponseGenerator`] from a configurator closure
pub fn respond_to<F: ?Sized + 'static>(
    init: impl FnOnce(&mut ResponseGeneratorConfig<F>),
) -> Result<ResponseGenerator<F>, ConfigurationError> {
    ResponseGenerator::configure(init)
}
