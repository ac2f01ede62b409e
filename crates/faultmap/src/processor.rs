//! Turning a cause into an error entry

use std::fmt;
use std::marker::PhantomData;

use faultmap_core::{Cause, ErrorEntry, HttpError, Source};

use crate::error::{GenerationError, Problem, slot};
use crate::provider::{
    CauseCodeProvider, CauseCodeProviders, CauseMessageProvider, CauseMessageProviders, CodeConfig, MessageConfig,
};

/// Produces the error entry describing a cause
pub trait CauseProcessor<F: ?Sized>: Send + Sync {
    fn process(&self, cause: &Cause<'_, F>) -> Result<ErrorEntry, GenerationError>;
}

/// Locates the request data an invalid-input cause refers to
pub type SourceFn<F> = dyn Fn(&Cause<'_, F>) -> Source + Send + Sync;

/// Code and message from separate providers
///
/// With a source function attached, entries also carry the location of the
/// offending request data, which must not be blank.
pub struct StandardCauseProcessor<F: ?Sized> {
    code: Box<dyn CauseCodeProvider<F>>,
    message: Box<dyn CauseMessageProvider<F>>,
    source: Option<Box<SourceFn<F>>>,
}

impl<F: ?Sized> StandardCauseProcessor<F> {
    pub fn new(code: Box<dyn CauseCodeProvider<F>>, message: Box<dyn CauseMessageProvider<F>>) -> Self {
        Self {
            code,
            message,
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: Box<SourceFn<F>>) -> Self {
        self.source = Some(source);
        self
    }
}

impl<F: ?Sized> CauseProcessor<F> for StandardCauseProcessor<F> {
    fn process(&self, cause: &Cause<'_, F>) -> Result<ErrorEntry, GenerationError> {
        let entry = ErrorEntry::new(self.code.code_for(cause)?, self.message.message_for(cause)?);

        let Some(ref source) = self.source else {
            return Ok(entry);
        };

        let source = source(cause);
        if !source.is_valid() {
            return Err(GenerationError::InvalidSource {
                cause_id: cause.id().to_owned(),
            });
        }

        Ok(entry.with_source(source))
    }
}

impl<F: ?Sized> fmt::Debug for StandardCauseProcessor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardCauseProcessor")
            .field("has_source", &self.source.is_some())
            .finish_non_exhaustive()
    }
}

/// Derives the whole entry from the cause in one function
pub struct GeneratedProcessor<F: ?Sized>(Box<dyn Fn(&Cause<'_, F>) -> ErrorEntry + Send + Sync>);

impl<F: ?Sized> GeneratedProcessor<F> {
    pub fn new(generator: impl Fn(&Cause<'_, F>) -> ErrorEntry + Send + Sync + 'static) -> Self {
        Self(Box::new(generator))
    }
}

impl<F: ?Sized> CauseProcessor<F> for GeneratedProcessor<F> {
    fn process(&self, cause: &Cause<'_, F>) -> Result<ErrorEntry, GenerationError> {
        Ok((self.0)(cause))
    }
}

/// Reads code and message from a fault that describes itself
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfDescribedProcessor;

impl<F: HttpError + ?Sized> CauseProcessor<F> for SelfDescribedProcessor {
    fn process(&self, cause: &Cause<'_, F>) -> Result<ErrorEntry, GenerationError> {
        Ok(cause.context().error_entry())
    }
}

/// Processor slot of a rule
pub enum ProcessorConfig<F: ?Sized> {
    Standard(StandardProcessorConfig<F>),
    Custom(Box<dyn CauseProcessor<F>>),
}

impl<F: ?Sized + 'static> ProcessorConfig<F> {
    pub(crate) fn build(self, path: &str, problems: &mut Vec<Problem>) -> Option<Box<dyn CauseProcessor<F>>> {
        match self {
            Self::Standard(config) => config
                .build(path, problems)
                .map(|processor| Box::new(processor) as Box<dyn CauseProcessor<F>>),
            Self::Custom(processor) => Some(processor),
        }
    }
}

/// Slots of a [`StandardCauseProcessor`]
///
/// `code` falls back to the cause identifier when unset; `message` is
/// required.
pub struct StandardProcessorConfig<F: ?Sized> {
    pub code: Option<CodeConfig<F>>,
    pub message: Option<MessageConfig<F>>,
    pub invalid_value: Option<Box<SourceFn<F>>>,
}

impl<F: ?Sized + 'static> StandardProcessorConfig<F> {
    pub fn code(&mut self, factory: impl FnOnce(CauseCodeProviders<F>) -> CodeConfig<F>) -> &mut Self {
        self.code = Some(factory(CauseCodeProviders::new()));
        self
    }

    pub fn message(&mut self, factory: impl FnOnce(CauseMessageProviders<F>) -> MessageConfig<F>) -> &mut Self {
        self.message = Some(factory(CauseMessageProviders::new()));
        self
    }

    /// Attach the location of the offending request data to every entry
    pub fn invalid_value(&mut self, source: impl Fn(&Cause<'_, F>) -> Source + Send + Sync + 'static) -> &mut Self {
        self.invalid_value = Some(Box::new(source));
        self
    }

    pub(crate) fn build(self, path: &str, problems: &mut Vec<Problem>) -> Option<StandardCauseProcessor<F>> {
        let code = self.code.unwrap_or(CodeConfig::SameAsCauseId).build(path, problems);

        let message = match self.message {
            Some(message) => message.build(path, problems),
            None => {
                problems.push(Problem::Missing(slot(path, "message")));
                None
            }
        };

        let processor = StandardCauseProcessor::new(code?, message?);
        Some(match self.invalid_value {
            Some(source) => processor.with_source(source),
            None => processor,
        })
    }
}

impl<F: ?Sized> Default for StandardProcessorConfig<F> {
    fn default() -> Self {
        Self {
            code: None,
            message: None,
            invalid_value: None,
        }
    }
}

/// Factory for processor slots
pub struct CauseProcessors<F: ?Sized>(PhantomData<fn(&F)>);

impl<F: ?Sized + 'static> CauseProcessors<F> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    /// Code and message from separate providers
    pub fn standard(&self, init: impl FnOnce(&mut StandardProcessorConfig<F>)) -> ProcessorConfig<F> {
        let mut config = StandardProcessorConfig::default();
        init(&mut config);
        ProcessorConfig::Standard(config)
    }

    /// Whole entry from one function
    pub fn generated_as(
        &self,
        generator: impl Fn(&Cause<'_, F>) -> ErrorEntry + Send + Sync + 'static,
    ) -> ProcessorConfig<F> {
        ProcessorConfig::Custom(Box::new(GeneratedProcessor::new(generator)))
    }

    /// Code and message read from the fault itself
    pub fn self_described(&self) -> ProcessorConfig<F>
    where
        F: HttpError,
    {
        ProcessorConfig::Custom(Box::new(SelfDescribedProcessor))
    }

    pub fn custom(&self, processor: impl CauseProcessor<F> + 'static) -> ProcessorConfig<F> {
        ProcessorConfig::Custom(Box::new(processor))
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("card declined")]
    struct Declined;

    impl HttpError for Declined {
        fn status_code(&self) -> StatusCode {
            StatusCode::PAYMENT_REQUIRED
        }

        fn error_type(&self) -> &str {
            "payment_error"
        }

        fn client_message(&self) -> String {
            "your card was declined".to_owned()
        }
    }

    fn build(config: ProcessorConfig<str>) -> Result<Box<dyn CauseProcessor<str>>, Vec<Problem>> {
        let mut problems = Vec::new();
        config.build("rule", &mut problems).ok_or(problems)
    }

    #[test]
    fn code_defaults_to_cause_id() {
        let processor = build(CauseProcessors::new().standard(|standard| {
            standard.message(|messages| messages.fixed("boom"));
        }))
        .unwrap();

        let entry = processor.process(&Cause::new("RUNTIME_ERR", "ignored")).unwrap();

        assert_eq!(entry, ErrorEntry::new("RUNTIME_ERR", "boom"));
    }

    #[test]
    fn message_is_required() {
        let Err(problems) = build(CauseProcessors::new().standard(|standard| {
            standard.code(|codes| codes.fixed("X"));
        })) else {
            panic!("processor without a message should not build");
        };

        assert_eq!(problems, [Problem::Missing("rule.message".to_owned())]);
    }

    #[test]
    fn reports_every_missing_slot() {
        let Err(problems) = build(CauseProcessors::new().standard(|standard| {
            standard.code(|codes| codes.map_based::<&str, &str>([]));
        })) else {
            panic!("processor with an empty code map should not build");
        };

        assert_eq!(
            problems,
            [
                Problem::EmptyMapping("rule.code".to_owned()),
                Problem::Missing("rule.message".to_owned()),
            ]
        );
    }

    #[test]
    fn invalid_value_attaches_source() {
        let processor = build(CauseProcessors::new().standard(|standard| {
            standard
                .code(|codes| codes.fixed("INVALID_PARAMETER"))
                .message(|messages| messages.generated_as(|cause| format!("invalid value: {}", cause.context())))
                .invalid_value(|_| Source::query("limit"));
        }))
        .unwrap();

        let entry = processor.process(&Cause::new("BAD_LIMIT", "-1")).unwrap();

        assert_eq!(
            entry,
            ErrorEntry::new("INVALID_PARAMETER", "invalid value: -1").with_source(Source::query("limit"))
        );
    }

    #[test]
    fn blank_source_location_fails() {
        let processor = build(CauseProcessors::new().standard(|standard| {
            standard
                .message(|messages| messages.fixed("bad header"))
                .invalid_value(|_| Source::header(" "));
        }))
        .unwrap();

        let err = processor.process(&Cause::new("BAD_HEADER", "")).unwrap_err();

        assert!(matches!(err, GenerationError::InvalidSource { ref cause_id } if cause_id == "BAD_HEADER"));
    }

    #[test]
    fn generated_processor_derives_entry_jointly() {
        let processor = build(
            CauseProcessors::new().generated_as(|cause| ErrorEntry::new(cause.id().to_lowercase(), cause.context())),
        )
        .unwrap();

        let entry = processor.process(&Cause::new("NOT_FOUND", "no such order")).unwrap();

        assert_eq!(entry, ErrorEntry::new("not_found", "no such order"));
    }

    #[test]
    fn self_described_reads_fault() {
        let processor = SelfDescribedProcessor;
        let entry = CauseProcessor::<Declined>::process(&processor, &Cause::new("payment_error", &Declined)).unwrap();

        assert_eq!(entry, ErrorEntry::new("payment_error", "your card was declined"));
    }
}
