use std::fmt;

use faultmap_core::{ErrorResponse, Translator};

use crate::error::{ConfigurationError, GenerationError, Problem};
use crate::payload::{PayloadConfig, PayloadGenerator, PayloadGenerators};
use crate::status::{StatusConfig, StatusProvider, StatusProviders};

/// Answers faults of type `F` with an [`ErrorResponse`]
///
/// Immutable once built and safe to share between threads.
pub struct ResponseGenerator<F: ?Sized> {
    payload: Box<dyn PayloadGenerator<F>>,
    status: Box<dyn StatusProvider<F>>,
    translator: Option<Box<dyn Translator>>,
}

impl<F: ?Sized> ResponseGenerator<F> {
    pub fn new(payload: Box<dyn PayloadGenerator<F>>, status: Box<dyn StatusProvider<F>>) -> Self {
        Self {
            payload,
            status,
            translator: None,
        }
    }

    /// Render messages through `translator` in [`Self::respond_to_in`]
    #[must_use]
    pub fn translated_by(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Some(Box::new(translator));
        self
    }

    /// Build the response answering `fault`
    ///
    /// Calling it twice with the same fault yields equal responses.
    pub fn respond_to(&self, fault: &F) -> Result<ErrorResponse, GenerationError> {
        let payload = self.payload.generate(fault)?;
        let status = self.status.status_for(fault)?;

        tracing::debug!(
            status = status.as_u16(),
            entries = payload.entries().len(),
            "generated error response"
        );

        Ok(ErrorResponse::new(status, payload))
    }

    /// Build the response answering `fault` with messages rendered in `locale`
    ///
    /// Without a translator the messages are returned as generated.
    pub fn respond_to_in(&self, fault: &F, locale: &str) -> Result<ErrorResponse, GenerationError> {
        let response = self.respond_to(fault)?;

        match &self.translator {
            Some(translator) => Ok(response.localized(translator.as_ref(), locale)?),
            None => Ok(response),
        }
    }
}

impl<F: ?Sized + 'static> ResponseGenerator<F> {
    /// Build from a fully assembled configuration
    pub fn build_from(config: ResponseGeneratorConfig<F>) -> Result<Self, ConfigurationError> {
        config.build()
    }

    /// Build from a configurator closure
    pub fn configure(init: impl FnOnce(&mut ResponseGeneratorConfig<F>)) -> Result<Self, ConfigurationError> {
        let mut config = ResponseGeneratorConfig::default();
        init(&mut config);
        config.build()
    }
}

impl<F: ?Sized> fmt::Debug for ResponseGenerator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseGenerator")
            .field("translated", &self.translator.is_some())
            .finish_non_exhaustive()
    }
}

/// Slots of a [`ResponseGenerator`]
///
/// `payload` and `status` are required, `translator` is optional. Fill them
/// as named fields or through the configurators; either way [`Self::build`]
/// reports every missing or invalid slot at once.
pub struct ResponseGeneratorConfig<F: ?Sized> {
    pub payload: Option<PayloadConfig<F>>,
    pub status: Option<StatusConfig<F>>,
    pub translator: Option<Box<dyn Translator>>,
}

impl<F: ?Sized + 'static> ResponseGeneratorConfig<F> {
    pub fn payload(&mut self, factory: impl FnOnce(PayloadGenerators<F>) -> PayloadConfig<F>) -> &mut Self {
        self.payload = Some(factory(PayloadGenerators::new()));
        self
    }

    pub fn status(&mut self, factory: impl FnOnce(StatusProviders<F>) -> StatusConfig<F>) -> &mut Self {
        self.status = Some(factory(StatusProviders::new()));
        self
    }

    pub fn translated_by(&mut self, translator: impl Translator + 'static) -> &mut Self {
        self.translator = Some(Box::new(translator));
        self
    }

    pub fn build(self) -> Result<ResponseGenerator<F>, ConfigurationError> {
        let mut problems = Vec::new();

        let payload = match self.payload {
            Some(payload) => payload.build("payload", &mut problems),
            None => {
                problems.push(Problem::Missing("payload".to_owned()));
                None
            }
        };

        let status = match self.status {
            Some(status) => status.build("status", &mut problems),
            None => {
                problems.push(Problem::Missing("status".to_owned()));
                None
            }
        };

        match (payload, status) {
            (Some(payload), Some(status)) if problems.is_empty() => Ok(ResponseGenerator {
                payload,
                status,
                translator: self.translator,
            }),
            _ => Err(ConfigurationError::new(problems)),
        }
    }
}

impl<F: ?Sized> Default for ResponseGeneratorConfig<F> {
    fn default() -> Self {
        Self {
            payload: None,
            status: None,
            translator: None,
        }
    }
}
