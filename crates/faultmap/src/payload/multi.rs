use std::any::type_name;
use std::fmt;

use faultmap_core::ErrorPayload;

use super::{ErasedPayloadConfig, PayloadConfig, PayloadGenerator, SingleErrorConfig, SingleErrorPayloadGenerator};
use crate::error::{GenerationError, Problem, slot};

type Extractor<F, S> = dyn for<'a> Fn(&'a F) -> Vec<&'a S> + Send + Sync;

/// Answers with one entry per sub-error, in extraction order
pub struct MultiErrorPayloadGenerator<F: ?Sized, S: ?Sized> {
    extractor: Box<Extractor<F, S>>,
    each: SingleErrorPayloadGenerator<S>,
}

impl<F: ?Sized, S: ?Sized> MultiErrorPayloadGenerator<F, S> {
    pub fn new(
        extractor: impl for<'a> Fn(&'a F) -> Vec<&'a S> + Send + Sync + 'static,
        each: SingleErrorPayloadGenerator<S>,
    ) -> Self {
        Self {
            extractor: Box::new(extractor),
            each,
        }
    }
}

impl<F: ?Sized, S: ?Sized> PayloadGenerator<F> for MultiErrorPayloadGenerator<F, S> {
    fn generate(&self, fault: &F) -> Result<ErrorPayload, GenerationError> {
        let sub_errors = (self.extractor)(fault);
        if sub_errors.is_empty() {
            return Err(GenerationError::NoSubErrors {
                fault_type: type_name::<F>(),
            });
        }

        tracing::debug!(sub_errors = sub_errors.len(), "generating multi-error payload");

        let errors = sub_errors
            .into_iter()
            .map(|sub_error| self.each.entry_for(sub_error))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ErrorPayload::Multi { errors })
    }
}

impl<F: ?Sized, S: ?Sized> fmt::Debug for MultiErrorPayloadGenerator<F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiErrorPayloadGenerator")
            .field("each", &self.each)
            .finish_non_exhaustive()
    }
}

/// Slots of a multi-error generator
pub struct MultiErrorConfig<F: ?Sized, S: ?Sized> {
    pub extracted_as: Option<Box<Extractor<F, S>>>,
    pub each_representing: Option<SingleErrorConfig<S>>,
}

impl<F: ?Sized + 'static, S: ?Sized + 'static> MultiErrorConfig<F, S> {
    /// How sub-errors are pulled out of the fault
    pub fn extracted_as(
        &mut self,
        extractor: impl for<'a> Fn(&'a F) -> Vec<&'a S> + Send + Sync + 'static,
    ) -> &mut Self {
        self.extracted_as = Some(Box::new(extractor));
        self
    }

    /// Rules answering each sub-error
    pub fn each_representing(&mut self, init: impl FnOnce(&mut SingleErrorConfig<S>)) -> &mut Self {
        let mut config = SingleErrorConfig::default();
        init(&mut config);
        self.each_representing = Some(config);
        self
    }
}

impl<F: ?Sized, S: ?Sized> Default for MultiErrorConfig<F, S> {
    fn default() -> Self {
        Self {
            extracted_as: None,
            each_representing: None,
        }
    }
}

impl<F: ?Sized + 'static, S: ?Sized + 'static> ErasedPayloadConfig<F> for MultiErrorConfig<F, S> {
    fn build(self: Box<Self>, path: &str, problems: &mut Vec<Problem>) -> Option<Box<dyn PayloadGenerator<F>>> {
        let Self {
            extracted_as,
            each_representing,
        } = *self;

        if extracted_as.is_none() {
            problems.push(Problem::Missing(slot(path, "extracted_as")));
        }

        let each = match each_representing {
            Some(config) => config.build(&slot(path, "each_representing"), problems),
            None => {
                problems.push(Problem::Missing(slot(path, "each_representing")));
                None
            }
        };

        Some(Box::new(MultiErrorPayloadGenerator {
            extractor: extracted_as?,
            each: each?,
        }))
    }
}

impl<F: ?Sized + 'static, S: ?Sized + 'static> From<MultiErrorConfig<F, S>> for PayloadConfig<F> {
    fn from(config: MultiErrorConfig<F, S>) -> Self {
        Self::Multi(Box::new(config))
    }
}
