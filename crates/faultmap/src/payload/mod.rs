//! Payload generation: ordered rules, first match wins

mod multi;

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use faultmap_core::{ErrorEntry, ErrorPayload, HttpError};

pub use self::multi::{MultiErrorConfig, MultiErrorPayloadGenerator};
use crate::error::{GenerationError, Problem, slot};
use crate::processor::{CauseProcessor, CauseProcessors, ProcessorConfig};
use crate::resolver::{CauseResolver, CauseResolvers};

/// Produces the payload answering a fault
pub trait PayloadGenerator<F: ?Sized>: Send + Sync {
    fn generate(&self, fault: &F) -> Result<ErrorPayload, GenerationError>;
}

/// A resolver paired with the processor for the causes it resolves
pub struct Rule<F: ?Sized> {
    resolver: Box<dyn CauseResolver<F>>,
    processor: Box<dyn CauseProcessor<F>>,
}

impl<F: ?Sized> Rule<F> {
    pub fn new(resolver: Box<dyn CauseResolver<F>>, processor: Box<dyn CauseProcessor<F>>) -> Self {
        Self { resolver, processor }
    }
}

/// Answers with exactly one entry, from the first rule that applies
pub struct SingleErrorPayloadGenerator<F: ?Sized> {
    rules: Vec<Rule<F>>,
}

impl<F: ?Sized> SingleErrorPayloadGenerator<F> {
    pub fn new(rules: Vec<Rule<F>>) -> Self {
        Self { rules }
    }

    /// Entry for the fault from the first rule whose resolver applies
    ///
    /// Fails with [`GenerationError::UnresolvedCause`] when none does,
    /// including when no rules are configured.
    pub fn entry_for(&self, fault: &F) -> Result<ErrorEntry, GenerationError> {
        for (index, rule) in self.rules.iter().enumerate() {
            if let Some(cause) = rule.resolver.resolve(fault) {
                tracing::debug!(rule = index, cause = cause.id(), "cause resolved");
                return rule.processor.process(&cause);
            }
        }

        tracing::warn!(
            fault_type = type_name::<F>(),
            rules = self.rules.len(),
            "no cause resolver matched fault"
        );

        Err(GenerationError::UnresolvedCause {
            fault_type: type_name::<F>(),
        })
    }
}

impl<F: ?Sized> PayloadGenerator<F> for SingleErrorPayloadGenerator<F> {
    fn generate(&self, fault: &F) -> Result<ErrorPayload, GenerationError> {
        self.entry_for(fault).map(ErrorPayload::Single)
    }
}

impl<F: ?Sized> fmt::Debug for SingleErrorPayloadGenerator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleErrorPayloadGenerator")
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Multi-error slot, erased over its sub-error type
pub trait ErasedPayloadConfig<F: ?Sized> {
    fn build(self: Box<Self>, path: &str, problems: &mut Vec<Problem>) -> Option<Box<dyn PayloadGenerator<F>>>;
}

/// Payload slot of a response generator
pub enum PayloadConfig<F: ?Sized> {
    Single(SingleErrorConfig<F>),
    Multi(Box<dyn ErasedPayloadConfig<F>>),
    Custom(Box<dyn PayloadGenerator<F>>),
}

impl<F: ?Sized + 'static> PayloadConfig<F> {
    pub(crate) fn build(self, path: &str, problems: &mut Vec<Problem>) -> Option<Box<dyn PayloadGenerator<F>>> {
        match self {
            Self::Single(config) => config
                .build(path, problems)
                .map(|generator| Box::new(generator) as Box<dyn PayloadGenerator<F>>),
            Self::Multi(config) => config.build(path, problems),
            Self::Custom(generator) => Some(generator),
        }
    }
}

impl<F: ?Sized> From<SingleErrorConfig<F>> for PayloadConfig<F> {
    fn from(config: SingleErrorConfig<F>) -> Self {
        Self::Single(config)
    }
}

/// Ordered rules of a single-error generator
pub struct SingleErrorConfig<F: ?Sized> {
    pub rules: Vec<RuleConfig<F>>,
}

impl<F: ?Sized + 'static> SingleErrorConfig<F> {
    /// Append a rule; earlier rules take precedence
    pub fn rule(&mut self, init: impl FnOnce(&mut RuleConfig<F>)) -> &mut Self {
        let mut rule = RuleConfig::default();
        init(&mut rule);
        self.rules.push(rule);
        self
    }

    pub(crate) fn build(self, path: &str, problems: &mut Vec<Problem>) -> Option<SingleErrorPayloadGenerator<F>> {
        if self.rules.is_empty() {
            problems.push(Problem::Missing(slot(path, "rules")));
            return None;
        }

        let rules: Vec<_> = self
            .rules
            .into_iter()
            .enumerate()
            .map(|(index, rule)| rule.build(&slot(path, &format!("rules[{index}]")), problems))
            .collect();

        rules
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .map(SingleErrorPayloadGenerator::new)
    }
}

impl<F: ?Sized> Default for SingleErrorConfig<F> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

/// Slots of one rule
pub struct RuleConfig<F: ?Sized> {
    pub identified_by: Option<Box<dyn CauseResolver<F>>>,
    pub processed_by: Option<ProcessorConfig<F>>,
}

impl<F: ?Sized + 'static> RuleConfig<F> {
    pub fn identified_by<R>(&mut self, factory: impl FnOnce(CauseResolvers<F>) -> R) -> &mut Self
    where
        R: CauseResolver<F> + 'static,
    {
        self.identified_by = Some(Box::new(factory(CauseResolvers::new())));
        self
    }

    pub fn processed_by(&mut self, factory: impl FnOnce(CauseProcessors<F>) -> ProcessorConfig<F>) -> &mut Self {
        self.processed_by = Some(factory(CauseProcessors::new()));
        self
    }

    fn build(self, path: &str, problems: &mut Vec<Problem>) -> Option<Rule<F>> {
        if self.identified_by.is_none() {
            problems.push(Problem::Missing(slot(path, "identified_by")));
        }

        let processor = match self.processed_by {
            Some(processor) => processor.build(&slot(path, "processed_by"), problems),
            None => {
                problems.push(Problem::Missing(slot(path, "processed_by")));
                None
            }
        };

        Some(Rule::new(self.identified_by?, processor?))
    }
}

impl<F: ?Sized> Default for RuleConfig<F> {
    fn default() -> Self {
        Self {
            identified_by: None,
            processed_by: None,
        }
    }
}

/// Factory for payload slots
pub struct PayloadGenerators<F: ?Sized>(PhantomData<fn(&F)>);

impl<F: ?Sized + 'static> PayloadGenerators<F> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    /// One entry, from a single rule
    pub fn error(&self, init: impl FnOnce(&mut RuleConfig<F>)) -> PayloadConfig<F> {
        let mut config = SingleErrorConfig::default();
        config.rule(init);
        PayloadConfig::Single(config)
    }

    /// One entry, from the first of several rules that applies
    pub fn errors(&self, init: impl FnOnce(&mut SingleErrorConfig<F>)) -> PayloadConfig<F> {
        let mut config = SingleErrorConfig::default();
        init(&mut config);
        PayloadConfig::Single(config)
    }

    /// One entry per sub-error extracted from the fault
    pub fn sub_errors<S>(&self, init: impl FnOnce(&mut MultiErrorConfig<F, S>)) -> PayloadConfig<F>
    where
        S: ?Sized + 'static,
    {
        let mut config = MultiErrorConfig::default();
        init(&mut config);
        config.into()
    }

    /// One entry read from a fault that describes itself
    pub fn self_described(&self) -> PayloadConfig<F>
    where
        F: HttpError,
    {
        self.error(|rule| {
            rule.identified_by(|resolvers| resolvers.function(|fault: &F| fault.error_type().to_owned()))
                .processed_by(|processors| processors.self_described());
        })
    }

    pub fn custom(&self, generator: impl PayloadGenerator<F> + 'static) -> PayloadConfig<F> {
        PayloadConfig::Custom(Box::new(generator))
    }
}
