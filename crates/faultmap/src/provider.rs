//! Code and message providers

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use faultmap_core::Cause;

use crate::error::{BoxError, GenerationError, MappingKind, Problem, slot};

/// Derives the error code for a cause
pub trait CauseCodeProvider<F: ?Sized>: Send + Sync {
    fn code_for(&self, cause: &Cause<'_, F>) -> Result<String, GenerationError>;
}

/// Derives the error message for a cause
pub trait CauseMessageProvider<F: ?Sized>: Send + Sync {
    fn message_for(&self, cause: &Cause<'_, F>) -> Result<String, GenerationError>;
}

type GeneratorFn<F> = dyn Fn(&Cause<'_, F>) -> Result<String, GenerationError> + Send + Sync;

/// Uses the cause identifier as the code
#[derive(Debug, Clone, Copy, Default)]
pub struct SameAsCauseId;

impl<F: ?Sized> CauseCodeProvider<F> for SameAsCauseId {
    fn code_for(&self, cause: &Cause<'_, F>) -> Result<String, GenerationError> {
        Ok(cause.id().to_owned())
    }
}

/// Always yields the same text
#[derive(Debug, Clone)]
pub struct Fixed(String);

impl Fixed {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl<F: ?Sized> CauseCodeProvider<F> for Fixed {
    fn code_for(&self, _: &Cause<'_, F>) -> Result<String, GenerationError> {
        Ok(self.0.clone())
    }
}

impl<F: ?Sized> CauseMessageProvider<F> for Fixed {
    fn message_for(&self, _: &Cause<'_, F>) -> Result<String, GenerationError> {
        Ok(self.0.clone())
    }
}

/// Looks the text up by cause identifier
///
/// An identifier without an entry fails with
/// [`GenerationError::MissingMapping`].
#[derive(Debug, Clone)]
pub struct MapBased {
    kind: MappingKind,
    entries: HashMap<String, String>,
}

impl MapBased {
    pub fn new(kind: MappingKind, entries: HashMap<String, String>) -> Self {
        Self { kind, entries }
    }

    fn lookup<F: ?Sized>(&self, cause: &Cause<'_, F>) -> Result<String, GenerationError> {
        self.entries
            .get(cause.id())
            .cloned()
            .ok_or_else(|| GenerationError::MissingMapping {
                kind: self.kind,
                cause_id: cause.id().to_owned(),
            })
    }
}

impl<F: ?Sized> CauseCodeProvider<F> for MapBased {
    fn code_for(&self, cause: &Cause<'_, F>) -> Result<String, GenerationError> {
        self.lookup(cause)
    }
}

impl<F: ?Sized> CauseMessageProvider<F> for MapBased {
    fn message_for(&self, cause: &Cause<'_, F>) -> Result<String, GenerationError> {
        self.lookup(cause)
    }
}

/// Computes the text from the cause
pub struct Generated<F: ?Sized>(Box<GeneratorFn<F>>);

impl<F: ?Sized> Generated<F> {
    pub fn new(generator: impl Fn(&Cause<'_, F>) -> String + Send + Sync + 'static) -> Self {
        Self(Box::new(move |cause: &Cause<'_, F>| Ok(generator(cause))))
    }

    /// Computes the text with a function that may fail
    ///
    /// Its error reaches the caller as [`GenerationError::Provider`].
    pub fn fallible<E>(generator: impl Fn(&Cause<'_, F>) -> Result<String, E> + Send + Sync + 'static) -> Self
    where
        E: Into<BoxError>,
    {
        Self(Box::new(move |cause: &Cause<'_, F>| generator(cause).map_err(GenerationError::provider)))
    }
}

impl<F: ?Sized> CauseCodeProvider<F> for Generated<F> {
    fn code_for(&self, cause: &Cause<'_, F>) -> Result<String, GenerationError> {
        (self.0)(cause)
    }
}

impl<F: ?Sized> CauseMessageProvider<F> for Generated<F> {
    fn message_for(&self, cause: &Cause<'_, F>) -> Result<String, GenerationError> {
        (self.0)(cause)
    }
}

impl<F: ?Sized> fmt::Debug for Generated<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generated").finish_non_exhaustive()
    }
}

/// Code slot of a standard processor
pub enum CodeConfig<F: ?Sized> {
    SameAsCauseId,
    Fixed(String),
    MapBased(HashMap<String, String>),
    Provider(Box<dyn CauseCodeProvider<F>>),
}

impl<F: ?Sized + 'static> CodeConfig<F> {
    pub(crate) fn build(self, path: &str, problems: &mut Vec<Problem>) -> Option<Box<dyn CauseCodeProvider<F>>> {
        match self {
            Self::SameAsCauseId => Some(Box::new(SameAsCauseId)),
            Self::Fixed(code) => Some(Box::new(Fixed::new(code))),
            Self::MapBased(entries) if entries.is_empty() => {
                problems.push(Problem::EmptyMapping(slot(path, "code")));
                None
            }
            Self::MapBased(entries) => Some(Box::new(MapBased::new(MappingKind::Code, entries))),
            Self::Provider(provider) => Some(provider),
        }
    }
}

/// Message slot of a standard processor
pub enum MessageConfig<F: ?Sized> {
    Fixed(String),
    MapBased(HashMap<String, String>),
    Provider(Box<dyn CauseMessageProvider<F>>),
}

impl<F: ?Sized + 'static> MessageConfig<F> {
    pub(crate) fn build(self, path: &str, problems: &mut Vec<Problem>) -> Option<Box<dyn CauseMessageProvider<F>>> {
        match self {
            Self::Fixed(message) => Some(Box::new(Fixed::new(message))),
            Self::MapBased(entries) if entries.is_empty() => {
                problems.push(Problem::EmptyMapping(slot(path, "message")));
                None
            }
            Self::MapBased(entries) => Some(Box::new(MapBased::new(MappingKind::Message, entries))),
            Self::Provider(provider) => Some(provider),
        }
    }
}

/// Factory for code slots
pub struct CauseCodeProviders<F: ?Sized>(PhantomData<fn(&F)>);

impl<F: ?Sized + 'static> CauseCodeProviders<F> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    pub fn same_as_cause_id(&self) -> CodeConfig<F> {
        CodeConfig::SameAsCauseId
    }

    pub fn fixed(&self, code: impl Into<String>) -> CodeConfig<F> {
        CodeConfig::Fixed(code.into())
    }

    /// Codes keyed by cause identifier
    pub fn map_based<K, V>(&self, entries: impl IntoIterator<Item = (K, V)>) -> CodeConfig<F>
    where
        K: Into<String>,
        V: Into<String>,
    {
        CodeConfig::MapBased(collect_entries(entries))
    }

    pub fn generated_as(&self, generator: impl Fn(&Cause<'_, F>) -> String + Send + Sync + 'static) -> CodeConfig<F> {
        CodeConfig::Provider(Box::new(Generated::new(generator)))
    }

    pub fn try_generated_as<E>(
        &self,
        generator: impl Fn(&Cause<'_, F>) -> Result<String, E> + Send + Sync + 'static,
    ) -> CodeConfig<F>
    where
        E: Into<BoxError>,
    {
        CodeConfig::Provider(Box::new(Generated::fallible(generator)))
    }

    pub fn custom(&self, provider: impl CauseCodeProvider<F> + 'static) -> CodeConfig<F> {
        CodeConfig::Provider(Box::new(provider))
    }
}

/// Factory for message slots
pub struct CauseMessageProviders<F: ?Sized>(PhantomData<fn(&F)>);

impl<F: ?Sized + 'static> CauseMessageProviders<F> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    pub fn fixed(&self, message: impl Into<String>) -> MessageConfig<F> {
        MessageConfig::Fixed(message.into())
    }

    /// Messages keyed by cause identifier
    pub fn map_based<K, V>(&self, entries: impl IntoIterator<Item = (K, V)>) -> MessageConfig<F>
    where
        K: Into<String>,
        V: Into<String>,
    {
        MessageConfig::MapBased(collect_entries(entries))
    }

    pub fn generated_as(
        &self,
        generator: impl Fn(&Cause<'_, F>) -> String + Send + Sync + 'static,
    ) -> MessageConfig<F> {
        MessageConfig::Provider(Box::new(Generated::new(generator)))
    }

    pub fn try_generated_as<E>(
        &self,
        generator: impl Fn(&Cause<'_, F>) -> Result<String, E> + Send + Sync + 'static,
    ) -> MessageConfig<F>
    where
        E: Into<BoxError>,
    {
        MessageConfig::Provider(Box::new(Generated::fallible(generator)))
    }

    pub fn custom(&self, provider: impl CauseMessageProvider<F> + 'static) -> MessageConfig<F> {
        MessageConfig::Provider(Box::new(provider))
    }
}

fn collect_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> HashMap<String, String>
where
    K: Into<String>,
    V: Into<String>,
{
    entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("translation catalog unavailable")]
    struct CatalogUnavailable;

    fn build_code(config: CodeConfig<str>) -> Box<dyn CauseCodeProvider<str>> {
        let mut problems = Vec::new();
        let provider = config.build("payload", &mut problems).unwrap();
        assert!(problems.is_empty());
        provider
    }

    fn build_message(config: MessageConfig<str>) -> Box<dyn CauseMessageProvider<str>> {
        let mut problems = Vec::new();
        let provider = config.build("payload", &mut problems).unwrap();
        assert!(problems.is_empty());
        provider
    }

    #[test]
    fn same_as_cause_id() {
        let provider = build_code(CauseCodeProviders::new().same_as_cause_id());
        let cause = Cause::new("TIMEOUT", "upstream timed out");

        assert_eq!(provider.code_for(&cause).unwrap(), "TIMEOUT");
    }

    #[test]
    fn fixed_ignores_cause() {
        let codes = build_code(CauseCodeProviders::new().fixed("INTERNAL"));
        let messages = build_message(CauseMessageProviders::new().fixed("something went wrong"));
        let cause = Cause::new("TIMEOUT", "upstream timed out");

        assert_eq!(codes.code_for(&cause).unwrap(), "INTERNAL");
        assert_eq!(messages.message_for(&cause).unwrap(), "something went wrong");
    }

    #[test]
    fn map_based_looks_up_cause_id() {
        let provider = build_code(CauseCodeProviders::new().map_based([("TIMEOUT", "GATEWAY_TIMEOUT")]));

        let found = provider.code_for(&Cause::new("TIMEOUT", "")).unwrap();
        let missing = provider.code_for(&Cause::new("REFUSED", "")).unwrap_err();

        assert_eq!(found, "GATEWAY_TIMEOUT");
        assert!(matches!(
            missing,
            GenerationError::MissingMapping { kind: MappingKind::Code, ref cause_id } if cause_id == "REFUSED"
        ));
    }

    #[test]
    fn empty_map_is_a_configuration_problem() {
        let mut problems = Vec::new();
        let empty: [(&str, &str); 0] = [];

        let provider = CauseMessageProviders::<str>::new()
            .map_based(empty)
            .build("payload.rules[0].processed_by", &mut problems);

        assert!(provider.is_none());
        assert_eq!(
            problems,
            [Problem::EmptyMapping("payload.rules[0].processed_by.message".to_owned())]
        );
    }

    #[test]
    fn generated_from_context() {
        let provider = build_message(
            CauseMessageProviders::new().generated_as(|cause: &Cause<'_, str>| cause.context().to_uppercase()),
        );

        assert_eq!(provider.message_for(&Cause::new("ANY", "boom")).unwrap(), "BOOM");
    }

    #[test]
    fn fallible_generator_error_passes_through() {
        let provider = build_message(CauseMessageProviders::new().try_generated_as(|_| Err(CatalogUnavailable)));

        let err = provider.message_for(&Cause::new("ANY", "boom")).unwrap_err();

        let GenerationError::Provider(inner) = err else {
            unreachable!("expected provider error");
        };
        assert!(inner.downcast_ref::<CatalogUnavailable>().is_some());
    }
}
