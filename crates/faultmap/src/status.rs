//! Status providers

use std::fmt;
use std::marker::PhantomData;

use faultmap_core::{HttpError, HttpStatus};

use crate::error::{GenerationError, Problem};

/// Chooses the HTTP status answering a fault
pub trait StatusProvider<F: ?Sized>: Send + Sync {
    fn status_for(&self, fault: &F) -> Result<HttpStatus, GenerationError>;
}

/// Same status for every fault
#[derive(Debug, Clone, Copy)]
pub struct ConstantStatus(HttpStatus);

impl ConstantStatus {
    pub const fn new(status: HttpStatus) -> Self {
        Self(status)
    }
}

impl<F: ?Sized> StatusProvider<F> for ConstantStatus {
    fn status_for(&self, _: &F) -> Result<HttpStatus, GenerationError> {
        Ok(self.0)
    }
}

type StatusFn<F> = dyn Fn(&F) -> u16 + Send + Sync;

/// Status computed from the fault, checked on every call
pub struct DerivedStatus<F: ?Sized>(Box<StatusFn<F>>);

impl<F: ?Sized> DerivedStatus<F> {
    pub fn new(derive: impl Fn(&F) -> u16 + Send + Sync + 'static) -> Self {
        Self(Box::new(derive))
    }
}

impl<F: ?Sized> StatusProvider<F> for DerivedStatus<F> {
    fn status_for(&self, fault: &F) -> Result<HttpStatus, GenerationError> {
        Ok(HttpStatus::new((self.0)(fault))?)
    }
}

impl<F: ?Sized> fmt::Debug for DerivedStatus<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedStatus").finish_non_exhaustive()
    }
}

/// Status read from a fault that describes itself
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfDescribedStatus;

impl<F: HttpError + ?Sized> StatusProvider<F> for SelfDescribedStatus {
    fn status_for(&self, fault: &F) -> Result<HttpStatus, GenerationError> {
        Ok(HttpStatus::try_from(fault.status_code())?)
    }
}

/// Status slot of a response generator
pub enum StatusConfig<F: ?Sized> {
    Constant(u16),
    Derived(Box<StatusFn<F>>),
    Provider(Box<dyn StatusProvider<F>>),
}

impl<F: ?Sized + 'static> StatusConfig<F> {
    pub(crate) fn build(self, path: &str, problems: &mut Vec<Problem>) -> Option<Box<dyn StatusProvider<F>>> {
        match self {
            Self::Constant(code) => match HttpStatus::new(code) {
                Ok(status) => Some(Box::new(ConstantStatus::new(status))),
                Err(_) => {
                    problems.push(Problem::InvalidStatus {
                        slot: path.to_owned(),
                        code,
                    });
                    None
                }
            },
            Self::Derived(derive) => Some(Box::new(DerivedStatus(derive))),
            Self::Provider(provider) => Some(provider),
        }
    }
}

/// Factory for status slots
pub struct StatusProviders<F: ?Sized>(PhantomData<fn(&F)>);

impl<F: ?Sized + 'static> StatusProviders<F> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    /// Constant status, checked when the generator is built
    pub fn of(&self, code: u16) -> StatusConfig<F> {
        StatusConfig::Constant(code)
    }

    /// Status computed from the fault
    pub fn derived(&self, derive: impl Fn(&F) -> u16 + Send + Sync + 'static) -> StatusConfig<F> {
        StatusConfig::Derived(Box::new(derive))
    }

    pub fn self_described(&self) -> StatusConfig<F>
    where
        F: HttpError,
    {
        StatusConfig::Provider(Box::new(SelfDescribedStatus))
    }

    pub fn custom(&self, provider: impl StatusProvider<F> + 'static) -> StatusConfig<F> {
        StatusConfig::Provider(Box::new(provider))
    }
}

#[cfg(test)]
mod tests {
    use faultmap_core::InvalidStatus;

    use super::*;

    #[derive(Debug)]
    struct Upstream {
        status: u16,
    }

    fn build(config: StatusConfig<Upstream>) -> Result<Box<dyn StatusProvider<Upstream>>, Vec<Problem>> {
        let mut problems = Vec::new();
        config.build("status", &mut problems).ok_or(problems)
    }

    #[test]
    fn constant_status() {
        let provider = build(StatusProviders::new().of(503)).unwrap();

        assert_eq!(provider.status_for(&Upstream { status: 200 }).unwrap().as_u16(), 503);
    }

    #[test]
    fn constant_status_checked_at_build() {
        let Err(problems) = build(StatusProviders::new().of(700)) else {
            panic!("status 700 should not build");
        };

        assert_eq!(
            problems,
            [Problem::InvalidStatus {
                slot: "status".to_owned(),
                code: 700
            }]
        );
    }

    #[test]
    fn derived_status_checked_per_call() {
        let provider = build(StatusProviders::new().derived(|fault: &Upstream| fault.status)).unwrap();

        assert_eq!(provider.status_for(&Upstream { status: 502 }).unwrap().as_u16(), 502);
        assert!(matches!(
            provider.status_for(&Upstream { status: 42 }),
            Err(GenerationError::InvalidStatus(InvalidStatus(42)))
        ));
    }
}
