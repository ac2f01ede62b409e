//! Routing faults to one of several response generators

use std::any::type_name;
use std::error::Error;
use std::fmt;

use faultmap_core::ErrorResponse;

use crate::error::{ConfigurationError, GenerationError, Problem};
use crate::resolver::Downcast;
use crate::response::ResponseGenerator;

type Route<F> = Box<dyn Fn(&F, Option<&str>) -> Option<Result<ErrorResponse, GenerationError>> + Send + Sync>;

/// Delegates each fault to the first registered generator that accepts it
pub struct CompositeResponseGenerator<F: ?Sized> {
    routes: Vec<Route<F>>,
}

impl<F: ?Sized> CompositeResponseGenerator<F> {
    pub fn respond_to(&self, fault: &F) -> Result<ErrorResponse, GenerationError> {
        self.route(fault, None)
    }

    /// Like [`Self::respond_to`], rendering messages in `locale` where the
    /// chosen generator has a translator
    pub fn respond_to_in(&self, fault: &F, locale: &str) -> Result<ErrorResponse, GenerationError> {
        self.route(fault, Some(locale))
    }

    fn route(&self, fault: &F, locale: Option<&str>) -> Result<ErrorResponse, GenerationError> {
        for (index, route) in self.routes.iter().enumerate() {
            if let Some(response) = route(fault, locale) {
                tracing::debug!(route = index, "fault routed");
                return response;
            }
        }

        tracing::warn!(fault_type = type_name::<F>(), "no response generator registered for fault");

        Err(GenerationError::NoSubGenerator {
            fault_type: type_name::<F>(),
        })
    }
}

impl<F: ?Sized + 'static> CompositeResponseGenerator<F> {
    pub fn build_from(config: CompositeConfig<F>) -> Result<Self, ConfigurationError> {
        if config.routes.is_empty() {
            return Err(ConfigurationError::new(vec![Problem::NoRoutes("composite".to_owned())]));
        }

        Ok(Self { routes: config.routes })
    }

    pub fn configure(init: impl FnOnce(&mut CompositeConfig<F>)) -> Result<Self, ConfigurationError> {
        let mut config = CompositeConfig::default();
        init(&mut config);
        Self::build_from(config)
    }
}

impl<F: ?Sized> fmt::Debug for CompositeResponseGenerator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeResponseGenerator")
            .field("routes", &self.routes.len())
            .finish()
    }
}

/// Ordered routes of a [`CompositeResponseGenerator`]
pub struct CompositeConfig<F: ?Sized> {
    routes: Vec<Route<F>>,
}

impl<F: ?Sized + 'static> CompositeConfig<F> {
    /// Route faults whose concrete error type is `T`
    pub fn register<T>(&mut self, generator: ResponseGenerator<T>) -> &mut Self
    where
        F: Downcast,
        T: Error + Send + Sync + 'static,
    {
        self.routes.push(Box::new(move |fault: &F, locale: Option<&str>| {
            fault.downcast_ref::<T>().map(|inner| respond(&generator, inner, locale))
        }));
        self
    }

    /// Route faults satisfying `predicate`
    pub fn when(
        &mut self,
        predicate: impl Fn(&F) -> bool + Send + Sync + 'static,
        generator: ResponseGenerator<F>,
    ) -> &mut Self {
        self.routes.push(Box::new(move |fault: &F, locale: Option<&str>| {
            predicate(fault).then(|| respond(&generator, fault, locale))
        }));
        self
    }

    /// Route every fault no earlier route accepted
    pub fn otherwise(&mut self, generator: ResponseGenerator<F>) -> &mut Self {
        self.routes.push(Box::new(move |fault: &F, locale: Option<&str>| {
            Some(respond(&generator, fault, locale))
        }));
        self
    }
}

fn respond<T: ?Sized>(
    generator: &ResponseGenerator<T>,
    fault: &T,
    locale: Option<&str>,
) -> Result<ErrorResponse, GenerationError> {
    match locale {
        Some(locale) => generator.respond_to_in(fault, locale),
        None => generator.respond_to(fault),
    }
}

impl<F: ?Sized> Default for CompositeConfig<F> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}
