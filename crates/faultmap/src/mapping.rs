//! Generators built from mapping tables

use std::any::type_name;
use std::collections::HashMap;

use faultmap_config::{CauseMapping, MappingConfig};
use faultmap_core::{Classified, HttpStatus};

use crate::error::{ConfigurationError, GenerationError};
use crate::payload::RuleConfig;
use crate::response::{ResponseGenerator, ResponseGeneratorConfig};
use crate::status::StatusProvider;

impl<F: Classified + ?Sized + 'static> ResponseGenerator<F> {
    /// Build a generator answering classified faults from a mapping table
    ///
    /// Causes are tried in table order; the fallback, when present, answers
    /// every other cause. Without one, unknown causes are unresolved.
    pub fn from_mapping(mapping: &MappingConfig) -> Result<Self, ConfigurationError> {
        let mut config = ResponseGeneratorConfig::default();

        config.payload(|payloads| {
            payloads.errors(|errors| {
                for (id, cause) in &mapping.causes {
                    errors.rule(|rule| mapped_rule(rule, Some(id), cause));
                }
                if let Some(ref fallback) = mapping.fallback {
                    errors.rule(|rule| mapped_rule(rule, None, fallback));
                }
            })
        });

        let by_cause = mapping
            .causes
            .iter()
            .map(|(id, cause)| (id.clone(), cause.status))
            .collect();
        let fallback = mapping.fallback.as_ref().map(|fallback| fallback.status);
        config.status(|statuses| {
            statuses.custom(MappedStatus {
                by_cause,
                fallback,
            })
        });

        let generator = Self::build_from(config)?;

        tracing::debug!(
            causes = mapping.causes.len(),
            fallback = mapping.fallback.is_some(),
            "built response generator from mapping"
        );

        Ok(generator)
    }
}

fn mapped_rule<F: Classified + ?Sized + 'static>(rule: &mut RuleConfig<F>, id: Option<&String>, mapping: &CauseMapping) {
    match id {
        Some(id) => rule.identified_by(|resolvers| resolvers.classified(id.clone())),
        None => rule.identified_by(|resolvers| resolvers.any()),
    };

    rule.processed_by(|processors| {
        processors.standard(|standard| {
            if let Some(ref code) = mapping.code {
                standard.code(|codes| codes.fixed(code.clone()));
            }
            standard.message(|messages| messages.fixed(mapping.message.clone()));
        })
    });
}

/// Status looked up by cause identifier
struct MappedStatus {
    by_cause: HashMap<String, u16>,
    fallback: Option<u16>,
}

impl<F: Classified + ?Sized> StatusProvider<F> for MappedStatus {
    fn status_for(&self, fault: &F) -> Result<HttpStatus, GenerationError> {
        let id = fault.cause_id();
        let code = self
            .by_cause
            .get(id.as_ref())
            .copied()
            .or(self.fallback)
            .ok_or(GenerationError::UnresolvedCause {
                fault_type: type_name::<F>(),
            })?;

        Ok(HttpStatus::new(code)?)
    }
}
