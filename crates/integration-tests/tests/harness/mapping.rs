//! Programmatic mapping tables for integration tests

use faultmap::{CauseMapping, MappingConfig};

/// Builder for constructing test mapping tables
pub struct MappingBuilder {
    config: MappingConfig,
}

impl MappingBuilder {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            config: MappingConfig::default(),
        }
    }

    /// Map a cause, keeping its identifier as the code
    pub fn with_cause(mut self, id: &str, status: u16, message: &str) -> Self {
        self.config.causes.insert(
            id.to_owned(),
            CauseMapping {
                status,
                code: None,
                message: message.to_owned(),
            },
        );
        self
    }

    /// Map a cause under an explicit code
    pub fn with_coded_cause(mut self, id: &str, status: u16, code: &str, message: &str) -> Self {
        self.config.causes.insert(
            id.to_owned(),
            CauseMapping {
                status,
                code: Some(code.to_owned()),
                message: message.to_owned(),
            },
        );
        self
    }

    /// Answer unmapped causes
    pub fn with_fallback(mut self, status: u16, code: &str, message: &str) -> Self {
        self.config.fallback = Some(CauseMapping {
            status,
            code: Some(code.to_owned()),
            message: message.to_owned(),
        });
        self
    }

    /// Validate and return the table
    pub fn build(self) -> MappingConfig {
        self.config.validate().unwrap();
        self.config
    }
}
