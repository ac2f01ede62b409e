use std::path::Path;

use faultmap_core::HttpStatus;

use crate::{CauseMapping, MappingConfig};

impl MappingConfig {
    /// Load a mapping table from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, TOML parsing fails, or
    /// validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read mapping file {}: {e}", path.display()))?;

        let config = Self::from_toml(&raw)?;

        tracing::info!(
            path = %path.display(),
            causes = config.causes.len(),
            fallback = config.fallback.is_some(),
            "loaded fault mapping"
        );

        Ok(config)
    }

    /// Parse and validate a mapping table
    ///
    /// # Errors
    ///
    /// Returns an error if TOML parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| anyhow::anyhow!("failed to parse mapping: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that every mapping can produce a response
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty or an entry carries an
    /// out-of-range status or blank text
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.causes.is_empty() && self.fallback.is_none() {
            anyhow::bail!("mapping must declare at least one cause or a fallback");
        }

        for (id, mapping) in &self.causes {
            if id.trim().is_empty() {
                anyhow::bail!("cause identifiers must not be blank");
            }
            validate_mapping(&format!("causes.{id}"), mapping)?;
        }

        if let Some(ref fallback) = self.fallback {
            validate_mapping("fallback", fallback)?;
        }

        Ok(())
    }
}

fn validate_mapping(name: &str, mapping: &CauseMapping) -> anyhow::Result<()> {
    HttpStatus::new(mapping.status).map_err(|e| anyhow::anyhow!("{name}: {e}"))?;

    if mapping.message.trim().is_empty() {
        anyhow::bail!("{name}.message must not be empty");
    }

    if let Some(ref code) = mapping.code
        && code.trim().is_empty()
    {
        anyhow::bail!("{name}.code must not be empty when set");
    }

    Ok(())
}
