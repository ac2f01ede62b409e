//! Fault mapping tables read from TOML
//!
//! A mapping table lists cause identifiers with the code, message and
//! status their responses should carry, plus an optional fallback for
//! identifiers the table does not name.

#![allow(clippy::must_use_candidate)]

mod loader;

use indexmap::IndexMap;
use serde::Deserialize;

/// Top-level mapping table
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingConfig {
    /// Mapping for causes absent from `causes`
    #[serde(default)]
    pub fallback: Option<CauseMapping>,
    /// Mappings keyed by cause identifier, in declaration order
    #[serde(default)]
    pub causes: IndexMap<String, CauseMapping>,
}

/// How a single cause is answered
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CauseMapping {
    /// HTTP status
    #[serde(default = "default_status")]
    pub status: u16,
    /// Error code; the cause identifier when absent
    #[serde(default)]
    pub code: Option<String>,
    /// Client-facing message
    pub message: String,
}

const fn default_status() -> u16 {
    500
}
