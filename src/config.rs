//! Source configuration
//!
//! The connector takes exactly one user option, the Stripe secret key. The
//! option schema is exposed so hosts can render a credential form.

use crate::error::{Error, Result, ResultExt};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Name of the only configuration option
pub const API_KEY_FIELD: &str = "api_key";

/// Number of leading key characters kept when the key is shown
const REDACTED_PREFIX_LEN: usize = 5;

/// Runtime configuration for a connector run
#[derive(Clone, Deserialize)]
pub struct SourceConfig {
    /// Stripe secret key (sk_live_... or sk_test_...)
    #[serde(default)]
    pub api_key: String,
}

impl SourceConfig {
    /// Create a config from an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Build a config from a JSON object, rejecting a missing or empty key
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        let config: SourceConfig = serde_json::from_value(value.clone())
            .map_err(|e| Error::config(format!("Invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Load a config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Ensure required options are present
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field(API_KEY_FIELD));
        }
        Ok(())
    }

    /// First characters of the key followed by an ellipsis
    pub fn redacted_key(&self) -> String {
        let prefix: String = self.api_key.chars().take(REDACTED_PREFIX_LEN).collect();
        format!("{prefix}...")
    }
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("api_key", &self.redacted_key())
            .finish()
    }
}

// ============================================================================
// Option schema
// ============================================================================

/// Configuration field definition
#[derive(Debug, Clone, Serialize)]
pub struct ConfigField {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: &'static str,
    pub title: &'static str,
    pub required: bool,
    pub secret: bool,
    pub description: &'static str,
}

/// Option schema for the connector
pub fn option_schema() -> Vec<ConfigField> {
    vec![ConfigField {
        name: API_KEY_FIELD,
        field_type: "string",
        title: "API Key",
        required: true,
        secret: true,
        description: "Stripe secret API key (sk_live_... or sk_test_...)",
    }]
}
