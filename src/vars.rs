//! External variable store
//!
//! The scheduler environment owns runtime values such as the destination
//! bucket and path prefix. This module resolves them from a JSON or YAML
//! variables file with a process-environment override layer: a variable
//! `gcs_bucket` can be overridden by `TRANSFER_VAR_GCS_BUCKET`.
//!
//! Missing required variables fail the task before any warehouse connection
//! is attempted.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "TRANSFER_VAR_";

/// Key-value variable store
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    values: HashMap<String, String>,
}

impl VariableStore {
    /// Create an empty store (environment overrides still apply)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a key-value map
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Load variables from a JSON or YAML file
    ///
    /// The file must contain a flat string-to-string mapping. Format is
    /// chosen by extension; anything that is not `.json` parses as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        let values: HashMap<String, String> =
            if path.extension().is_some_and(|ext| ext == "json") {
                serde_json::from_str(&content)
                    .map_err(|e| Error::config(format!("Invalid variables JSON: {e}")))?
            } else {
                serde_yaml::from_str(&content)
                    .map_err(|e| Error::config(format!("Invalid variables YAML: {e}")))?
            };

        Ok(Self { values })
    }

    /// Parse variables from an inline JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let values: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid variables JSON: {e}")))?;
        Ok(Self { values })
    }

    /// Get a required variable
    ///
    /// Resolution order: `TRANSFER_VAR_<KEY>` from the environment, then the
    /// loaded file. A missing key is an error.
    pub fn get(&self, key: &str) -> Result<String> {
        self.get_opt(key)
            .ok_or_else(|| Error::missing_variable(key))
    }

    /// Get an optional variable
    pub fn get_opt(&self, key: &str) -> Option<String> {
        let env_key = format!("{ENV_PREFIX}{}", key.to_uppercase());
        if let Ok(value) = std::env::var(&env_key) {
            return Some(value);
        }
        self.values.get(key).cloned()
    }

    /// Insert a value (used by tests and inline overrides)
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Number of variables loaded from the file layer
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the file layer is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
