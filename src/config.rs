//! Transfer profile configuration
//!
//! A transfer is described declaratively in YAML: which warehouse to query,
//! what to select, where the local artifact lives, and how the destination
//! object is named. The bucket and path prefix themselves come from the
//! variable store at run time, not from the profile.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Top-Level Profile
// ============================================================================

/// Complete transfer profile loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferProfile {
    /// Unique profile name (e.g., "books_export")
    pub name: String,

    /// Warehouse connection
    pub warehouse: WarehouseConnection,

    /// What to query
    #[serde(default)]
    pub source: SourceConfig,

    /// Local intermediate artifact
    #[serde(default)]
    pub artifact: ArtifactConfig,

    /// Destination object naming
    #[serde(default)]
    pub destination: DestinationConfig,
}

impl TransferProfile {
    /// Load a profile from a YAML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
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
        Self::from_str(&content)
    }

    /// Parse a profile from a YAML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(yaml: &str) -> Result<Self> {
        let profile: Self = serde_yaml::from_str(yaml)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Validate the profile
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidConfigValue {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        match (&self.source.table, &self.source.query) {
            (None, None) => Err(Error::InvalidConfigValue {
                field: "source".to_string(),
                message: "either 'table' or 'query' is required".to_string(),
            }),
            (Some(_), Some(_)) => Err(Error::InvalidConfigValue {
                field: "source".to_string(),
                message: "'table' and 'query' are mutually exclusive".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Warehouse Connection
// ============================================================================

/// Warehouse engine kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarehouseKind {
    Postgres,
    Mysql,
    Sqlite,
    #[default]
    Duckdb,
}

/// Warehouse connection definition
///
/// Either a full `connection_string` or individual components. Component
/// values typically reference the deployment's secret material.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarehouseConnection {
    /// Engine kind
    #[serde(default)]
    pub engine: WarehouseKind,

    /// Full connection string (takes precedence over components)
    #[serde(default)]
    pub connection_string: Option<String>,

    /// Host name
    #[serde(default)]
    pub host: Option<String>,

    /// Port
    #[serde(default)]
    pub port: Option<u16>,

    /// Database name (file path for sqlite/duckdb)
    #[serde(default)]
    pub database: Option<String>,

    /// User name
    #[serde(default)]
    pub user: Option<String>,

    /// Password
    #[serde(default)]
    pub password: Option<String>,
}

// ============================================================================
// Source Config
// ============================================================================

/// What to select from the warehouse
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Fully qualified table to export (`SELECT *` with the configured limit)
    #[serde(default)]
    pub table: Option<String>,

    /// Raw query text (mutually exclusive with `table`)
    #[serde(default)]
    pub query: Option<String>,

    /// Row limit applied to table exports
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    11
}

impl SourceConfig {
    /// Build the SQL statement to execute
    pub fn build_query(&self) -> Result<String> {
        if let Some(ref query) = self.query {
            Ok(query.clone())
        } else if let Some(ref table) = self.table {
            Ok(format!("SELECT * FROM {table} LIMIT {}", self.limit))
        } else {
            Err(Error::InvalidConfigValue {
                field: "source".to_string(),
                message: "either 'table' or 'query' is required".to_string(),
            })
        }
    }
}

// ============================================================================
// Artifact Config
// ============================================================================

/// Local intermediate artifact settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Local path, overwritten every run and not cleaned up afterwards
    #[serde(default = "default_artifact_path")]
    pub path: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            path: default_artifact_path(),
        }
    }
}

fn default_artifact_path() -> String {
    "/tmp/warehouse_data.csv".to_string()
}

// ============================================================================
// Destination Config
// ============================================================================

/// Destination object naming
///
/// The bucket and prefix values come from the variable store; the profile
/// only names which variables to read and the object scheme/filename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// Object store scheme (gs, s3, az)
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Variable holding the bucket name
    #[serde(default = "default_bucket_var")]
    pub bucket_var: String,

    /// Variable holding the object key prefix
    #[serde(default = "default_prefix_var")]
    pub prefix_var: String,

    /// Fixed filename appended to the prefix
    #[serde(default = "default_filename")]
    pub filename: String,
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            bucket_var: default_bucket_var(),
            prefix_var: default_prefix_var(),
            filename: default_filename(),
        }
    }
}

fn default_scheme() -> String {
    "gs".to_string()
}

fn default_bucket_var() -> String {
    "gcs_bucket".to_string()
}

fn default_prefix_var() -> String {
    "gcs_path".to_string()
}

fn default_filename() -> String {
    "file.csv".to_string()
}
