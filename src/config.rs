use std::{fmt::Display, fs, path::Path};

use serde::{Deserialize, Serialize};

/// Naming and output settings used when compiling views.
///
/// - `view_suffix` is appended to the view name to form the view identifier.
/// - `index_prefix` starts every generated index name.
/// - `max_identifier_length` truncates generated index names (PostgreSQL keeps 63 bytes).
/// - `metadata_table` receives the column metadata rows.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    pub view_suffix: String,
    pub index_prefix: String,
    pub max_identifier_length: usize,
    pub metadata_table: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            view_suffix: "_v".to_string(),
            index_prefix: "idx".to_string(),
            max_identifier_length: 63,
            metadata_table: "view_column_metadata".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Io(String),
    Json(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(message) => write!(f, "could not read compiler config: {}", message),
            ConfigError::Json(message) => write!(f, "invalid compiler config: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json_str(&content)
    }

    /// Full identifier of the view created for `name`.
    pub fn view_identifier(&self, name: &str) -> String {
        format!("{}{}", name, self.view_suffix)
    }
}
