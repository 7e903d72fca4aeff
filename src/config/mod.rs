//! Config module - admin data transfer settings loaded from JSON

use crate::admin::EntityKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Default upper bound for an import body: 5 MiB.
pub const DEFAULT_MAX_IMPORT_BYTES: usize = 5 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Field order for {0} is empty")]
    EmptyFieldOrder(EntityKind),
}

/// Settings for CSV export and import.
///
/// ```json
/// {
///   "maxImportBytes": 1048576,
///   "strictHeaders": true,
///   "fieldOrders": { "users": ["_id", "username", "coins"] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminConfig {
    /// Largest import body accepted, in bytes.
    pub max_import_bytes: usize,
    /// Reject imports whose header names a column outside the entity's field order.
    pub strict_headers: bool,
    /// Per-entity overrides of the export column order.
    pub field_orders: BTreeMap<EntityKind, Vec<String>>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            max_import_bytes: DEFAULT_MAX_IMPORT_BYTES,
            strict_headers: false,
            field_orders: BTreeMap::new(),
        }
    }
}

impl AdminConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded admin config");
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: AdminConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.field_orders.iter().find(|(_, fields)| fields.is_empty()) {
            Some((entity, _)) => Err(ConfigError::EmptyFieldOrder(*entity)),
            None => Ok(()),
        }
    }

    /// Export column order for `entity`: the override if configured, else the built-in order.
    pub fn fields_for(&self, entity: EntityKind) -> Vec<String> {
        self.field_orders
            .get(&entity)
            .cloned()
            .unwrap_or_else(|| {
                entity
                    .default_fields()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
    }
}
