//! Ledger configuration, loaded from YAML.
//!
//! ```yaml
//! database: .policyvault/ledger.db
//! busy_timeout_ms: 5000
//! collections:
//!   medical_conditions: medical-conditions-collection
//!   claims: claims-collection
//!   access_log: access-log-collection
//! ```

use crate::errors::LedgerError;
use crate::store::{Namespace, DEFAULT_BUSY_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "policyvault.yaml";

/// Top-level ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_database")]
    pub database: PathBuf,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    #[serde(default)]
    pub collections: Collections,
}

fn default_database() -> PathBuf {
    PathBuf::from(".policyvault/ledger.db")
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            busy_timeout_ms: default_busy_timeout_ms(),
            collections: Collections::default(),
        }
    }
}

/// Names of the restricted collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default = "default_medical_conditions")]
    pub medical_conditions: String,
    #[serde(default = "default_claims")]
    pub claims: String,
    #[serde(default = "default_access_log")]
    pub access_log: String,
}

fn default_medical_conditions() -> String {
    "medical-conditions-collection".to_string()
}

fn default_claims() -> String {
    "claims-collection".to_string()
}

fn default_access_log() -> String {
    "access-log-collection".to_string()
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            medical_conditions: default_medical_conditions(),
            claims: default_claims(),
            access_log: default_access_log(),
        }
    }
}

impl Collections {
    pub fn medical_conditions(&self) -> Namespace {
        Namespace::private(&self.medical_conditions)
    }

    pub fn claims(&self) -> Namespace {
        Namespace::private(&self.claims)
    }

    pub fn access_log(&self) -> Namespace {
        Namespace::private(&self.access_log)
    }

    /// Reject empty names and collections that share a name.
    pub fn validate(&self) -> Result<(), LedgerError> {
        let named = [
            ("collections.medical_conditions", &self.medical_conditions),
            ("collections.claims", &self.claims),
            ("collections.access_log", &self.access_log),
        ];
        for (field, name) in named {
            if name.trim().is_empty() {
                return Err(LedgerError::validation(field, "collection name is empty"));
            }
        }
        if self.medical_conditions == self.claims
            || self.medical_conditions == self.access_log
            || self.claims == self.access_log
        {
            return Err(LedgerError::validation(
                "collections",
                "each restricted collection needs its own name",
            ));
        }
        Ok(())
    }
}

impl LedgerConfig {
    /// Load config from a YAML file.
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LedgerError::validation("config", format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, LedgerError> {
        // An empty document deserializes to unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: LedgerConfig = serde_yaml::from_str(content)
            .map_err(|e| LedgerError::validation("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.database.as_os_str().is_empty() {
            return Err(LedgerError::validation("database", "path is empty"));
        }
        self.collections.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_yields_defaults() {
        let config = LedgerConfig::from_yaml("").unwrap();
        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.busy_timeout_ms, 5000);
        assert_eq!(
            config.collections.claims(),
            Namespace::private("claims-collection")
        );
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = LedgerConfig::from_yaml(
            r#"
database: /tmp/ledger.db
collections:
  claims: claims-v2
"#,
        )
        .unwrap();

        assert_eq!(config.database, PathBuf::from("/tmp/ledger.db"));
        assert_eq!(config.collections.claims, "claims-v2");
        assert_eq!(
            config.collections.medical_conditions,
            "medical-conditions-collection"
        );
        assert_eq!(config.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
    }

    #[test]
    fn test_duplicate_collection_names_rejected() {
        let result = LedgerConfig::from_yaml(
            r#"
collections:
  claims: shared
  access_log: shared
"#,
        );
        assert!(matches!(
            result,
            Err(LedgerError::Validation {
                field: "collections",
                ..
            })
        ));
    }

    #[test]
    fn test_empty_collection_name_rejected() {
        let result = LedgerConfig::from_yaml("collections:\n  medical_conditions: \"\"\n");
        assert!(matches!(
            result,
            Err(LedgerError::Validation {
                field: "collections.medical_conditions",
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_yaml_is_reported_as_validation_error() {
        let result = LedgerConfig::from_yaml("busy_timeout_ms: [not, a, number]");
        assert!(matches!(
            result,
            Err(LedgerError::Validation { field: "config", .. })
        ));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "busy_timeout_ms: 250\n").unwrap();

        let config = LedgerConfig::load(&path).unwrap();
        assert_eq!(config.busy_timeout_ms, 250);
    }
}
