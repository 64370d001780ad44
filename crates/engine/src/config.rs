//! Adapter configuration
//!
//! Read either from the harness's string properties (`couchbase.*` keys) or
//! from a `docbench.toml` file. Every setting has a default, so an empty
//! property map or an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use docbench_core::{Error, Result};
use docbench_durability::{resolve, DurabilityRequirement, DEFAULT_PERSIST_TO, DEFAULT_REPLICATE_TO};

/// Config file name
pub const CONFIG_FILE_NAME: &str = "docbench.toml";

/// Prefix of the harness property keys this adapter reads
pub const PROPERTY_PREFIX: &str = "couchbase.";

/// Connection and durability settings of one adapter instance
///
/// # Example
///
/// ```toml
/// hostname = "localhost"
/// bucket = "default"
/// password = ""
/// persist_to = "master"
/// replicate_to = "0"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Cluster host (`couchbase.hostname`)
    #[serde(default = "default_hostname")]
    pub hostname: String,
    /// Bucket name (`couchbase.bucket`)
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Bucket password (`couchbase.password`)
    #[serde(default)]
    pub password: String,
    /// Persistence level text (`couchbase.persistTo`)
    #[serde(default = "default_persist_to")]
    pub persist_to: String,
    /// Replication level text (`couchbase.replicateTo`)
    #[serde(default = "default_replicate_to")]
    pub replicate_to: String,
}

fn default_hostname() -> String {
    "localhost".to_string()
}

fn default_bucket() -> String {
    "default".to_string()
}

fn default_persist_to() -> String {
    DEFAULT_PERSIST_TO.to_string()
}

fn default_replicate_to() -> String {
    DEFAULT_REPLICATE_TO.to_string()
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            hostname: default_hostname(),
            bucket: default_bucket(),
            password: String::new(),
            persist_to: default_persist_to(),
            replicate_to: default_replicate_to(),
        }
    }
}

impl AdapterConfig {
    /// Build from harness properties
    ///
    /// Keys outside the `couchbase.` namespace and unknown `couchbase.` keys
    /// are ignored.
    pub fn from_properties(properties: &HashMap<String, String>) -> Self {
        let get = |name: &str, default: fn() -> String| {
            properties
                .get(&format!("{}{}", PROPERTY_PREFIX, name))
                .cloned()
                .unwrap_or_else(default)
        };

        Self {
            hostname: get("hostname", default_hostname),
            bucket: get("bucket", default_bucket),
            password: get("password", String::new),
            persist_to: get("persistTo", default_persist_to),
            replicate_to: get("replicateTo", default_replicate_to),
        }
    }

    /// Resolve the durability text into a requirement
    pub fn durability(&self) -> DurabilityRequirement {
        resolve(&self.persist_to, &self.replicate_to)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# docbench adapter configuration
#
# Cluster host and bucket credentials
hostname = "localhost"
bucket = "default"
password = ""

# Durability of every write
#   persist_to:   "master", "1".."4", anything else = no persistence check
#   replicate_to: "1".."3", anything else = no replication check
persist_to = "master"
replicate_to = "0"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::Config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
