//! Versioning engine configuration.
//!
//! Provides [`EngineConfig`] for configuring the SeaStack versioning engine.
//! Configuration values are loaded from environment variables.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::codec::{VersionIdCodec, VersionIdGenerator};

/// Versioning engine configuration.
///
/// All fields have sensible defaults. Configuration can be loaded from
/// environment variables via [`EngineConfig::from_env`].
///
/// # Examples
///
/// ```
/// use seastack_versioning_core::config::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.replication_group_id, "RG001");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Replication group identifier appended to every generated version id.
    #[builder(default = String::from("RG001"))]
    pub replication_group_id: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            replication_group_id: String::from("RG001"),
            log_level: String::from("info"),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `REPLICATION_GROUP_ID` | `RG001` |
    /// | `LOG_LEVEL` | `info` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("REPLICATION_GROUP_ID") {
            config.replication_group_id = v;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// Build the version id codec for this engine's replication group.
    #[must_use]
    pub fn codec(&self) -> VersionIdCodec {
        VersionIdCodec::new(&self.replication_group_id)
    }

    /// Build a version id generator for this engine's replication group.
    #[must_use]
    pub fn generator(&self) -> VersionIdGenerator {
        VersionIdGenerator::new(&self.replication_group_id)
    }
}
