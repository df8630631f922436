//! Bucket versioning configuration.
//!
//! A bucket that has never had versioning configured carries no
//! [`VersioningConfiguration`] at all; call sites model that as
//! `Option<&VersioningConfiguration>`. Once configured, the status is either
//! `Enabled` or `Suspended` and never goes back to unconfigured.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Bucket versioning status, as configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersioningStatus {
    /// Versioning is currently enabled.
    Enabled,
    /// Versioning was previously enabled but is now suspended.
    Suspended,
}

impl VersioningStatus {
    /// Return the wire string for this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Enabled => "Enabled",
            Self::Suspended => "Suspended",
        }
    }
}

impl fmt::Display for VersioningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`VersioningStatus`] from a string fails.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown versioning status: {0}")]
pub struct ParseVersioningStatusError(String);

impl FromStr for VersioningStatus {
    type Err = ParseVersioningStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Enabled" => Ok(Self::Enabled),
            "Suspended" => Ok(Self::Suspended),
            _ => Err(ParseVersioningStatusError(s.to_owned())),
        }
    }
}

/// Versioning configuration stored on a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersioningConfiguration {
    /// The configured status.
    pub status: VersioningStatus,
    /// MFA-delete setting, kept verbatim; the engine does not interpret it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfa_delete: Option<String>,
}

impl VersioningConfiguration {
    /// A configuration with versioning enabled.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            status: VersioningStatus::Enabled,
            mfa_delete: None,
        }
    }

    /// A configuration with versioning suspended.
    #[must_use]
    pub fn suspended() -> Self {
        Self {
            status: VersioningStatus::Suspended,
            mfa_delete: None,
        }
    }
}
