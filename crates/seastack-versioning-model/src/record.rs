//! Object metadata records and data locations.
//!
//! An [`ObjectMetadataRecord`] is what the metadata store persists for one
//! object key (the master record) or for one historical version of it. The
//! versioning engine reads these records and emits new ones; it never mutates
//! a stored record in place.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DataLocation
// ---------------------------------------------------------------------------

/// An opaque reference to one stored block of object data.
///
/// The engine never dereferences locations; it only decides when a location
/// has become unreferenced and may be reclaimed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataLocation(String);

impl DataLocation {
    /// Wrap a raw location reference.
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// The raw reference string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DataLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DataLocation {
    fn from(location: &str) -> Self {
        Self(location.to_owned())
    }
}

// ---------------------------------------------------------------------------
// LocationRef
// ---------------------------------------------------------------------------

/// The `location` field as stored on disk: either a single reference (legacy
/// records) or a list of references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationRef {
    /// A single data-block reference.
    Single(DataLocation),
    /// An ordered list of data-block references.
    Many(Vec<DataLocation>),
}

impl LocationRef {
    /// Return the always-array form of this reference.
    ///
    /// A single location becomes a one-element vector; a list is returned
    /// unchanged.
    #[must_use]
    pub fn normalize(&self) -> Vec<DataLocation> {
        match self {
            Self::Single(loc) => vec![loc.clone()],
            Self::Many(locs) => locs.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// ArchiveStatus
// ---------------------------------------------------------------------------

/// Archive and restore bookkeeping for an object stored in a cold tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveStatus {
    /// Opaque descriptor of the archived payload, owned by the cold-storage
    /// backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_info: Option<serde_json::Value>,
    /// When a restore of this version was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_requested_at: Option<DateTime<Utc>>,
    /// How many whole days the restored copy should remain available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_requested_days: Option<u32>,
    /// When the restore completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_completed_at: Option<DateTime<Utc>>,
    /// When the restored copy expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_will_expire_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// ObjectMetadataRecord
// ---------------------------------------------------------------------------

/// Metadata persisted for one object key or one version of it.
///
/// Identifier semantics:
/// - `version_id` absent means the record predates versioning entirely.
/// - `is_null` marks a version created while versioning was unconfigured or
///   suspended (addressable as version `"null"`).
/// - `null_version_id` / `null_upload_id` are the back-reference from a
///   versioned master to its retired null version.
/// - `upload_id` is present only for multipart-created objects and doubles as
///   the replay id for version deletes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadataRecord {
    /// The internal version identifier of this record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    /// Whether this record is a null version.
    #[serde(default)]
    pub is_null: bool,
    /// Multipart upload id, when the object was created by one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_id: Option<String>,
    /// Version id of the retired null version referenced by this master.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_version_id: Option<String>,
    /// Upload id of the retired null version, for replay cleanup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_upload_id: Option<String>,
    /// Data-block reference(s) for this version's payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationRef>,
    /// When the object was first created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    /// When this record was last modified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Object tags, used for policy condition-key evaluation.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
    /// Archive/restore bookkeeping, when the payload lives in a cold tier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<ArchiveStatus>,
}

impl ObjectMetadataRecord {
    /// Whether this record is a versioned (non-null) master.
    #[must_use]
    pub fn is_versioned_master(&self) -> bool {
        self.version_id.is_some() && !self.is_null
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
