//! Metadata-store seam and an in-memory reference implementation.
//!
//! The engine never talks to a concrete store; it goes through the
//! [`MetadataStore`] trait. [`MemoryMetadataStore`] is a thread-safe
//! reference implementation used by tests and embedders.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use seastack_versioning_model::ObjectMetadataRecord;

// ---------------------------------------------------------------------------
// Errors and parameters
// ---------------------------------------------------------------------------

/// Error returned by a metadata store.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// No record exists for the addressed key (and version, if any).
    #[error("no metadata entry for key: {key}")]
    NotFound {
        /// The addressed key.
        key: String,
    },

    /// Any other backend failure.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Version addressing for a metadata operation.
///
/// With no `version_id`, the operation addresses the master record. The
/// `replay_id` accompanies version deletes so multipart bookkeeping can be
/// cleaned up alongside the version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionParams {
    /// The version to address, or `None` for the master record.
    pub version_id: Option<String>,
    /// Upload id carried alongside a version delete.
    pub replay_id: Option<String>,
}

impl VersionParams {
    /// Parameters addressing the master record.
    #[must_use]
    pub fn master() -> Self {
        Self::default()
    }

    /// Parameters addressing a specific version.
    #[must_use]
    pub fn version(version_id: impl Into<String>) -> Self {
        Self {
            version_id: Some(version_id.into()),
            replay_id: None,
        }
    }
}

// ---------------------------------------------------------------------------
// MetadataStore
// ---------------------------------------------------------------------------

/// Key/value metadata collaborator.
///
/// Implementations own concurrency control for the record set (conditional
/// writes and the like); the engine only relies on the sequential contract of
/// each single call.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Read the record for `key` in `bucket`.
    async fn get_object(
        &self,
        bucket: &str,
        key: &str,
        params: &VersionParams,
    ) -> Result<ObjectMetadataRecord, MetadataError>;

    /// Write the record for `key` in `bucket`.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        record: &ObjectMetadataRecord,
        params: &VersionParams,
    ) -> Result<(), MetadataError>;

    /// Delete the record for `key` in `bucket`.
    async fn delete_object(
        &self,
        bucket: &str,
        key: &str,
        params: &VersionParams,
    ) -> Result<(), MetadataError>;
}

// ---------------------------------------------------------------------------
// MemoryMetadataStore
// ---------------------------------------------------------------------------

/// In-memory metadata store backed by a sorted map.
///
/// Entries are keyed by bucket, object key, and optional version id, with
/// `NUL` separators so version keys group under their object key in store
/// order.
#[derive(Debug, Default)]
pub struct MemoryMetadataStore {
    entries: RwLock<BTreeMap<String, ObjectMetadataRecord>>,
}

impl MemoryMetadataStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn entry_key(bucket: &str, key: &str, version_id: Option<&str>) -> String {
        match version_id {
            Some(vid) => format!("{bucket}\u{0}{key}\u{0}{vid}"),
            None => format!("{bucket}\u{0}{key}"),
        }
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn get_object(
        &self,
        bucket: &str,
        key: &str,
        params: &VersionParams,
    ) -> Result<ObjectMetadataRecord, MetadataError> {
        let entry_key = Self::entry_key(bucket, key, params.version_id.as_deref());
        self.entries
            .read()
            .get(&entry_key)
            .cloned()
            .ok_or_else(|| MetadataError::NotFound {
                key: key.to_owned(),
            })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        record: &ObjectMetadataRecord,
        params: &VersionParams,
    ) -> Result<(), MetadataError> {
        let entry_key = Self::entry_key(bucket, key, params.version_id.as_deref());
        self.entries.write().insert(entry_key, record.clone());
        Ok(())
    }

    async fn delete_object(
        &self,
        bucket: &str,
        key: &str,
        params: &VersionParams,
    ) -> Result<(), MetadataError> {
        let entry_key = Self::entry_key(bucket, key, params.version_id.as_deref());
        match self.entries.write().remove(&entry_key) {
            Some(_) => Ok(()),
            None => Err(MetadataError::NotFound {
                key: key.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
