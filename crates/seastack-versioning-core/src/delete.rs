//! DELETE-path versioning decisions.
//!
//! Pure counterpart of [`crate::put`]: given the bucket's versioning
//! configuration, the current object record, and the (already decoded)
//! requested version, [`decide`] produces the delete instructions. When no
//! version is targeted at all, the empty options signal the caller to create
//! a delete marker instead of deleting anything.

use seastack_versioning_model::{ObjectMetadataRecord, VersioningConfiguration};

use crate::codec::{VersionId, VersionIdCodec};
use crate::error::{VersioningError, VersioningResult};

/// The version a delete request targets, after decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedVersion {
    /// The literal `"null"` sentinel: target the null version.
    Null,
    /// A specific version id.
    Id(VersionId),
}

impl RequestedVersion {
    /// Parse the raw version-id string from a request.
    ///
    /// # Errors
    ///
    /// Returns [`VersioningError::InvalidArgument`] when the string is
    /// neither the `"null"` sentinel nor a well-formed encoded version id.
    pub fn parse(raw: &str, codec: &VersionIdCodec) -> VersioningResult<Self> {
        if raw == "null" {
            return Ok(Self::Null);
        }
        codec.decode(raw).map(Self::Id)
    }
}

/// Instructions for the object-delete path.
///
/// The default (all-absent) value means "nothing to hard-delete; create a
/// delete marker".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOptions {
    /// Whether the targeted record's data must actually be deleted.
    pub delete_data: bool,
    /// The exact version id to delete, when one is targeted.
    pub version_id: Option<String>,
    /// Whether the targeted version is known to be a null version.
    pub is_null: Option<bool>,
    /// Upload id carried alongside the delete for replay cleanup.
    pub replay_id: Option<String>,
}

impl DeleteOptions {
    fn hard_delete(version_id: Option<String>, replay_id: Option<String>) -> Self {
        Self {
            delete_data: true,
            version_id,
            is_null: None,
            replay_id,
        }
    }

    fn hard_delete_null(version_id: Option<String>, replay_id: Option<String>) -> Self {
        Self {
            is_null: Some(true),
            ..Self::hard_delete(version_id, replay_id)
        }
    }
}

/// Compute the delete instructions for an object.
///
/// # Errors
///
/// Returns [`VersioningError::NoSuchKey`] when the request targets the null
/// version of an object that has none.
pub fn decide(
    key: &str,
    versioning: Option<&VersioningConfiguration>,
    record: Option<&ObjectMetadataRecord>,
    requested: Option<&RequestedVersion>,
) -> VersioningResult<DeleteOptions> {
    if versioning.is_none() {
        // Versioning never configured: unconditional hard delete.
        return Ok(DeleteOptions::hard_delete(None, None));
    }
    match requested {
        Some(RequestedVersion::Id(version_id)) => Ok(DeleteOptions::hard_delete(
            Some(version_id.as_str().to_owned()),
            record.and_then(|r| r.upload_id.clone()),
        )),
        Some(RequestedVersion::Null) => match record {
            Some(record) => decide_null_delete(key, record),
            None => Err(VersioningError::NoSuchKey {
                key: key.to_owned(),
            }),
        },
        // No version targeted: the caller creates a delete marker instead.
        None => Ok(DeleteOptions::default()),
    }
}

/// The `"null"` sentinel ladder: find which record actually is the null
/// version, if any.
fn decide_null_delete(key: &str, record: &ObjectMetadataRecord) -> VersioningResult<DeleteOptions> {
    if record.version_id.is_none() {
        // The object predates versioning; the master is the only copy.
        return Ok(DeleteOptions::hard_delete(None, None));
    }
    if record.is_null {
        return Ok(DeleteOptions::hard_delete_null(
            record.version_id.clone(),
            record.upload_id.clone(),
        ));
    }
    if let Some(null_version_id) = &record.null_version_id {
        return Ok(DeleteOptions::hard_delete_null(
            Some(null_version_id.clone()),
            record.null_upload_id.clone(),
        ));
    }
    Err(VersioningError::NoSuchKey {
        key: key.to_owned(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
