//! Master-state resolution.
//!
//! The decision engines never look at a raw metadata record directly; they
//! work from a [`MasterState`] snapshot derived once per operation.

use seastack_versioning_model::{DataLocation, LocationRef, ObjectMetadataRecord};

/// Normalized snapshot of the master record for one object key.
///
/// Ephemeral and owned by the operation that computed it. `exists` is `false`
/// exactly when no master record was found; in that case every other field is
/// absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasterState {
    /// Whether a master record exists at all.
    pub exists: bool,
    /// The master's internal version id, if it has one.
    pub version_id: Option<String>,
    /// The master's multipart upload id, if any.
    pub upload_id: Option<String>,
    /// Whether the master itself is a null version.
    pub is_null: bool,
    /// Version id of the retired null version the master references.
    pub null_version_id: Option<String>,
    /// Upload id of the referenced null version.
    pub null_upload_id: Option<String>,
    /// The master's data locations, normalized to array form.
    pub obj_location: Option<Vec<DataLocation>>,
}

impl MasterState {
    /// Derive the master state from the current master record, if any.
    ///
    /// Pure: identifier fields are copied verbatim and the location is
    /// normalized to its array form; the input record is untouched.
    #[must_use]
    pub fn resolve(record: Option<&ObjectMetadataRecord>) -> Self {
        let Some(record) = record else {
            return Self::default();
        };
        Self {
            exists: true,
            version_id: record.version_id.clone(),
            upload_id: record.upload_id.clone(),
            is_null: record.is_null,
            null_version_id: record.null_version_id.clone(),
            null_upload_id: record.null_upload_id.clone(),
            obj_location: record.location.as_ref().map(LocationRef::normalize),
        }
    }

    /// Whether the master is a versioned entry rather than a null version or
    /// a record predating versioning.
    #[must_use]
    pub fn has_versioned_master(&self) -> bool {
        self.version_id.is_some() && !self.is_null
    }
}
