//! In-place overwrite of an existing version's metadata.
//!
//! Used by restore-from-archive completion: the version is already
//! identified, its data is back from the cold tier, and only the metadata
//! must be updated without minting a new version id. Readers observe the
//! update through a microversion bump instead.

use chrono::{DateTime, Duration, Utc};
use seastack_versioning_model::{ArchiveStatus, ObjectMetadataRecord};

use crate::error::{VersioningError, VersioningResult};

/// Caller-supplied parameters for an in-place metadata overwrite, completed
/// by [`decide`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverwriteParams {
    /// Original creation time, carried forward from the record.
    pub creation_time: Option<DateTime<Utc>>,
    /// Original last-modified time, carried forward from the record.
    pub last_modified: Option<DateTime<Utc>>,
    /// Force a microversion bump so readers observe the update.
    pub update_micro_version_id: bool,
    /// Version identity of the record being overwritten.
    pub version_id: Option<String>,
    /// Whether the overwritten record is a null version.
    pub is_null: bool,
    /// Null-version back-reference, carried forward unchanged.
    pub null_version_id: Option<String>,
    /// Recomputed archive/restore bookkeeping.
    pub archive: Option<ArchiveStatus>,
}

/// Complete `params` for overwriting `record`'s metadata in place.
///
/// Timestamps are copied forward, the microversion bump is forced, and the
/// restore window is recomputed from `now`: the restored copy expires after
/// `restore_requested_days` whole days of wall-clock time.
///
/// # Errors
///
/// Returns [`VersioningError::InvalidArgument`] when the record carries no
/// `restore_requested_days`; callers must only invoke this for records with a
/// pending restore.
pub fn decide(
    record: &ObjectMetadataRecord,
    mut params: OverwriteParams,
    now: DateTime<Utc>,
) -> VersioningResult<OverwriteParams> {
    let archive = record.archive.as_ref();
    let days = archive
        .and_then(|a| a.restore_requested_days)
        .ok_or_else(|| VersioningError::InvalidArgument {
            message: "restore-overwrite requires restoreRequestedDays on the record".to_owned(),
        })?;

    params.creation_time = record.creation_time;
    params.last_modified = record.last_modified;
    params.update_micro_version_id = true;
    params.archive = Some(ArchiveStatus {
        archive_info: archive.and_then(|a| a.archive_info.clone()),
        restore_requested_at: archive.and_then(|a| a.restore_requested_at),
        restore_requested_days: Some(days),
        restore_completed_at: Some(now),
        restore_will_expire_at: Some(now + Duration::days(i64::from(days))),
    });

    // Preserve the version identity so no new version appears.
    params.version_id = record.version_id.clone();
    params.is_null = record.is_null;
    params.null_version_id = record.null_version_id.clone();
    Ok(params)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
