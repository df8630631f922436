//! PUT-path versioning decisions.
//!
//! [`decide`] is the pure state machine at the center of the engine: given
//! the master-state snapshot and the bucket's versioning status it produces
//! the instructions the write path and the orchestrator execute. It performs
//! no I/O and never fails.

use seastack_versioning_model::{DataLocation, VersioningStatus};

use crate::codec::VersionIdCodec;
use crate::master::MasterState;

// ---------------------------------------------------------------------------
// Decision bundles
// ---------------------------------------------------------------------------

/// Instructions handed back to the object-write path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersioningOptions {
    /// Target version id for the write. An empty string addresses the master
    /// record directly (suspended overwrite-in-place).
    pub version_id: Option<String>,
    /// Whether the written record must be flagged as a null version.
    pub is_null: Option<bool>,
    /// Ask the metadata layer to mint a fresh version for this write.
    pub versioning: bool,
    /// Null-version back-reference to record on the forthcoming write.
    pub null_version_id: Option<String>,
    /// Upload id of the referenced null version.
    pub null_upload_id: Option<String>,
    /// Data locations orphaned by this decision, safe to reclaim once the
    /// write lands.
    pub data_to_delete: Vec<DataLocation>,
}

/// Instructions to persist the current master under a version key before it
/// is overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Version key to store the retiring master under.
    pub version_id: String,
    /// Whether the stored copy is flagged as a null version.
    pub is_null: bool,
}

/// Instructions to retire a superseded null version's metadata record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetireOptions {
    /// Version id of the null version to delete.
    pub version_id: String,
    /// Upload id carried alongside the delete for replay cleanup.
    pub replay_id: Option<String>,
}

/// The full decision bundle for one PUT.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PutDecision {
    /// Instructions for the write path.
    pub options: VersioningOptions,
    /// Protective copy of the retiring master, when needed.
    pub store_options: Option<StoreOptions>,
    /// Retirement of a superseded null version, when needed.
    pub del_options: Option<RetireOptions>,
}

// ---------------------------------------------------------------------------
// Decision engine
// ---------------------------------------------------------------------------

/// Compute the versioning instructions for a PUT.
///
/// Callers handle the never-configured case themselves (see
/// [`crate::preprocess::VersioningPreprocessor`]); this function only deals
/// with `Enabled` and `Suspended` buckets.
#[must_use]
pub fn decide(
    master: &MasterState,
    status: VersioningStatus,
    codec: &VersionIdCodec,
) -> PutDecision {
    if !master.has_versioned_master() {
        return decide_for_null_master(master, status, codec);
    }

    let mut options = VersioningOptions::default();
    match status {
        VersioningStatus::Suspended => {
            // Overwrite the versioned master in place with a null version.
            options.version_id = Some(String::new());
            options.is_null = Some(true);
            let del_options = master
                .null_version_id
                .clone()
                .map(|version_id| RetireOptions {
                    version_id,
                    replay_id: master.null_upload_id.clone(),
                });
            PutDecision {
                options,
                store_options: None,
                del_options,
            }
        }
        VersioningStatus::Enabled => {
            // New version; the existing null version, if any, is untouched.
            options.versioning = true;
            options.null_version_id = master.null_version_id.clone();
            options.null_upload_id = master.null_upload_id.clone();
            PutDecision {
                options,
                store_options: None,
                del_options: None,
            }
        }
    }
}

/// Decision for a master that is absent, predates versioning, or is itself a
/// null version.
fn decide_for_null_master(
    master: &MasterState,
    status: VersioningStatus,
    codec: &VersionIdCodec,
) -> PutDecision {
    match status {
        VersioningStatus::Suspended => {
            // Overwrite in place; the prior master's data becomes orphaned.
            let options = VersioningOptions {
                version_id: Some(String::new()),
                is_null: Some(true),
                data_to_delete: master.obj_location.clone().unwrap_or_default(),
                ..VersioningOptions::default()
            };
            let mut del_options = None;
            if master.is_null {
                // An explicit null version is being replaced; retire it.
                if let Some(version_id) = &master.version_id {
                    del_options = Some(RetireOptions {
                        version_id: version_id.clone(),
                        replay_id: master.upload_id.clone(),
                    });
                }
            }
            PutDecision {
                options,
                store_options: None,
                del_options,
            }
        }
        VersioningStatus::Enabled => {
            let mut options = VersioningOptions {
                versioning: true,
                ..VersioningOptions::default()
            };
            if !master.exists {
                return PutDecision {
                    options,
                    store_options: None,
                    del_options: None,
                };
            }
            // Persist the current master under a version key before the new
            // version replaces it. A null master keeps its own id; a master
            // predating versioning gets the reserved infinite id.
            let version_id = if master.is_null {
                master.version_id.clone()
            } else {
                None
            }
            .unwrap_or_else(|| codec.reserved_infinite_id().into_string());
            options.null_version_id = Some(version_id.clone());
            if master.is_null {
                // Masters predating versioning never carry a replay id, even
                // when multipart-created.
                options.null_upload_id = master.upload_id.clone();
            }
            PutDecision {
                options,
                store_options: Some(StoreOptions {
                    version_id,
                    is_null: true,
                }),
                del_options: None,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> VersionIdCodec {
        VersionIdCodec::new("RG001")
    }

    fn sentinel() -> String {
        codec().reserved_infinite_id().into_string()
    }

    // ---- master absent or null, bucket Suspended ----

    #[test]
    fn test_should_overwrite_in_place_when_suspended_and_unversioned_master() {
        let master = MasterState {
            exists: true,
            obj_location: Some(vec![DataLocation::from("block-1")]),
            ..MasterState::default()
        };
        let decision = decide(&master, VersioningStatus::Suspended, &codec());

        assert_eq!(decision.options.version_id.as_deref(), Some(""));
        assert_eq!(decision.options.is_null, Some(true));
        assert!(!decision.options.versioning);
        assert_eq!(
            decision.options.data_to_delete,
            vec![DataLocation::from("block-1")]
        );
        assert!(decision.store_options.is_none());
        assert!(decision.del_options.is_none());
    }

    #[test]
    fn test_should_retire_existing_null_version_when_suspended() {
        let master = MasterState {
            exists: true,
            version_id: Some("V1".to_owned()),
            is_null: true,
            upload_id: Some("mpu-1".to_owned()),
            obj_location: Some(vec![DataLocation::from("old-block")]),
            ..MasterState::default()
        };
        let decision = decide(&master, VersioningStatus::Suspended, &codec());

        assert_eq!(decision.options.version_id.as_deref(), Some(""));
        assert_eq!(decision.options.is_null, Some(true));
        assert_eq!(
            decision.del_options,
            Some(RetireOptions {
                version_id: "V1".to_owned(),
                replay_id: Some("mpu-1".to_owned()),
            })
        );
        assert!(decision.store_options.is_none());
    }

    #[test]
    fn test_should_not_reclaim_data_when_suspended_and_no_master() {
        let decision = decide(
            &MasterState::default(),
            VersioningStatus::Suspended,
            &codec(),
        );
        assert!(decision.options.data_to_delete.is_empty());
        assert!(decision.del_options.is_none());
        assert!(decision.store_options.is_none());
    }

    // ---- master absent or null, bucket Enabled ----

    #[test]
    fn test_should_only_request_new_version_when_enabled_and_no_master() {
        let decision = decide(&MasterState::default(), VersioningStatus::Enabled, &codec());
        assert!(decision.options.versioning);
        assert!(decision.options.null_version_id.is_none());
        assert!(decision.store_options.is_none());
        assert!(decision.del_options.is_none());
    }

    #[test]
    fn test_should_store_unversioned_master_under_sentinel_when_enabled() {
        let master = MasterState {
            exists: true,
            upload_id: Some("mpu-1".to_owned()),
            obj_location: Some(vec![DataLocation::from("block-1")]),
            ..MasterState::default()
        };
        let decision = decide(&master, VersioningStatus::Enabled, &codec());

        assert!(decision.options.versioning);
        assert_eq!(decision.options.null_version_id, Some(sentinel()));
        // Non-null masters never carry the upload id forward as a replay id.
        assert!(decision.options.null_upload_id.is_none());
        assert_eq!(
            decision.store_options,
            Some(StoreOptions {
                version_id: sentinel(),
                is_null: true,
            })
        );
        assert!(decision.del_options.is_none());
        assert!(decision.options.data_to_delete.is_empty());
    }

    #[test]
    fn test_should_store_null_master_under_its_own_id_when_enabled() {
        let master = MasterState {
            exists: true,
            version_id: Some("V1".to_owned()),
            is_null: true,
            upload_id: Some("mpu-1".to_owned()),
            ..MasterState::default()
        };
        let decision = decide(&master, VersioningStatus::Enabled, &codec());

        assert!(decision.options.versioning);
        assert_eq!(decision.options.null_version_id.as_deref(), Some("V1"));
        assert_eq!(decision.options.null_upload_id.as_deref(), Some("mpu-1"));
        assert_eq!(
            decision.store_options,
            Some(StoreOptions {
                version_id: "V1".to_owned(),
                is_null: true,
            })
        );
        assert!(decision.del_options.is_none());
    }

    // ---- versioned (non-null) master ----

    #[test]
    fn test_should_overwrite_versioned_master_in_place_when_suspended() {
        let master = MasterState {
            exists: true,
            version_id: Some("V2".to_owned()),
            ..MasterState::default()
        };
        let decision = decide(&master, VersioningStatus::Suspended, &codec());

        assert_eq!(decision.options.version_id.as_deref(), Some(""));
        assert_eq!(decision.options.is_null, Some(true));
        // The versioned master's data stays referenced by its version key.
        assert!(decision.options.data_to_delete.is_empty());
        assert!(decision.del_options.is_none());
        assert!(decision.store_options.is_none());
    }

    #[test]
    fn test_should_retire_referenced_null_version_when_suspended() {
        let master = MasterState {
            exists: true,
            version_id: Some("V2".to_owned()),
            null_version_id: Some("V0".to_owned()),
            null_upload_id: Some("mpu-0".to_owned()),
            ..MasterState::default()
        };
        let decision = decide(&master, VersioningStatus::Suspended, &codec());

        assert_eq!(
            decision.del_options,
            Some(RetireOptions {
                version_id: "V0".to_owned(),
                replay_id: Some("mpu-0".to_owned()),
            })
        );
    }

    #[test]
    fn test_should_carry_null_reference_forward_when_enabled() {
        let master = MasterState {
            exists: true,
            version_id: Some("V2".to_owned()),
            null_version_id: Some("V0".to_owned()),
            null_upload_id: Some("mpu-0".to_owned()),
            ..MasterState::default()
        };
        let decision = decide(&master, VersioningStatus::Enabled, &codec());

        assert!(decision.options.versioning);
        assert_eq!(decision.options.null_version_id.as_deref(), Some("V0"));
        assert_eq!(decision.options.null_upload_id.as_deref(), Some("mpu-0"));
        assert!(decision.store_options.is_none());
        assert!(decision.del_options.is_none());
    }

    #[test]
    fn test_should_emit_exactly_one_branch_for_every_state_combination() {
        let masters = [
            MasterState::default(),
            MasterState {
                exists: true,
                ..MasterState::default()
            },
            MasterState {
                exists: true,
                version_id: Some("V1".to_owned()),
                is_null: true,
                ..MasterState::default()
            },
            MasterState {
                exists: true,
                version_id: Some("V1".to_owned()),
                ..MasterState::default()
            },
        ];
        for master in &masters {
            for status in [VersioningStatus::Enabled, VersioningStatus::Suspended] {
                let decision = decide(master, status, &codec());
                // A decision either overwrites the master in place or mints a
                // new version; never both, never neither.
                let in_place = decision.options.version_id.as_deref() == Some("");
                assert_ne!(in_place, decision.options.versioning);
                // A protective store never coexists with a retirement here.
                assert!(decision.store_options.is_none() || decision.del_options.is_none());
            }
        }
    }
}
