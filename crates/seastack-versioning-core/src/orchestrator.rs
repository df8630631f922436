//! Side-effect execution for PUT-path decisions.
//!
//! The orchestrator turns a [`PutDecision`] into at most one metadata store
//! and one metadata delete, strictly in that order, short-circuiting on the
//! first unrecoverable failure. The protective copy of a retiring null
//! version must be durable before any deletion is attempted; a cleanup race
//! (the null version already deleted by a concurrent operation) is absorbed.

use seastack_versioning_model::{DataLocation, LocationRef, ObjectMetadataRecord};
use tracing::debug;

use crate::error::{VersioningError, VersioningResult};
use crate::master::MasterState;
use crate::put::{PutDecision, RetireOptions, VersioningOptions};
use crate::store::{MetadataError, MetadataStore, VersionParams};

/// Executes the store/delete side effects implied by a PUT decision.
#[derive(Debug)]
pub struct NullVersionOrchestrator<'a, S: MetadataStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: MetadataStore + ?Sized> NullVersionOrchestrator<'a, S> {
    /// Create an orchestrator over the given metadata store.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Apply `decision` for `bucket`/`key` and return the merged write
    /// options.
    ///
    /// Steps run sequentially: the protective store first, then the null
    /// version retirement. Any reclaimed data locations are merged into the
    /// returned options' `data_to_delete`.
    ///
    /// # Errors
    ///
    /// Returns [`VersioningError::Internal`] when the protective store fails
    /// (no deletion is attempted in that case) or when the retirement fails
    /// for any reason other than the record already being gone.
    pub async fn apply(
        &self,
        bucket: &str,
        key: &str,
        master: &MasterState,
        current: Option<&ObjectMetadataRecord>,
        decision: PutDecision,
    ) -> VersioningResult<VersioningOptions> {
        let PutDecision {
            mut options,
            store_options,
            del_options,
        } = decision;

        if let Some(store_options) = store_options {
            let Some(record) = current else {
                return Err(VersioningError::Internal(anyhow::anyhow!(
                    "protective store requested but no master record is available \
                     for {bucket}/{key}"
                )));
            };
            let mut retired = record.clone();
            retired.version_id = Some(store_options.version_id.clone());
            retired.is_null = store_options.is_null;
            self.store
                .put_object(
                    bucket,
                    key,
                    &retired,
                    &VersionParams::version(&store_options.version_id),
                )
                .await
                .map_err(|err| internal(err, "storing retiring master as null version"))?;
            debug!(
                bucket = %bucket,
                key = %key,
                version_id = %store_options.version_id,
                "stored retiring master under version key"
            );
        }

        if let Some(del_options) = del_options {
            let reclaimed = self
                .retire_null_version(bucket, key, master, &del_options)
                .await?;
            // The decision may already list the retired version's locations
            // (suspended overwrite of a null master); each location must be
            // reclaimed exactly once.
            for location in reclaimed {
                if !options.data_to_delete.contains(&location) {
                    options.data_to_delete.push(location);
                }
            }
        }

        Ok(options)
    }

    /// Delete a superseded null version's metadata, returning the data
    /// locations it referenced (now unreferenced and reclaimable).
    ///
    /// A `NotFound` from either the location read or the delete means a
    /// concurrent operation already cleaned up the same null version; that is
    /// absorbed and yields zero reclaimed locations.
    async fn retire_null_version(
        &self,
        bucket: &str,
        key: &str,
        master: &MasterState,
        del_options: &RetireOptions,
    ) -> VersioningResult<Vec<DataLocation>> {
        // The master already knows its own locations; only read when a
        // different version is being retired.
        let locations = if master.version_id.as_deref() == Some(del_options.version_id.as_str()) {
            master.obj_location.clone().unwrap_or_default()
        } else {
            match self
                .store
                .get_object(bucket, key, &VersionParams::version(&del_options.version_id))
                .await
            {
                Ok(record) => record
                    .location
                    .as_ref()
                    .map(LocationRef::normalize)
                    .unwrap_or_default(),
                Err(MetadataError::NotFound { .. }) => {
                    debug!(
                        bucket = %bucket,
                        key = %key,
                        version_id = %del_options.version_id,
                        "null version already cleaned up by a concurrent operation"
                    );
                    return Ok(Vec::new());
                }
                Err(err) => return Err(internal(err, "reading superseded null version")),
            }
        };

        let params = VersionParams {
            version_id: Some(del_options.version_id.clone()),
            replay_id: del_options.replay_id.clone(),
        };
        match self.store.delete_object(bucket, key, &params).await {
            Ok(()) => Ok(locations),
            Err(MetadataError::NotFound { .. }) => {
                debug!(
                    bucket = %bucket,
                    key = %key,
                    version_id = %del_options.version_id,
                    "null version already cleaned up by a concurrent operation"
                );
                Ok(Vec::new())
            }
            Err(err) => Err(internal(err, "deleting superseded null version")),
        }
    }
}

fn internal(err: MetadataError, doing: &str) -> VersioningError {
    VersioningError::Internal(anyhow::Error::new(err).context(doing.to_owned()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
