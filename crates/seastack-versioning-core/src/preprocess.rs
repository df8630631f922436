//! Request-level entry points for versioning preprocessing.
//!
//! [`VersioningPreprocessor`] is the facade callers use: it resolves the
//! master state from the current record, runs the pure decision logic, and
//! executes any required side effects against the metadata store before
//! handing back the final write or delete options.

use seastack_versioning_model::{ObjectMetadataRecord, VersioningConfiguration, VersioningStatus};
use tracing::debug;

use crate::codec::VersionIdCodec;
use crate::delete::{self, DeleteOptions, RequestedVersion};
use crate::error::VersioningResult;
use crate::master::MasterState;
use crate::orchestrator::NullVersionOrchestrator;
use crate::put::{self, VersioningOptions};
use crate::store::MetadataStore;

/// Computes versioning write and delete options for object operations.
#[derive(Debug)]
pub struct VersioningPreprocessor<'a, S: MetadataStore + ?Sized> {
    store: &'a S,
    codec: VersionIdCodec,
}

impl<'a, S: MetadataStore + ?Sized> VersioningPreprocessor<'a, S> {
    /// Create a preprocessor over the given store and version id codec.
    pub fn new(store: &'a S, codec: VersionIdCodec) -> Self {
        Self { store, codec }
    }

    /// Compute the write options for a PUT of `bucket`/`key`.
    ///
    /// `versioning` is the bucket's versioning configuration, if any;
    /// `current` is the current master record, if one exists. Side effects
    /// needed to preserve a retiring null version run against the store
    /// before this returns.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::VersioningError::Internal`] from failed side
    /// effects.
    pub async fn put_options(
        &self,
        bucket: &str,
        key: &str,
        versioning: Option<&VersioningConfiguration>,
        current: Option<&ObjectMetadataRecord>,
    ) -> VersioningResult<VersioningOptions> {
        let master = MasterState::resolve(current);

        let Some(config) = versioning else {
            // Never-configured bucket: plain overwrite, reclaiming whatever
            // the old master referenced.
            return Ok(VersioningOptions {
                data_to_delete: master.obj_location.unwrap_or_default(),
                ..VersioningOptions::default()
            });
        };

        let decision = put::decide(&master, config.status, &self.codec);
        debug!(
            bucket = %bucket,
            key = %key,
            status = %config.status,
            versioned_write = decision.options.versioning,
            "computed put versioning decision"
        );
        let orchestrator = NullVersionOrchestrator::new(self.store);
        orchestrator
            .apply(bucket, key, &master, current, decision)
            .await
    }

    /// Compute the delete options for a DELETE of `bucket`/`key`.
    ///
    /// `version_id` is the raw version id from the request, if any; `"null"`
    /// targets the null version, anything else is decoded with the codec.
    ///
    /// # Errors
    ///
    /// Returns [`crate::VersioningError::InvalidArgument`] for a malformed
    /// version id and [`crate::VersioningError::NoSuchKey`] when a requested
    /// null version does not exist.
    pub fn delete_options(
        &self,
        key: &str,
        versioning: Option<&VersioningConfiguration>,
        current: Option<&ObjectMetadataRecord>,
        version_id: Option<&str>,
    ) -> VersioningResult<DeleteOptions> {
        let requested = version_id
            .map(|raw| RequestedVersion::parse(raw, &self.codec))
            .transpose()?;
        delete::decide(key, versioning, current, requested.as_ref())
    }

    /// Whether writes to this bucket currently create new versions.
    #[must_use]
    pub fn is_versioned_write(versioning: Option<&VersioningConfiguration>) -> bool {
        versioning.is_some_and(|config| config.status == VersioningStatus::Enabled)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
