//! Durable object-metadata model for the SeaStack versioning engine.
//!
//! This crate defines the persisted shapes shared between the versioning
//! engine and the metadata store: the per-object metadata record (with its
//! version identifiers, data locations, and archive/restore block) and the
//! per-bucket versioning configuration.
//!
//! The serialized field names are a durable contract; other components must
//! not rename them.

pub mod bucket;
pub mod record;

pub use bucket::{VersioningConfiguration, VersioningStatus};
pub use record::{ArchiveStatus, DataLocation, LocationRef, ObjectMetadataRecord};
