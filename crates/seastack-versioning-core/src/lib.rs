//! Versioning-state engine for the SeaStack S3-compatible object store.
//!
//! For every mutating object operation (PUT, DELETE, restore overwrite) this
//! crate computes the metadata-store instructions that reproduce AWS S3
//! versioning semantics: which key to write, whether to create or retire a
//! null version, which version becomes the new master, and which stored data
//! becomes orphaned and may be reclaimed.
//!
//! # Architecture
//!
//! ```text
//! request handler (PUT / DELETE / restore)
//!        |
//!        v
//! VersioningPreprocessor (preprocess)
//!        |
//!   MasterState (master) -> put / delete decision engines (pure)
//!        |
//!        v
//! NullVersionOrchestrator (orchestrator)
//!        |
//!        v
//!   MetadataStore (store, trait seam)
//! ```
//!
//! The decision engines are pure; all metadata I/O happens in the
//! orchestrator, sequentially and short-circuiting on the first unrecoverable
//! failure.

pub mod codec;
pub mod config;
pub mod delete;
pub mod error;
pub mod master;
pub mod orchestrator;
pub mod overwrite;
pub mod preprocess;
pub mod put;
pub mod store;
pub mod tags;

pub use codec::{VersionId, VersionIdCodec, VersionIdGenerator};
pub use config::EngineConfig;
pub use error::{VersioningError, VersioningResult};
pub use master::MasterState;
pub use preprocess::VersioningPreprocessor;
pub use store::{MetadataError, MetadataStore};
