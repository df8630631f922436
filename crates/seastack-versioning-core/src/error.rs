//! Engine error types.
//!
//! Defines [`VersioningError`], the closed set of failures the versioning
//! engine can surface. Client-facing variants (`InvalidArgument`,
//! `NoSuchKey`) map to 4xx responses at the API layer; `Internal` maps to
//! 5xx and means the pending write must not proceed.

/// Versioning engine error type.
#[derive(Debug, thiserror::Error)]
pub enum VersioningError {
    /// An argument provided is invalid (e.g. an unparseable version id).
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    /// The targeted key or version does not exist.
    #[error("The specified key does not exist: {key}")]
    NoSuchKey {
        /// The key that was not found.
        key: String,
    },

    /// Unexpected metadata-store failure. The operation that produced the
    /// current decision bundle must be aborted.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl VersioningError {
    /// Whether this error should surface as a client error (4xx-equivalent)
    /// rather than a server error.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::NoSuchKey { .. }
        )
    }
}

/// Convenience result type for versioning operations.
pub type VersioningResult<T> = Result<T, VersioningError>;
