//! Version-identifier codec.
//!
//! Internal version ids are fixed-width strings built from an inverted
//! millisecond timestamp and an inverted sequence number, followed by the
//! replication group id. Plain lexicographic comparison therefore ranks the
//! newest id first, which is how the metadata store orders version keys.
//!
//! The public form handed to clients is an opaque URL-safe base64 encoding of
//! the internal form. A reserved "infinite" id sorts after every id the
//! generator can produce; it names null versions that predate the bucket's
//! versioning configuration.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;

use crate::error::{VersioningError, VersioningResult};

/// Combined width of the timestamp and sequence components, in decimal digits.
const COUNTER_DIGITS: usize = 25;
/// Largest value the 15-digit timestamp component can hold.
const TS_MAX: u64 = 999_999_999_999_999;
/// Largest value the 10-digit sequence component can hold.
const SEQ_MAX: u64 = 9_999_999_999;

// ---------------------------------------------------------------------------
// VersionId
// ---------------------------------------------------------------------------

/// An internal, lexicographically sortable version identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionId(String);

impl VersionId {
    /// The internal string form, as stored in metadata records.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id, returning its internal string form.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// VersionIdCodec
// ---------------------------------------------------------------------------

/// Codec between internal version ids and their public string form.
///
/// The replication group id is an explicit constructor argument rather than
/// ambient configuration, so the codec stays pure and testable.
#[derive(Debug, Clone)]
pub struct VersionIdCodec {
    group_id: String,
}

impl VersionIdCodec {
    /// Create a codec for the given replication group.
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
        }
    }

    /// Encode an internal id into its public, URL-safe form.
    #[must_use]
    pub fn encode(&self, id: &VersionId) -> String {
        URL_SAFE_NO_PAD.encode(id.0.as_bytes())
    }

    /// Decode a public string back into an internal id.
    ///
    /// # Errors
    ///
    /// Returns [`VersioningError::InvalidArgument`] when the string is not a
    /// well-formed encoded version id.
    pub fn decode(&self, public: &str) -> VersioningResult<VersionId> {
        let bytes = URL_SAFE_NO_PAD
            .decode(public)
            .map_err(|_| malformed(public))?;
        let raw = String::from_utf8(bytes).map_err(|_| malformed(public))?;
        // Byte-wise prefix check: a str slice could land inside a multi-byte
        // character and panic on attacker-chosen input.
        let digits = raw
            .as_bytes()
            .get(..COUNTER_DIGITS)
            .is_some_and(|prefix| prefix.iter().all(u8::is_ascii_digit));
        if !digits {
            return Err(malformed(public));
        }
        Ok(VersionId(raw))
    }

    /// The reserved sentinel id for null versions that predate versioning.
    ///
    /// Sorts after every id [`VersionIdGenerator`] can produce, i.e. it is
    /// treated as infinitely old.
    #[must_use]
    pub fn reserved_infinite_id(&self) -> VersionId {
        VersionId(format!("{TS_MAX:015}{SEQ_MAX:010} {}", self.group_id))
    }
}

fn malformed(public: &str) -> VersioningError {
    VersioningError::InvalidArgument {
        message: format!("Invalid version id specified: {public}"),
    }
}

// ---------------------------------------------------------------------------
// VersionIdGenerator
// ---------------------------------------------------------------------------

/// Monotonic generator of fresh internal version ids.
///
/// Thread-safe; the sequence counter disambiguates ids minted within the same
/// millisecond.
#[derive(Debug)]
pub struct VersionIdGenerator {
    group_id: String,
    seq: AtomicU64,
}

impl VersionIdGenerator {
    /// Create a generator for the given replication group.
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            seq: AtomicU64::new(0),
        }
    }

    /// Mint a new version id.
    ///
    /// Later ids sort lexicographically before earlier ones, so the newest
    /// version of a key is always the first version key in store order.
    pub fn next_id(&self) -> VersionId {
        let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let ts = TS_MAX - now_ms.min(TS_MAX);
        let seq = SEQ_MAX - (self.seq.fetch_add(1, Ordering::Relaxed) % (SEQ_MAX + 1));
        VersionId(format!("{ts:015}{seq:010} {}", self.group_id))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_roundtrip_generated_id_through_public_form() {
        let codec = VersionIdCodec::new("RG001");
        let generator = VersionIdGenerator::new("RG001");
        let id = generator.next_id();
        let public = codec.encode(&id);
        let decoded = codec.decode(&public).expect("roundtrip decode");
        assert_eq!(decoded, id);
    }

    #[test]
    fn test_should_reject_non_base64_public_id() {
        let codec = VersionIdCodec::new("RG001");
        let err = codec.decode("not~base64!").expect_err("malformed id");
        assert!(matches!(err, VersioningError::InvalidArgument { .. }));
    }

    #[test]
    fn test_should_reject_wellformed_base64_with_bad_payload() {
        let codec = VersionIdCodec::new("RG001");
        let public = URL_SAFE_NO_PAD.encode(b"definitely-not-an-id");
        let err = codec.decode(&public).expect_err("malformed payload");
        assert!(matches!(err, VersioningError::InvalidArgument { .. }));
    }

    #[test]
    fn test_should_reject_multibyte_char_straddling_digit_prefix() {
        // 24 digits then a two-byte character, so the prefix boundary falls
        // mid-character; must decode to an error, not panic.
        let codec = VersionIdCodec::new("RG001");
        let public = URL_SAFE_NO_PAD.encode("012345678901234567890123é".as_bytes());
        let err = codec.decode(&public).expect_err("malformed payload");
        assert!(matches!(err, VersioningError::InvalidArgument { .. }));
    }

    #[test]
    fn test_should_sort_newer_ids_first() {
        let generator = VersionIdGenerator::new("RG001");
        let first = generator.next_id();
        let second = generator.next_id();
        assert!(second < first, "newer id must sort before older id");
    }

    #[test]
    fn test_should_sort_infinite_id_after_generated_ids() {
        let codec = VersionIdCodec::new("RG001");
        let generator = VersionIdGenerator::new("RG001");
        let id = generator.next_id();
        let inf = codec.reserved_infinite_id();
        assert!(id < inf, "generated id must sort before the infinite id");
    }

    #[test]
    fn test_should_derive_infinite_id_from_group() {
        let a = VersionIdCodec::new("RG001").reserved_infinite_id();
        let b = VersionIdCodec::new("RG002").reserved_infinite_id();
        assert_ne!(a, b);
        assert!(a.as_str().ends_with("RG001"));
    }
}
