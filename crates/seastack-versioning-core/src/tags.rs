//! Object tag resolution for write operations.
//!
//! A write either carries a `x-amz-tagging` style header (URL-encoded
//! `key=value` pairs) or inherits the tags already present on the record it
//! replaces. Resolution never fails: malformed pairs are skipped.

use std::collections::HashMap;

use seastack_versioning_model::ObjectMetadataRecord;

/// Tags to attach to the record produced by a write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagContext {
    /// Resolved tag set, possibly empty.
    pub tags: HashMap<String, String>,
}

impl TagContext {
    /// Resolve the tag set for a write.
    ///
    /// A present `request_tagging` header wins, even when empty; otherwise
    /// the existing record's tags carry over.
    #[must_use]
    pub fn resolve(request_tagging: Option<&str>, existing: Option<&ObjectMetadataRecord>) -> Self {
        match request_tagging {
            Some(header) => Self {
                tags: parse_tagging_header(header),
            },
            None => Self {
                tags: existing.map(|record| record.tags.clone()).unwrap_or_default(),
            },
        }
    }
}

/// Parse a URL-encoded tagging header into a tag map.
///
/// Pairs without a `=` and pairs with an empty key are skipped.
#[must_use]
pub fn parse_tagging_header(header: &str) -> HashMap<String, String> {
    header
        .split('&')
        .filter(|s| !s.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let key = url_decode(key);
            if key.is_empty() {
                return None;
            }
            Some((key, url_decode(value)))
        })
        .collect()
}

fn url_decode(input: &str) -> String {
    percent_encoding::percent_decode_str(input)
        .decode_utf8_lossy()
        .into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
