//! Normalized atlas identifiers

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier shared by taxonomy nodes and destinations.
///
/// Taxonomy nodes carry it as `atlas_node_id`, destinations as `atlas_id`.
/// Two ids compare by their lookup key so that a description is found
/// regardless of which attribute the value came from: surrounding whitespace
/// is trimmed and purely numeric values are canonicalized (`"042"` and `"42"`
/// have the same key). The trimmed source text is kept as well and is what
/// [`Display`](fmt::Display) writes, so page names follow the document.
#[derive(Debug, Clone)]
pub struct AtlasId {
    text: String,
    key: String,
}

impl AtlasId {
    /// Normalize a raw attribute value.
    ///
    /// Returns `None` for a blank value, which counts as an absent id.
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        let key = if text.bytes().all(|b| b.is_ascii_digit()) {
            match text.trim_start_matches('0') {
                "" => "0",
                digits => digits,
            }
        } else {
            text
        };
        Some(Self {
            text: text.to_string(),
            key: key.to_string(),
        })
    }

    /// Whether this is the zero id, which destinations use for "no node".
    pub fn is_zero(&self) -> bool {
        self.key == "0"
    }

    /// The id as written in the document, trimmed.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The canonical form used for equality and lookups.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for AtlasId {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for AtlasId {}

impl Hash for AtlasId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for AtlasId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AtlasId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for AtlasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<u64> for AtlasId {
    fn from(value: u64) -> Self {
        let text = value.to_string();
        Self {
            key: text.clone(),
            text,
        }
    }
}
