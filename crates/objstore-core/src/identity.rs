//! # Object Identifiers
//!
//! Buckets, collections, groups and records are all addressed by an
//! [`ObjectId`]: a non-empty string of ASCII letters, digits, `_` and `-`,
//! starting with a letter or digit. Identifiers end up in instance URIs
//! and cache keys, so `/` and other separators are rejected at the edge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IdentifierError;

/// Maximum identifier length.
pub const MAX_ID_LEN: usize = 256;

/// Validated identifier of a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Validate and wrap an identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, IdentifierError> {
        let id = id.into();
        if id.is_empty() {
            return Err(IdentifierError::Empty);
        }
        if id.len() > MAX_ID_LEN {
            return Err(IdentifierError::TooLong {
                max: MAX_ID_LEN,
                len: id.len(),
            });
        }
        let mut chars = id.chars();
        let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphanumeric());
        let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !(first_ok && rest_ok) {
            return Err(IdentifierError::InvalidCharacters(id));
        }
        Ok(Self(id))
    }

    /// Generate a fresh random identifier (UUIDv4), used for records
    /// created without a client-chosen id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ObjectId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ObjectId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_ids() {
        for id in ["blog", "a", "articles-2024", "x_y_z", "0abc"] {
            assert!(ObjectId::new(id).is_ok(), "{id} should be valid");
        }
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(ObjectId::new(""), Err(IdentifierError::Empty));
    }

    #[test]
    fn rejects_separators_and_leading_punctuation() {
        for id in ["a/b", "-lead", "_lead", "has space", "dot.ted", "é"] {
            assert!(
                matches!(ObjectId::new(id), Err(IdentifierError::InvalidCharacters(_))),
                "{id} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_overlong() {
        let id = "a".repeat(MAX_ID_LEN + 1);
        assert!(matches!(
            ObjectId::new(id),
            Err(IdentifierError::TooLong { .. })
        ));
    }

    #[test]
    fn generated_ids_are_valid_and_distinct() {
        let a = ObjectId::generate();
        let b = ObjectId::generate();
        assert_ne!(a, b);
        assert!(ObjectId::new(a.as_str()).is_ok());
    }

    #[test]
    fn serde_rejects_invalid_ids() {
        let ok: Result<ObjectId, _> = serde_json::from_str("\"blog\"");
        assert!(ok.is_ok());
        let bad: Result<ObjectId, _> = serde_json::from_str("\"a/b\"");
        assert!(bad.is_err());
    }
}
