//! # Error Types
//!
//! Errors raised by the foundational layer. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.

use thiserror::Error;

use crate::resource::ResourceKind;

/// An identifier failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The identifier was empty.
    #[error("identifier must not be empty")]
    Empty,

    /// The identifier exceeds the maximum length.
    #[error("identifier exceeds {max} characters: {len}")]
    TooLong {
        /// Maximum permitted length.
        max: usize,
        /// Actual length.
        len: usize,
    },

    /// The identifier contains characters outside `[a-zA-Z0-9_-]` or does
    /// not start with an alphanumeric character.
    #[error("invalid identifier {0:?}")]
    InvalidCharacters(String),

    /// A route parameter required for the resource was not supplied.
    #[error("missing route parameter {0:?}")]
    MissingRouteParam(&'static str),

    /// A resource name did not match any known kind.
    #[error("unknown resource kind {0:?}")]
    UnknownResource(String),
}

/// Errors raised by an [`ObjectStore`](crate::storage::ObjectStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The object does not exist.
    #[error("{resource} {object_id:?} not found")]
    NotFound {
        /// Kind of the missing object.
        resource: ResourceKind,
        /// Parent the lookup was scoped to.
        parent_id: String,
        /// Identifier of the missing object.
        object_id: String,
    },

    /// The backend failed for reasons unrelated to the request.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Whether this error is a 404-equivalent condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
