//! # Schema Error Types
//!
//! One error type per stage:
//!
//! - [`SchemaDefinitionError`] / [`InvalidField`]: a schema being assigned
//!   is not valid Draft-4.
//! - [`SchemaValidationError`]: a payload failed one schema.
//! - [`ParentSchemaError`]: the outcome of a full parent walk, ready to be
//!   mapped onto a client response.

use objstore_core::{IdentifierError, StorageError};
use thiserror::Error;

/// A candidate document is not a valid Draft-4 JSON-Schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaDefinitionError {
    /// Meta-validation failed. The message names the offending keyword
    /// when the failure is below the document root.
    #[error("{0}")]
    Invalid(String),

    /// The Draft-4 meta-schema itself failed to compile.
    #[error("meta-schema unavailable: {0}")]
    MetaSchema(String),
}

/// Field-level invalid-value error raised while deserializing a
/// schema-valued field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{name}: {description}")]
pub struct InvalidField {
    /// Name of the field holding the schema.
    pub name: String,
    /// Why the value was rejected.
    pub description: String,
}

/// A payload did not satisfy a schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct PayloadError {
    /// Best-effort name of the failing field.
    pub field: String,
    /// Validator message.
    pub message: String,
}

/// Failure of [`validate_schema`](crate::validate_schema).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaValidationError {
    /// The payload does not conform.
    #[error("invalid payload: {0}")]
    Payload(PayloadError),

    /// The schema could not be compiled into a validator.
    #[error("schema cannot be used for validation: {0}")]
    UnusableSchema(String),
}

/// Failure of [`validate_from_parent_schema`](crate::validate_from_parent_schema).
#[derive(Error, Debug)]
pub enum ParentSchemaError {
    /// The payload failed the first schema that rejected it (400).
    #[error("{field}: {message}")]
    InvalidPayload {
        /// Failing field.
        field: String,
        /// Validator message.
        message: String,
    },

    /// A parent bucket or collection does not exist (404).
    #[error("parent not found: {0}")]
    ParentNotFound(#[source] StorageError),

    /// Storage failed for another reason.
    #[error(transparent)]
    Storage(StorageError),

    /// A stored schema could not be compiled.
    #[error("stored schema is unusable: {0}")]
    UnusableSchema(String),

    /// The request route lacks an identifier the walk needs.
    #[error(transparent)]
    Route(#[from] IdentifierError),
}

impl From<StorageError> for ParentSchemaError {
    fn from(err: StorageError) -> Self {
        if err.is_not_found() {
            Self::ParentNotFound(err)
        } else {
            Self::Storage(err)
        }
    }
}
