//! # objstore-schema: JSON Schema Validation for Stored Objects
//!
//! Buckets and collections may carry JSON-Schema documents that constrain
//! the objects written beneath them. This crate checks those documents
//! when they are assigned and validates written objects against them.
//!
//! ## Schema Definition Time (`check`, `mapping`)
//!
//! - [`check_schema`]: confirms a candidate is a valid Draft-4 schema.
//! - [`JsonSchemaMapping`]: field type for schema-valued fields; runs
//!   [`check_schema`] while deserializing. Empty or absent values pass
//!   through untouched.
//!
//! ## Write Time (`validate`, `parent`)
//!
//! - [`validate_schema`]: validates one payload against one schema,
//!   reporting the failing field.
//! - [`validate_from_parent_schema`]: collects the collection schema (for
//!   records) and the bucket's `"<resource>:schema"` and validates the
//!   payload against each in turn. Gated by
//!   `experimental_collection_schema_validation`.
//!
//! ## Crate Policy
//!
//! - Depends only on `objstore-core` internally.
//! - Draft-4 semantics are delegated to the `jsonschema` crate.
//! - `$ref`s to remote documents are never fetched.

pub mod check;
pub mod error;
pub mod mapping;
pub mod parent;
pub mod validate;

pub use check::check_schema;
pub use error::{
    InvalidField, ParentSchemaError, PayloadError, SchemaDefinitionError, SchemaValidationError,
};
pub use mapping::JsonSchemaMapping;
pub use parent::validate_from_parent_schema;
pub use validate::{effective_schema, validate_schema};
