//! # Schema Checks
//!
//! Confirms that a document is itself a valid Draft-4 JSON-Schema by
//! validating it against the Draft-4 meta-schema. The meta-schema ships
//! with the crate and is compiled once per process.

use std::sync::OnceLock;

use jsonschema::Validator;
use serde_json::Value;

use crate::error::SchemaDefinitionError;
use crate::validate::{draft4_options, last_pointer_segment};

/// The Draft-4 core meta-schema, without its `id` so that it compiles as
/// a standalone document.
const DRAFT4_META_SCHEMA: &str = include_str!("../meta/draft-04.schema.json");

static META_VALIDATOR: OnceLock<Validator> = OnceLock::new();

fn meta_validator() -> Result<&'static Validator, SchemaDefinitionError> {
    if let Some(validator) = META_VALIDATOR.get() {
        return Ok(validator);
    }
    let meta: Value = serde_json::from_str(DRAFT4_META_SCHEMA)
        .map_err(|e| SchemaDefinitionError::MetaSchema(e.to_string()))?;
    let mut opts = draft4_options();
    // `pattern` must hold a regex.
    opts.should_validate_formats(true);
    let validator = opts
        .build(&meta)
        .map_err(|e| SchemaDefinitionError::MetaSchema(e.to_string()))?;
    Ok(META_VALIDATOR.get_or_init(|| validator))
}

/// Check that `candidate` is a valid Draft-4 JSON-Schema.
///
/// # Errors
///
/// Returns [`SchemaDefinitionError::Invalid`] for the first meta-validation
/// failure. The message is prefixed with the last segment of the failing
/// location inside the candidate (`type: ...`), or is the bare validator
/// message when the document root itself is wrong.
pub fn check_schema(candidate: &Value) -> Result<(), SchemaDefinitionError> {
    let meta = meta_validator()?;
    let Some(err) = meta.iter_errors(candidate).next() else {
        return Ok(());
    };
    let message = err.to_string();
    let location = err.instance_path.to_string();
    let message = match last_pointer_segment(&location) {
        Some(segment) => format!("{segment}: {message}"),
        None => message,
    };
    tracing::debug!(%location, "schema rejected by draft-4 meta-schema");
    Err(SchemaDefinitionError::Invalid(message))
}
