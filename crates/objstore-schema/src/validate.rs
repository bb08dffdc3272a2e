//! # Payload Validation
//!
//! Validates one payload against one schema with Draft-4 semantics.
//!
//! ## Required fields
//!
//! Draft-4 forbids an empty `required` array. Callers may ask for some
//! fields to be ignored (server-managed fields such as `id`), which can
//! leave `required` empty once those names are removed. In that case the
//! keyword is dropped from the working copy instead. The caller's schema
//! is never modified.
//!
//! ## Field attribution
//!
//! The reported field is, in order of preference: the last segment of the
//! failing instance location; the property named by the failing keyword
//! (a missing required property, an unexpected additional property); the
//! last segment of the schema path.

use std::borrow::Cow;

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, Retrieve, Uri, ValidationError, ValidationOptions};
use serde_json::Value;

use crate::error::{PayloadError, SchemaValidationError};

/// Retriever that refuses every external `$ref`.
///
/// Stored schemas are user supplied; resolving their references over the
/// network would let a write request trigger outbound fetches.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external reference {} is not resolvable", uri.as_str()).into())
    }
}

/// Options shared by every validator compiled in this crate.
pub(crate) fn draft4_options() -> ValidationOptions {
    let mut opts = jsonschema::options();
    opts.with_draft(Draft::Draft4);
    opts.with_retriever(OfflineRetriever);
    opts
}

/// Last segment of a JSON Pointer, unescaped. `None` for the root pointer.
pub(crate) fn last_pointer_segment(pointer: &str) -> Option<String> {
    if pointer.is_empty() {
        return None;
    }
    let segment = pointer.rsplit('/').next()?;
    Some(segment.replace("~1", "/").replace("~0", "~"))
}

/// The schema actually used for validation once `ignore_fields` are
/// removed from `required`.
///
/// Borrows `schema` unchanged when it has no `required` array.
pub fn effective_schema<'s>(schema: &'s Value, ignore_fields: &[&str]) -> Cow<'s, Value> {
    let Some(obj) = schema.as_object() else {
        return Cow::Borrowed(schema);
    };
    let Some(required) = obj.get("required").and_then(Value::as_array) else {
        return Cow::Borrowed(schema);
    };

    let kept: Vec<Value> = required
        .iter()
        .filter(|f| !f.as_str().is_some_and(|name| ignore_fields.contains(&name)))
        .cloned()
        .collect();

    let mut copy = obj.clone();
    if kept.is_empty() {
        copy.remove("required");
    } else {
        copy.insert("required".to_string(), Value::Array(kept));
    }
    Cow::Owned(Value::Object(copy))
}

/// Property named by the failing keyword, when the keyword names one.
fn keyword_field(kind: &ValidationErrorKind) -> Option<String> {
    match kind {
        ValidationErrorKind::Required { property } => match property {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        },
        ValidationErrorKind::AdditionalProperties { unexpected } => unexpected.first().cloned(),
        _ => None,
    }
}

impl PayloadError {
    fn from_validation_error(err: &ValidationError<'_>) -> Self {
        let field = last_pointer_segment(&err.instance_path.to_string())
            .or_else(|| keyword_field(&err.kind))
            .or_else(|| last_pointer_segment(&err.schema_path.to_string()))
            .unwrap_or_default();
        Self {
            field,
            message: err.to_string(),
        }
    }
}

/// Validate `data` against `schema`, ignoring `ignore_fields` in `required`.
///
/// # Errors
///
/// - [`SchemaValidationError::Payload`] with the first failure.
/// - [`SchemaValidationError::UnusableSchema`] if the schema does not
///   compile (for example it references an external document).
pub fn validate_schema(
    data: &Value,
    schema: &Value,
    ignore_fields: &[&str],
) -> Result<(), SchemaValidationError> {
    let schema = effective_schema(schema, ignore_fields);
    let validator = draft4_options()
        .build(&schema)
        .map_err(|e| SchemaValidationError::UnusableSchema(e.to_string()))?;

    let first = validator
        .iter_errors(data)
        .next()
        .map(|e| PayloadError::from_validation_error(&e));
    match first {
        None => Ok(()),
        Some(err) => Err(SchemaValidationError::Payload(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_err(result: Result<(), SchemaValidationError>) -> PayloadError {
        match result {
            Err(SchemaValidationError::Payload(e)) => e,
            other => panic!("expected payload error, got {other:?}"),
        }
    }

    #[test]
    fn pointer_segments() {
        assert_eq!(last_pointer_segment(""), None);
        assert_eq!(last_pointer_segment("/title").as_deref(), Some("title"));
        assert_eq!(last_pointer_segment("/a/b/0").as_deref(), Some("0"));
        assert_eq!(last_pointer_segment("/a~1b").as_deref(), Some("a/b"));
        assert_eq!(last_pointer_segment("/a~0b").as_deref(), Some("a~b"));
    }

    #[test]
    fn ignored_required_field_is_dropped_entirely() {
        let schema = json!({"required": ["x"]});
        let effective = effective_schema(&schema, &["x"]);
        assert!(effective.get("required").is_none());
        assert!(validate_schema(&json!({}), &schema, &["x"]).is_ok());
    }

    #[test]
    fn partially_ignored_required_keeps_the_rest() {
        let schema = json!({"required": ["id", "title"]});
        let effective = effective_schema(&schema, &["id"]);
        assert_eq!(effective["required"], json!(["title"]));
    }

    #[test]
    fn caller_schema_is_not_mutated() {
        let schema = json!({"type": "object", "required": ["x"]});
        let before = schema.clone();
        let _ = validate_schema(&json!({}), &schema, &["x"]);
        assert_eq!(schema, before);
    }

    #[test]
    fn schema_without_required_is_borrowed() {
        let schema = json!({"type": "object"});
        assert!(matches!(effective_schema(&schema, &["id"]), Cow::Borrowed(_)));
    }

    #[test]
    fn root_enum_failure_reports_the_keyword() {
        // Root-level keywords other than `required` and `additionalProperties`
        // name no property, so attribution falls through to the schema path.
        let schema = json!({"enum": [{"kind": "a"}, {"kind": "b"}]});
        let err = payload_err(validate_schema(&json!({"kind": "c"}), &schema, &[]));
        assert_eq!(err.field, "enum");
    }

    #[test]
    fn missing_required_reports_that_field() {
        let schema = json!({"type": "object", "required": ["y"]});
        let err = payload_err(validate_schema(&json!({"x": 1}), &schema, &[]));
        assert_eq!(err.field, "y");
        assert!(!err.message.is_empty());
    }

    #[test]
    fn nested_failure_reports_instance_location() {
        let schema = json!({
            "type": "object",
            "properties": {"title": {"type": "string"}}
        });
        let err = payload_err(validate_schema(&json!({"title": 12}), &schema, &[]));
        assert_eq!(err.field, "title");
    }

    #[test]
    fn additional_property_is_named() {
        let schema = json!({
            "type": "object",
            "properties": {"title": {"type": "string"}},
            "additionalProperties": false
        });
        let err = payload_err(validate_schema(&json!({"title": "a", "extra": 1}), &schema, &[]));
        assert_eq!(err.field, "extra");
    }

    #[test]
    fn root_type_failure_falls_back_to_schema_path() {
        let err = payload_err(validate_schema(&json!([1]), &json!({"type": "object"}), &[]));
        assert_eq!(err.field, "type");
    }

    #[test]
    fn conforming_payload_passes() {
        let schema = json!({
            "type": "object",
            "properties": {"title": {"type": "string"}},
            "required": ["title"]
        });
        assert!(validate_schema(&json!({"title": "hello"}), &schema, &[]).is_ok());
    }

    #[test]
    fn external_reference_is_unusable() {
        let schema = json!({"$ref": "http://example.com/remote.json"});
        let result = validate_schema(&json!({}), &schema, &[]);
        assert!(matches!(result, Err(SchemaValidationError::UnusableSchema(_))));
    }

    #[test]
    fn draft4_boolean_exclusive_minimum_applies() {
        let schema = json!({"properties": {"n": {"minimum": 5, "exclusiveMinimum": true}}});
        assert!(validate_schema(&json!({"n": 5}), &schema, &[]).is_err());
        assert!(validate_schema(&json!({"n": 6}), &schema, &[]).is_ok());
    }
}
