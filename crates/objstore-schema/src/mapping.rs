//! # Schema-Valued Fields
//!
//! [`JsonSchemaMapping`] is the type of any field that holds a JSON-Schema
//! document: a collection's `schema`, a bucket's `record:schema`, and so
//! on. Deserializing one first reads a plain mapping (unknown keys kept,
//! order kept), then checks it against the Draft-4 meta-schema and
//! compiles it. A schema that is well-formed but cannot be compiled (a
//! dangling `#/definitions/...` pointer, a reference to another document)
//! is rejected here rather than on every later write. An empty mapping is
//! accepted as is; absent and `null` values are treated as "no schema".

use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use serde_json::Value;

use objstore_core::ObjectMap;

use crate::check::check_schema;
use crate::error::{InvalidField, SchemaDefinitionError};
use crate::validate::draft4_options;

/// A mapping known to be a valid Draft-4 JSON-Schema, or empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonSchemaMapping(ObjectMap);

impl JsonSchemaMapping {
    /// Check and compile `map`, then wrap it. Empty maps skip both.
    pub fn new(map: ObjectMap) -> Result<Self, SchemaDefinitionError> {
        if map.is_empty() {
            return Ok(Self(map));
        }
        let schema = Value::Object(map.clone());
        check_schema(&schema)?;
        if let Err(e) = draft4_options().build(&schema) {
            tracing::debug!(error = %e, "schema passed the meta-schema but does not compile");
            return Err(SchemaDefinitionError::Invalid(e.to_string()));
        }
        Ok(Self(map))
    }

    /// Deserialize the optional schema-valued field `name`.
    ///
    /// Returns `Ok(None)` for an absent or `null` value, so optional fields
    /// pass through. A non-mapping value or a mapping that fails the
    /// Draft-4 check is reported against `name`.
    pub fn deserialize_field(name: &str, value: Option<Value>) -> Result<Option<Self>, InvalidField> {
        let map = match value {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(InvalidField {
                    name: name.to_string(),
                    description: format!("{other} is not a mapping type"),
                })
            }
        };
        Self::new(map).map(Some).map_err(|e| InvalidField {
            name: name.to_string(),
            description: e.to_string(),
        })
    }
}

impl From<JsonSchemaMapping> for Value {
    fn from(schema: JsonSchemaMapping) -> Self {
        Value::Object(schema.0)
    }
}

impl Serialize for JsonSchemaMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for JsonSchemaMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = ObjectMap::deserialize(deserializer)?;
        Self::new(map).map_err(de::Error::custom)
    }
}
