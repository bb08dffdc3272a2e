//! # Parent Schema Resolution
//!
//! A written object is validated against every schema found on its
//! parents:
//!
//! 1. for records, the enclosing collection's `schema`;
//! 2. the enclosing bucket's `"<resource>:schema"` metadata field.
//!
//! Schemas are tried in that order and the first failure is reported.
//! Parents are read through the request's [`BoundData`] cache so that one
//! request never fetches the same parent twice.
//!
//! [`BoundData`]: objstore_core::BoundData

use std::collections::hash_map::Entry;

use serde_json::Value;

use objstore_core::{
    instance_uri, object_exists_or_404, ObjectId, ObjectMap, RequestContext, ResourceKind,
    RouteParams,
};

use crate::error::{ParentSchemaError, SchemaValidationError};
use crate::validate::validate_schema;

/// Field of a collection holding the schema of its records.
pub const COLLECTION_SCHEMA_FIELD: &str = "schema";

/// Fetch the bucket through the request cache.
fn bound_bucket<'c>(
    ctx: &'c mut RequestContext<'_>,
    bucket_id: &ObjectId,
) -> Result<&'c ObjectMap, ParentSchemaError> {
    let storage = ctx.storage();
    let key = instance_uri(ResourceKind::Bucket, &RouteParams::bucket(bucket_id.clone()))?;
    match ctx.bound_data.buckets.entry(key) {
        Entry::Occupied(entry) => {
            tracing::debug!(uri = %entry.key(), "bucket served from request cache");
            Ok(entry.into_mut())
        }
        Entry::Vacant(entry) => {
            let bucket =
                object_exists_or_404(storage, ResourceKind::Bucket, "", bucket_id.as_str())?;
            tracing::debug!(uri = %entry.key(), "bucket fetched from storage");
            Ok(entry.insert(bucket))
        }
    }
}

/// Fetch the collection through the request cache.
fn bound_collection<'c>(
    ctx: &'c mut RequestContext<'_>,
    bucket_id: &ObjectId,
    collection_id: &ObjectId,
) -> Result<&'c ObjectMap, ParentSchemaError> {
    let storage = ctx.storage();
    let key = instance_uri(
        ResourceKind::Collection,
        &RouteParams::in_bucket(bucket_id.clone(), Some(collection_id.clone())),
    )?;
    match ctx.bound_data.collections.entry(key) {
        Entry::Occupied(entry) => Ok(entry.into_mut()),
        Entry::Vacant(entry) => {
            let parent = instance_uri(ResourceKind::Bucket, &RouteParams::bucket(bucket_id.clone()))?;
            let collection = object_exists_or_404(
                storage,
                ResourceKind::Collection,
                parent.as_str(),
                collection_id.as_str(),
            )?;
            tracing::debug!(uri = %entry.key(), "collection fetched from storage");
            Ok(entry.insert(collection))
        }
    }
}

/// A present, non-null schema value.
fn schema_in(object: &ObjectMap, field: &str) -> Option<Value> {
    object.get(field).filter(|v| !v.is_null()).cloned()
}

/// Collect the schemas applying to a write of `resource`, in validation order.
fn collect_schemas(
    resource: ResourceKind,
    ctx: &mut RequestContext<'_>,
) -> Result<Vec<Value>, ParentSchemaError> {
    let bucket_id = ctx.route.require_bucket_id()?.clone();
    let mut schemas = Vec::with_capacity(2);

    if resource.parent_kind() == Some(ResourceKind::Collection) {
        let collection_id = ctx.route.require_collection_id()?.clone();
        let collection = bound_collection(ctx, &bucket_id, &collection_id)?;
        schemas.extend(schema_in(collection, COLLECTION_SCHEMA_FIELD));
    }

    let bucket = bound_bucket(ctx, &bucket_id)?;
    schemas.extend(schema_in(bucket, &resource.schema_field()));

    Ok(schemas)
}

/// Validate a write of `resource` against the schemas of its parents.
///
/// Does nothing unless `experimental_collection_schema_validation` is set.
/// `ignore_fields` are stripped from the payload and from every schema's
/// `required` list before validating; the caller's data is untouched.
///
/// # Errors
///
/// - [`ParentSchemaError::InvalidPayload`] for the first schema that
///   rejects the payload. Later schemas are not consulted.
/// - [`ParentSchemaError::ParentNotFound`] if the bucket (or, for records,
///   the collection) does not exist.
/// - [`ParentSchemaError::Route`] if the route lacks `bucket_id` or, for
///   records, `collection_id`.
pub fn validate_from_parent_schema(
    data: &ObjectMap,
    resource: ResourceKind,
    ctx: &mut RequestContext<'_>,
    ignore_fields: &[&str],
) -> Result<(), ParentSchemaError> {
    if !ctx.settings().experimental_collection_schema_validation {
        return Ok(());
    }

    let schemas = collect_schemas(resource, ctx)?;
    if schemas.is_empty() {
        return Ok(());
    }

    let payload: ObjectMap = data
        .iter()
        .filter(|(k, _)| !ignore_fields.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let payload = Value::Object(payload);

    for schema in &schemas {
        match validate_schema(&payload, schema, ignore_fields) {
            Ok(()) => {}
            Err(SchemaValidationError::Payload(err)) => {
                tracing::info!(%resource, field = %err.field, "payload rejected by parent schema");
                return Err(ParentSchemaError::InvalidPayload {
                    field: err.field,
                    message: err.message,
                });
            }
            Err(SchemaValidationError::UnusableSchema(reason)) => {
                tracing::error!(%resource, %reason, "stored schema failed to compile");
                return Err(ParentSchemaError::UnusableSchema(reason));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use objstore_core::{MemoryStore, ObjectUri, Settings};
    use serde_json::json;

    fn oid(s: &str) -> ObjectId {
        ObjectId::new(s).unwrap()
    }

    fn obj(v: Value) -> ObjectMap {
        v.as_object().cloned().unwrap()
    }

    fn record_route() -> RouteParams {
        RouteParams::in_collection(oid("blog"), oid("articles"), None)
    }

    #[test]
    fn disabled_feature_touches_nothing() {
        // No bucket exists: an enabled walk would 404.
        let store = MemoryStore::new();
        let mut ctx = RequestContext::new(record_route(), Settings::default(), &store);
        for _ in 0..2 {
            let result =
                validate_from_parent_schema(&obj(json!({})), ResourceKind::Record, &mut ctx, &[]);
            assert!(result.is_ok());
        }
        assert!(ctx.bound_data.buckets.is_empty());
        assert!(ctx.bound_data.collections.is_empty());
    }

    #[test]
    fn missing_bucket_is_parent_not_found() {
        let store = MemoryStore::new();
        let route = RouteParams::in_bucket(oid("blog"), Some(oid("g")));
        let mut ctx = RequestContext::new(route, Settings::with_schema_validation(), &store);
        let err = validate_from_parent_schema(&obj(json!({})), ResourceKind::Group, &mut ctx, &[])
            .unwrap_err();
        assert!(matches!(err, ParentSchemaError::ParentNotFound(_)));
    }

    #[test]
    fn record_route_without_collection_is_a_route_error() {
        let store = MemoryStore::new();
        store.upsert(ResourceKind::Bucket, "", "blog", ObjectMap::new());
        let route = RouteParams::in_bucket(oid("blog"), None);
        let mut ctx = RequestContext::new(route, Settings::with_schema_validation(), &store);
        let err = validate_from_parent_schema(&obj(json!({})), ResourceKind::Record, &mut ctx, &[])
            .unwrap_err();
        assert!(matches!(err, ParentSchemaError::Route(_)));
    }

    #[test]
    fn pre_bound_collection_is_not_refetched() {
        // The collection lives only in the request cache, not in storage.
        let store = MemoryStore::new();
        store.upsert(ResourceKind::Bucket, "", "blog", ObjectMap::new());
        let mut ctx = RequestContext::new(record_route(), Settings::with_schema_validation(), &store);
        ctx.bound_data.collections.insert(
            ObjectUri::collection(&oid("blog"), &oid("articles")),
            obj(json!({"schema": {"type": "object", "required": ["title"]}})),
        );

        let err = validate_from_parent_schema(&obj(json!({})), ResourceKind::Record, &mut ctx, &[])
            .unwrap_err();
        match err {
            ParentSchemaError::InvalidPayload { field, .. } => assert_eq!(field, "title"),
            other => panic!("expected InvalidPayload, got {other:?}"),
        }
    }

    #[test]
    fn null_schema_counts_as_absent() {
        let store = MemoryStore::new();
        store.upsert(ResourceKind::Bucket, "", "blog", obj(json!({"group:schema": null})));
        let route = RouteParams::in_bucket(oid("blog"), Some(oid("g")));
        let mut ctx = RequestContext::new(route, Settings::with_schema_validation(), &store);
        assert!(
            validate_from_parent_schema(&obj(json!({})), ResourceKind::Group, &mut ctx, &[]).is_ok()
        );
    }

    #[test]
    fn ignored_fields_are_stripped_before_validation() {
        let store = MemoryStore::new();
        store.upsert(
            ResourceKind::Bucket,
            "",
            "blog",
            obj(json!({"collection:schema": {
                "type": "object",
                "properties": {"title": {"type": "string"}},
                "required": ["id"],
                "additionalProperties": false
            }})),
        );
        let route = RouteParams::in_bucket(oid("blog"), Some(oid("c")));
        let mut ctx = RequestContext::new(route, Settings::with_schema_validation(), &store);
        let data = obj(json!({"id": "c", "last_modified": 1, "title": "x"}));
        let result = validate_from_parent_schema(
            &data,
            ResourceKind::Collection,
            &mut ctx,
            &["id", "last_modified"],
        );
        assert!(result.is_ok(), "{result:?}");
        assert_eq!(data.len(), 3);
    }
}
