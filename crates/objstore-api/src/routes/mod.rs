//! # Route Modules
//!
//! Each module defines an Axum Router for one resource kind. Routers are
//! assembled in [`crate::app`].

pub mod buckets;
pub mod collections;
pub mod groups;
pub mod records;

use axum::http::StatusCode;
use axum::Json;

use objstore_core::storage::{ID_FIELD, MODIFIED_FIELD};
use objstore_core::{
    instance_uri, object_exists_or_404, ObjectId, ObjectMap, RequestContext, ResourceKind,
    RouteParams,
};
use objstore_schema::JsonSchemaMapping;

use crate::error::AppError;
use crate::extractors::DataEnvelope;

/// Fields managed by the server, never validated against user schemas.
pub(crate) const SERVER_FIELDS: &[&str] = &[ID_FIELD, MODIFIED_FIELD];

/// Response of a write: 201 for a new object, 200 for a replacement.
pub(crate) type WriteResponse = (StatusCode, Json<DataEnvelope>);

pub(crate) fn written(existed: bool, stored: ObjectMap) -> WriteResponse {
    let status = if existed { StatusCode::OK } else { StatusCode::CREATED };
    (status, Json(DataEnvelope { data: stored }))
}

/// Parse a path segment into an identifier.
pub(crate) fn parse_id(raw: String) -> Result<ObjectId, AppError> {
    Ok(ObjectId::new(raw)?)
}

/// Run every schema-valued field of `data` through [`JsonSchemaMapping`].
pub(crate) fn check_schema_fields<S: AsRef<str>>(data: &ObjectMap, fields: &[S]) -> Result<(), AppError> {
    for field in fields {
        let field = field.as_ref();
        JsonSchemaMapping::deserialize_field(field, data.get(field).cloned())?;
    }
    Ok(())
}

/// Fetch the bucket of this request (404 if absent) and bind it into the
/// request cache.
pub(crate) fn bind_bucket(ctx: &mut RequestContext<'_>, bucket_id: &ObjectId) -> Result<ObjectMap, AppError> {
    let bucket = object_exists_or_404(ctx.storage(), ResourceKind::Bucket, "", bucket_id.as_str())?;
    let key = instance_uri(ResourceKind::Bucket, &RouteParams::bucket(bucket_id.clone()))?;
    ctx.bound_data.buckets.insert(key, bucket.clone());
    Ok(bucket)
}

/// Fetch the collection of this request (404 if it or its bucket is
/// absent) and bind both into the request cache.
pub(crate) fn bind_collection(
    ctx: &mut RequestContext<'_>,
    bucket_id: &ObjectId,
    collection_id: &ObjectId,
) -> Result<ObjectMap, AppError> {
    bind_bucket(ctx, bucket_id)?;
    let parent = instance_uri(ResourceKind::Bucket, &RouteParams::bucket(bucket_id.clone()))?;
    let collection = object_exists_or_404(
        ctx.storage(),
        ResourceKind::Collection,
        parent.as_str(),
        collection_id.as_str(),
    )?;
    let key = instance_uri(
        ResourceKind::Collection,
        &RouteParams::in_bucket(bucket_id.clone(), Some(collection_id.clone())),
    )?;
    ctx.bound_data.collections.insert(key, collection.clone());
    Ok(collection)
}
