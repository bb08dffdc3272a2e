//! # Records
//!
//! - POST `/buckets/{bucket_id}/collections/{collection_id}/records`
//! - GET  `/buckets/{bucket_id}/collections/{collection_id}/records`
//! - PUT  `/buckets/{bucket_id}/collections/{collection_id}/records/{record_id}`
//! - GET  `/buckets/{bucket_id}/collections/{collection_id}/records/{record_id}`
//! - DELETE `/buckets/{bucket_id}/collections/{collection_id}/records/{record_id}`
//!
//! Records are validated against the collection's `schema` first, then
//! the bucket's `record:schema`. When the collection carries a schema,
//! the stored record's `schema` field holds the collection's
//! `last_modified` at write time.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};

use objstore_core::storage::{ID_FIELD, MODIFIED_FIELD};
use objstore_core::{
    object_exists_or_404, ObjectId, ObjectMap, ObjectStore, ObjectUri, ResourceKind, RouteParams,
};
use objstore_schema::parent::COLLECTION_SCHEMA_FIELD;
use objstore_schema::validate_from_parent_schema;

use super::{bind_collection, parse_id, written, WriteResponse};
use crate::error::AppError;
use crate::extractors::{extract_json, DataEnvelope, ListEnvelope};
use crate::state::AppState;

/// Fields of a record the collection schema never sees.
const RECORD_IGNORED_FIELDS: &[&str] = &[ID_FIELD, MODIFIED_FIELD, COLLECTION_SCHEMA_FIELD];

/// Build the records router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/buckets/{bucket_id}/collections/{collection_id}/records",
            get(list_records).post(create_record),
        )
        .route(
            "/buckets/{bucket_id}/collections/{collection_id}/records/{record_id}",
            put(put_record).get(get_record).delete(delete_record),
        )
}

async fn create_record(
    State(state): State<AppState>,
    Path((bucket_id, collection_id)): Path<(String, String)>,
    body: Result<Json<DataEnvelope>, JsonRejection>,
) -> Result<WriteResponse, AppError> {
    let bucket_id = parse_id(bucket_id)?;
    let collection_id = parse_id(collection_id)?;
    let DataEnvelope { data } = extract_json(body)?;
    write_record(&state, bucket_id, collection_id, ObjectId::generate(), data)
}

async fn put_record(
    State(state): State<AppState>,
    Path((bucket_id, collection_id, record_id)): Path<(String, String, String)>,
    body: Result<Json<DataEnvelope>, JsonRejection>,
) -> Result<WriteResponse, AppError> {
    let bucket_id = parse_id(bucket_id)?;
    let collection_id = parse_id(collection_id)?;
    let record_id = parse_id(record_id)?;
    let DataEnvelope { data } = extract_json(body)?;
    write_record(&state, bucket_id, collection_id, record_id, data)
}

fn write_record(
    state: &AppState,
    bucket_id: ObjectId,
    collection_id: ObjectId,
    record_id: ObjectId,
    mut data: ObjectMap,
) -> Result<WriteResponse, AppError> {
    let mut ctx = state.request_context(RouteParams::in_collection(
        bucket_id.clone(),
        collection_id.clone(),
        Some(record_id.clone()),
    ));
    let collection = bind_collection(&mut ctx, &bucket_id, &collection_id)?;
    validate_from_parent_schema(&data, ResourceKind::Record, &mut ctx, RECORD_IGNORED_FIELDS)?;

    // The schema version is server-managed.
    data.remove(COLLECTION_SCHEMA_FIELD);
    let has_schema = collection
        .get(COLLECTION_SCHEMA_FIELD)
        .is_some_and(|schema| !schema.is_null());
    if ctx.settings().experimental_collection_schema_validation && has_schema {
        if let Some(version) = collection.get(MODIFIED_FIELD) {
            data.insert(COLLECTION_SCHEMA_FIELD.to_string(), version.clone());
        }
    }

    let parent = ObjectUri::collection(&bucket_id, &collection_id);
    let existed = state
        .storage
        .get(ResourceKind::Record, parent.as_str(), record_id.as_str())?
        .is_some();
    let stored = state
        .storage
        .upsert(ResourceKind::Record, parent.as_str(), record_id.as_str(), data);
    tracing::info!(%bucket_id, %collection_id, %record_id, existed, "record written");
    Ok(written(existed, stored))
}

async fn get_record(
    State(state): State<AppState>,
    Path((bucket_id, collection_id, record_id)): Path<(String, String, String)>,
) -> Result<Json<DataEnvelope>, AppError> {
    let bucket_id = parse_id(bucket_id)?;
    let collection_id = parse_id(collection_id)?;
    let record_id = parse_id(record_id)?;
    let parent = ObjectUri::collection(&bucket_id, &collection_id);
    let data = object_exists_or_404(
        &state.storage,
        ResourceKind::Record,
        parent.as_str(),
        record_id.as_str(),
    )?;
    Ok(Json(DataEnvelope { data }))
}

async fn delete_record(
    State(state): State<AppState>,
    Path((bucket_id, collection_id, record_id)): Path<(String, String, String)>,
) -> Result<Json<DataEnvelope>, AppError> {
    let bucket_id = parse_id(bucket_id)?;
    let collection_id = parse_id(collection_id)?;
    let record_id = parse_id(record_id)?;
    let parent = ObjectUri::collection(&bucket_id, &collection_id);
    let data = state
        .storage
        .delete(ResourceKind::Record, parent.as_str(), record_id.as_str())
        .ok_or_else(|| {
            AppError::NotFound(format!("record {record_id} not found in {parent}"))
        })?;
    tracing::info!(%bucket_id, %collection_id, %record_id, "record deleted");
    Ok(Json(DataEnvelope { data }))
}

async fn list_records(
    State(state): State<AppState>,
    Path((bucket_id, collection_id)): Path<(String, String)>,
) -> Result<Json<ListEnvelope>, AppError> {
    let bucket_id = parse_id(bucket_id)?;
    let collection_id = parse_id(collection_id)?;
    let mut ctx = state.request_context(RouteParams::in_collection(
        bucket_id.clone(),
        collection_id.clone(),
        None,
    ));
    bind_collection(&mut ctx, &bucket_id, &collection_id)?;
    let parent = ObjectUri::collection(&bucket_id, &collection_id);
    Ok(Json(ListEnvelope {
        data: state.storage.list(ResourceKind::Record, parent.as_str()),
    }))
}
