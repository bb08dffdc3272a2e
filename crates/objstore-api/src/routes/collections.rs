//! # Collections
//!
//! - PUT `/buckets/{bucket_id}/collections/{collection_id}`
//! - GET `/buckets/{bucket_id}/collections/{collection_id}`
//! - GET `/buckets/{bucket_id}/collections`
//!
//! A collection's `schema` field applies to its records and must be a
//! valid Draft-4 schema. The collection itself is validated against the
//! bucket's `collection:schema`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use objstore_core::{object_exists_or_404, ObjectStore, ObjectUri, ResourceKind, RouteParams};
use objstore_schema::parent::COLLECTION_SCHEMA_FIELD;
use objstore_schema::validate_from_parent_schema;

use super::{bind_bucket, check_schema_fields, parse_id, written, WriteResponse, SERVER_FIELDS};
use crate::error::AppError;
use crate::extractors::{extract_json, DataEnvelope, ListEnvelope};
use crate::state::AppState;

/// Build the collections router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/buckets/{bucket_id}/collections", get(list_collections))
        .route(
            "/buckets/{bucket_id}/collections/{collection_id}",
            get(get_collection).put(put_collection),
        )
}

async fn put_collection(
    State(state): State<AppState>,
    Path((bucket_id, collection_id)): Path<(String, String)>,
    body: Result<Json<DataEnvelope>, JsonRejection>,
) -> Result<WriteResponse, AppError> {
    let bucket_id = parse_id(bucket_id)?;
    let collection_id = parse_id(collection_id)?;
    let DataEnvelope { data } = extract_json(body)?;

    check_schema_fields(&data, &[COLLECTION_SCHEMA_FIELD])?;

    let mut ctx = state.request_context(RouteParams::in_bucket(
        bucket_id.clone(),
        Some(collection_id.clone()),
    ));
    bind_bucket(&mut ctx, &bucket_id)?;
    validate_from_parent_schema(&data, ResourceKind::Collection, &mut ctx, SERVER_FIELDS)?;

    let parent = ObjectUri::bucket(&bucket_id);
    let existed = state
        .storage
        .get(ResourceKind::Collection, parent.as_str(), collection_id.as_str())?
        .is_some();
    let stored = state.storage.upsert(
        ResourceKind::Collection,
        parent.as_str(),
        collection_id.as_str(),
        data,
    );
    tracing::info!(%bucket_id, %collection_id, existed, "collection written");
    Ok(written(existed, stored))
}

async fn get_collection(
    State(state): State<AppState>,
    Path((bucket_id, collection_id)): Path<(String, String)>,
) -> Result<Json<DataEnvelope>, AppError> {
    let bucket_id = parse_id(bucket_id)?;
    let collection_id = parse_id(collection_id)?;
    let parent = ObjectUri::bucket(&bucket_id);
    let data = object_exists_or_404(
        &state.storage,
        ResourceKind::Collection,
        parent.as_str(),
        collection_id.as_str(),
    )?;
    Ok(Json(DataEnvelope { data }))
}

async fn list_collections(
    State(state): State<AppState>,
    Path(bucket_id): Path<String>,
) -> Result<Json<ListEnvelope>, AppError> {
    let bucket_id = parse_id(bucket_id)?;
    object_exists_or_404(&state.storage, ResourceKind::Bucket, "", bucket_id.as_str())?;
    let parent = ObjectUri::bucket(&bucket_id);
    Ok(Json(ListEnvelope {
        data: state.storage.list(ResourceKind::Collection, parent.as_str()),
    }))
}
