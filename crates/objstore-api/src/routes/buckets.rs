//! # Buckets
//!
//! - PUT `/buckets/{bucket_id}`: create or replace a bucket
//! - GET `/buckets/{bucket_id}`: fetch a bucket
//! - GET `/buckets`: list buckets
//!
//! Every `"<resource>:schema"` field of the body must be a valid Draft-4
//! schema. Buckets have no parent, so no payload validation happens here.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use objstore_core::{object_exists_or_404, ObjectStore, ResourceKind};

use super::{check_schema_fields, parse_id, written, WriteResponse};
use crate::error::AppError;
use crate::extractors::{extract_json, DataEnvelope, ListEnvelope};
use crate::state::AppState;

/// Build the buckets router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/buckets", get(list_buckets))
        .route("/buckets/{bucket_id}", get(get_bucket).put(put_bucket))
}

async fn put_bucket(
    State(state): State<AppState>,
    Path(bucket_id): Path<String>,
    body: Result<Json<DataEnvelope>, JsonRejection>,
) -> Result<WriteResponse, AppError> {
    let bucket_id = parse_id(bucket_id)?;
    let DataEnvelope { data } = extract_json(body)?;

    let schema_fields: Vec<String> = ResourceKind::ALL
        .iter()
        .map(|kind| kind.schema_field())
        .collect();
    check_schema_fields(&data, &schema_fields)?;

    let existed = state
        .storage
        .get(ResourceKind::Bucket, "", bucket_id.as_str())?
        .is_some();
    let stored = state
        .storage
        .upsert(ResourceKind::Bucket, "", bucket_id.as_str(), data);
    tracing::info!(%bucket_id, existed, "bucket written");
    Ok(written(existed, stored))
}

async fn get_bucket(
    State(state): State<AppState>,
    Path(bucket_id): Path<String>,
) -> Result<Json<DataEnvelope>, AppError> {
    let bucket_id = parse_id(bucket_id)?;
    let data = object_exists_or_404(&state.storage, ResourceKind::Bucket, "", bucket_id.as_str())?;
    Ok(Json(DataEnvelope { data }))
}

async fn list_buckets(State(state): State<AppState>) -> Json<ListEnvelope> {
    Json(ListEnvelope {
        data: state.storage.list(ResourceKind::Bucket, ""),
    })
}
