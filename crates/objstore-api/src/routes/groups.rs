//! # Groups
//!
//! - PUT `/buckets/{bucket_id}/groups/{group_id}`
//! - GET `/buckets/{bucket_id}/groups/{group_id}`
//!
//! Groups are validated against the bucket's `group:schema`. A group
//! without `members` is stored with an empty member list.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::put;
use axum::{Json, Router};
use serde_json::Value;

use objstore_core::{object_exists_or_404, ObjectStore, ObjectUri, ResourceKind, RouteParams};
use objstore_schema::validate_from_parent_schema;

use super::{bind_bucket, parse_id, written, WriteResponse, SERVER_FIELDS};
use crate::error::{raise_invalid, AppError};
use crate::extractors::{extract_json, DataEnvelope};
use crate::state::AppState;

const MEMBERS_FIELD: &str = "members";

/// Build the groups router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/buckets/{bucket_id}/groups/{group_id}",
        put(put_group).get(get_group),
    )
}

async fn put_group(
    State(state): State<AppState>,
    Path((bucket_id, group_id)): Path<(String, String)>,
    body: Result<Json<DataEnvelope>, JsonRejection>,
) -> Result<WriteResponse, AppError> {
    let bucket_id = parse_id(bucket_id)?;
    let group_id = parse_id(group_id)?;
    let DataEnvelope { mut data } = extract_json(body)?;

    match data.get(MEMBERS_FIELD) {
        None => {}
        Some(Value::Array(members)) if members.iter().all(Value::is_string) => {}
        Some(_) => {
            return Err(raise_invalid(
                "body",
                "data.members",
                "members must be a list of strings",
            ));
        }
    }
    data.entry(MEMBERS_FIELD)
        .or_insert_with(|| Value::Array(Vec::new()));

    let mut ctx = state.request_context(RouteParams::in_bucket(
        bucket_id.clone(),
        Some(group_id.clone()),
    ));
    bind_bucket(&mut ctx, &bucket_id)?;
    validate_from_parent_schema(&data, ResourceKind::Group, &mut ctx, SERVER_FIELDS)?;

    let parent = ObjectUri::bucket(&bucket_id);
    let existed = state
        .storage
        .get(ResourceKind::Group, parent.as_str(), group_id.as_str())?
        .is_some();
    let stored = state
        .storage
        .upsert(ResourceKind::Group, parent.as_str(), group_id.as_str(), data);
    tracing::info!(%bucket_id, %group_id, existed, "group written");
    Ok(written(existed, stored))
}

async fn get_group(
    State(state): State<AppState>,
    Path((bucket_id, group_id)): Path<(String, String)>,
) -> Result<Json<DataEnvelope>, AppError> {
    let bucket_id = parse_id(bucket_id)?;
    let group_id = parse_id(group_id)?;
    let parent = ObjectUri::bucket(&bucket_id);
    let data = object_exists_or_404(
        &state.storage,
        ResourceKind::Group,
        parent.as_str(),
        group_id.as_str(),
    )?;
    Ok(Json(DataEnvelope { data }))
}
