//! # objstore-api: HTTP Host for Parent-Schema Validation
//!
//! A thin Axum service around [`objstore_core::MemoryStore`] exposing the
//! bucket → collection/group → record hierarchy. Writes run through
//! [`objstore_schema::validate_from_parent_schema`] when the
//! `experimental_collection_schema_validation` setting is on.
//!
//! ## API Surface
//!
//! | Path                                              | Module                   |
//! |---------------------------------------------------|--------------------------|
//! | `/buckets/{bid}`                                  | [`routes::buckets`]      |
//! | `/buckets/{bid}/collections/{cid}`                | [`routes::collections`]  |
//! | `/buckets/{bid}/groups/{gid}`                     | [`routes::groups`]       |
//! | `/buckets/{bid}/collections/{cid}/records/{rid}`  | [`routes::records`]      |
//!
//! Errors use the [`error::ErrorBody`] envelope; schema violations are
//! 400 responses with `errno` 107 naming the offending field.

pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Request body ceiling.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Assemble the application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::buckets::router())
        .merge(routes::collections::router())
        .merge(routes::groups::router())
        .merge(routes::records::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new().route("/health/liveness", axum::routing::get(liveness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe.
async fn liveness() -> &'static str {
    "ok"
}
