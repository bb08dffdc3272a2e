//! # Request Bodies
//!
//! Objects travel in a `{"data": {...}}` envelope. Deserialization
//! failures are mapped to [`AppError::BadRequest`].

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

use objstore_core::ObjectMap;

use crate::error::AppError;

/// `{"data": {...}}` request and response envelope.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DataEnvelope {
    #[serde(default)]
    pub data: ObjectMap,
}

/// `{"data": [...]}` list response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListEnvelope {
    pub data: Vec<ObjectMap>,
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}
