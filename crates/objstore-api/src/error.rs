//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps schema, storage and identifier errors to HTTP status codes and a
//! JSON body of the form:
//!
//! ```json
//! {"code": 400, "errno": 107, "error": "Invalid parameters",
//!  "message": "title in body: \"title\" is a required property",
//!  "details": [{"location": "body", "name": "title", "description": "..."}]}
//! ```
//!
//! Internal error details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use objstore_core::IdentifierError;
use objstore_schema::{InvalidField, ParentSchemaError};

/// Numeric error codes carried in the `errno` field.
pub mod errno {
    pub const BAD_JSON: u16 = 106;
    pub const INVALID_PARAMETERS: u16 = 107;
    pub const INVALID_RESOURCE_ID: u16 = 110;
    pub const MISSING_RESOURCE: u16 = 111;
    pub const UNDEFINED: u16 = 999;
}

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// HTTP status code.
    pub code: u16,
    /// Machine-readable error number.
    pub errno: u16,
    /// Short reason phrase.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Per-parameter details, present only for invalid parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ErrorDetail>>,
}

/// One invalid parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Where the parameter was found (`body`, `path`, `querystring`).
    pub location: String,
    /// Parameter or field name.
    pub name: String,
    /// Why it was rejected.
    pub description: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// A parameter or body field failed validation (400).
    #[error("{} in {}: {}", .0.name, .0.location, .0.description)]
    InvalidParameters(ErrorDetail),

    /// Request body is not valid JSON for the endpoint (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Path identifier is malformed (400).
    #[error("invalid resource id: {0}")]
    InvalidResourceId(String),

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Build the 400 error reported for an invalid parameter.
///
/// This is the single channel through which schema failures reach clients.
pub fn raise_invalid(location: &str, name: &str, description: &str) -> AppError {
    AppError::InvalidParameters(ErrorDetail {
        location: location.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    })
}

impl AppError {
    /// Return the HTTP status code, errno and reason phrase for this error.
    fn status_and_code(&self) -> (StatusCode, u16, &'static str) {
        match self {
            Self::InvalidParameters(_) => (
                StatusCode::BAD_REQUEST,
                errno::INVALID_PARAMETERS,
                "Invalid parameters",
            ),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, errno::BAD_JSON, "Bad Request"),
            Self::InvalidResourceId(_) => (
                StatusCode::BAD_REQUEST,
                errno::INVALID_RESOURCE_ID,
                "Invalid parameters",
            ),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, errno::MISSING_RESOURCE, "Not Found"),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                errno::UNDEFINED,
                "Internal Server Error",
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, number, reason) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if let Self::Internal(_) = &self {
            tracing::error!(error = %self, "internal server error");
        }

        let details = match self {
            Self::InvalidParameters(detail) => Some(vec![detail]),
            _ => None,
        };

        let body = ErrorBody {
            code: status.as_u16(),
            errno: number,
            error: reason.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Schema failures become 400s naming the field; missing parents 404.
impl From<ParentSchemaError> for AppError {
    fn from(err: ParentSchemaError) -> Self {
        match err {
            ParentSchemaError::InvalidPayload { field, message } => {
                raise_invalid("body", &field, &message)
            }
            ParentSchemaError::ParentNotFound(inner) => Self::NotFound(inner.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// A schema-valued body field that is not a valid schema.
impl From<InvalidField> for AppError {
    fn from(err: InvalidField) -> Self {
        raise_invalid("body", &format!("data.{}", err.name), &err.description)
    }
}

impl From<IdentifierError> for AppError {
    fn from(err: IdentifierError) -> Self {
        Self::InvalidResourceId(err.to_string())
    }
}

impl From<objstore_core::StorageError> for AppError {
    fn from(err: objstore_core::StorageError) -> Self {
        if err.is_not_found() {
            Self::NotFound(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use objstore_core::{ResourceKind, StorageError};

    #[test]
    fn invalid_parameters_status_code() {
        let err = raise_invalid("body", "title", "required");
        let (status, number, _) = err.status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(number, errno::INVALID_PARAMETERS);
    }

    #[test]
    fn invalid_parameters_message_format() {
        let err = raise_invalid("body", "title", "\"title\" is a required property");
        assert_eq!(
            err.to_string(),
            "title in body: \"title\" is a required property"
        );
    }

    #[test]
    fn not_found_status_code() {
        let (status, number, _) = AppError::NotFound("bucket".into()).status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(number, errno::MISSING_RESOURCE);
    }

    #[test]
    fn payload_error_maps_to_body_field() {
        let err = AppError::from(ParentSchemaError::InvalidPayload {
            field: "title".into(),
            message: "bad".into(),
        });
        match err {
            AppError::InvalidParameters(detail) => {
                assert_eq!(detail.location, "body");
                assert_eq!(detail.name, "title");
                assert_eq!(detail.description, "bad");
            }
            other => panic!("expected InvalidParameters, got {other:?}"),
        }
    }

    #[test]
    fn parent_not_found_maps_to_404() {
        let err = AppError::from(ParentSchemaError::ParentNotFound(StorageError::NotFound {
            resource: ResourceKind::Bucket,
            parent_id: String::new(),
            object_id: "blog".into(),
        }));
        let (status, _, _) = err.status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn unusable_schema_is_internal() {
        let err = AppError::from(ParentSchemaError::UnusableSchema("bad ref".into()));
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn invalid_field_is_prefixed_with_data() {
        let err = AppError::from(InvalidField {
            name: "schema".into(),
            description: "type: nope".into(),
        });
        match err {
            AppError::InvalidParameters(detail) => assert_eq!(detail.name, "data.schema"),
            other => panic!("expected InvalidParameters, got {other:?}"),
        }
    }

    #[test]
    fn error_body_skips_missing_details() {
        let body = ErrorBody {
            code: 404,
            errno: errno::MISSING_RESOURCE,
            error: "Not Found".into(),
            message: "gone".into(),
            details: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("details"));
    }

    // ── into_response tests ──────────────────────────────────────

    use http_body_util::BodyExt;

    /// Helper to extract status and body from a Response.
    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn into_response_invalid_parameters_has_details() {
        let (status, body) = response_parts(raise_invalid("body", "title", "missing")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, 400);
        assert_eq!(body.errno, errno::INVALID_PARAMETERS);
        assert_eq!(body.error, "Invalid parameters");
        let details = body.details.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].name, "title");
    }

    #[tokio::test]
    async fn into_response_internal_hides_details() {
        let (status, body) = response_parts(AppError::Internal("lock poisoned".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "An internal error occurred");
        assert!(body.details.is_none());
    }
}
