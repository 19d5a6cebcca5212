use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use std::any::Any;
use tracing::{error, warn};

use crate::pipeline::{Pipeline, PipelineSummary};

/// Error response body: `{"detail": "..."}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(status = %rejection.status(), reason = %rejection.body_text(), "Rejected pipeline payload");
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

pub async fn root() -> Json<Value> {
    Json(json!({ "Ping": "Pong" }))
}

/// Summarize a submitted pipeline
///
/// A body without `Content-Type` is read as JSON. Any other media type that
/// is not JSON is refused with 415.
pub async fn parse_pipeline(
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PipelineSummary>, ApiError> {
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        if !is_json_media_type(content_type.to_str().unwrap_or_default()) {
            warn!(?content_type, "Rejected pipeline payload media type");
            return Err(ApiError::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Expected request with `Content-Type: application/json`",
            ));
        }
    }

    let Json(pipeline) = Json::<Pipeline>::from_bytes(&body)?;
    Ok(Json(pipeline.summarize()))
}

/// `application/json` or any `+json` suffix, parameters ignored
pub(super) fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

pub async fn parse_pipeline_get() -> Json<Value> {
    Json(json!({ "message": "Use POST method to submit pipeline data" }))
}

pub async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not Found")
}

/// Turn a handler panic into a generic 500 response
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let reason = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(%reason, "Request handler panicked");

    ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Error processing pipeline: {}", reason),
    )
    .into_response()
}
