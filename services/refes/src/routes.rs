//! Router and request dispatch
//!
//! The client posts everything to `/api/<name>`. All of those land in the
//! fallback handler, which unwraps the body, picks the endpoint and encodes
//! the reply for the wire.

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::State,
    http::{HeaderMap, Method, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tracing::info;

use crate::{
    endpoint::Endpoint,
    error::{ApiError, ApiResult},
    handlers::{self, Reply},
    payload::{self, ContentKind},
    state::AppState,
};

/// Largest request body read before giving up. Uploads carry whole games.
pub const MAX_BODY_SIZE: usize = 16 * 1024 * 1024;

/// Create the router for the protocol server
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .fallback(api_entry)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "refes"
    }))
}

async fn api_entry(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let body = match to_bytes(body, MAX_BODY_SIZE).await {
        Ok(bytes) => bytes,
        Err(e) => return ApiError::UnreadableBody(e).into_response(),
    };
    let content_type = headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok());

    dispatch(&state, &method, uri.path(), content_type, &body).await
}

/// Handle one client request. Failures come back as an empty 4xx.
pub async fn dispatch(
    state: &AppState,
    method: &Method,
    path: &str,
    content_type: Option<&str>,
    body: &[u8],
) -> Response {
    info!("Request to {}", path);

    match try_dispatch(state, method, path, content_type, body).await {
        Ok(bytes) => bytes.into_response(),
        Err(e) => e.into_response(),
    }
}

async fn try_dispatch(
    state: &AppState,
    method: &Method,
    path: &str,
    content_type: Option<&str>,
    body: &[u8],
) -> ApiResult<Vec<u8>> {
    if *method != Method::POST {
        return Err(ApiError::MethodNotAllowed(method.to_string()));
    }

    let inner = payload::unwrap(body, ContentKind::from_content_type(content_type))?;
    let endpoint =
        Endpoint::from_path(path).ok_or_else(|| ApiError::UnknownEndpoint(path.to_string()))?;

    let bytes = match handlers::handle(state, endpoint, &inner).await? {
        Reply::Text(json) => payload::encode_for_wire(&json),
        Reply::Binary(raw) => raw,
    };

    Ok(bytes)
}
