//! Request correlation and API key middleware.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::{debug, info_span, Instrument};

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the correlation id on every response.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Header carrying the shared API key.
pub const API_KEY_HEADER: &str = "x-api-key";

tokio::task_local! {
    static REQUEST_ID: String;
}

/// Correlation id of the request being handled, if any.
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

fn new_request_id() -> String {
    uuid::Uuid::new_v4().simple().to_string().chars().take(8).collect()
}

/// Tags the request with a short correlation id.
///
/// The id scopes a tracing span and a task-local for error bodies, and is
/// echoed back in `X-Request-ID`.
pub async fn request_id(req: Request, next: Next) -> Response {
    let id = new_request_id();
    let span = info_span!(
        "request",
        request_id = %id,
        method = %req.method(),
        path = %req.uri().path()
    );
    debug!(parent: &span, "Request received");

    let mut response = REQUEST_ID
        .scope(id.clone(), next.run(req))
        .instrument(span)
        .await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Rejects requests without the configured `X-API-Key`.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match req.headers().get(API_KEY_HEADER) {
        None => Err(ApiError::unauthorized("Missing X-API-Key header")),
        Some(key) if key.as_bytes() == state.config.api_key.as_bytes() => Ok(next.run(req).await),
        Some(_) => Err(ApiError::unauthorized("Invalid API key")),
    }
}
