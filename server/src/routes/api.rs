//! `/api/*` handler.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::Response;

use crate::services::proxy::{self, ProxyError};
use crate::state::AppState;

pub async fn proxy(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    proxy::forward(&state, method, &uri, &headers, body).await
}
