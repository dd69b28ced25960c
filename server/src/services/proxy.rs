//! Reverse proxy from `/api/*` to the repair-tracking service.
//!
//! DESIGN
//! ======
//! The browser only ever talks to its own origin. Requests are replayed
//! upstream with their method, query, and body; only an allow-list of
//! headers crosses in either direction so cookies and hop-by-hop headers
//! stay local. Failures answer with a JSON `detail` so the client surfaces
//! them the same way as upstream validation errors.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::Json;
use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// Mount point of the proxy on the host.
pub const API_PREFIX: &str = "/api";

pub const FORWARDED_REQUEST_HEADERS: [HeaderName; 3] = [header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT];
pub const FORWARDED_RESPONSE_HEADERS: [HeaderName; 2] = [header::CONTENT_TYPE, header::CONTENT_DISPOSITION];

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Connecting to or talking with the upstream failed.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    #[error("upstream timed out")]
    Timeout,
}

impl ProxyError {
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() { Self::Timeout } else { Self::Unreachable(err.to_string()) }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unreachable(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Operator-facing text placed in the `detail` field.
    pub fn detail(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "Сервер ремонта недоступен.",
            Self::Timeout => "Сервер ремонта не ответил вовремя.",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(serde_json::json!({ "detail": self.detail() }))).into_response()
    }
}

// =============================================================================
// URL + HEADERS
// =============================================================================

/// Path below the proxy mount, without its leading `/`. Trailing slashes are
/// kept since the upstream routes depend on them.
pub fn upstream_path(host_path: &str) -> &str {
    let rest = host_path.strip_prefix(API_PREFIX).unwrap_or(host_path);
    rest.trim_start_matches('/')
}

pub fn upstream_url(base: &str, path: &str, query: Option<&str>) -> String {
    let mut url = format!("{}/{path}", base.trim_end_matches('/'));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Copy only the named headers, keeping repeated values.
pub fn filter_headers(source: &HeaderMap, allowed: &[HeaderName]) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in allowed {
        for value in source.get_all(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

// =============================================================================
// FORWARD
// =============================================================================

/// Replay one host request upstream and relay the answer.
///
/// Upstream error statuses pass through unchanged; only transport failures
/// become a [`ProxyError`].
///
/// # Errors
///
/// Returns [`ProxyError`] when the upstream cannot be reached, times out, or
/// drops the response body.
pub async fn forward(
    state: &AppState,
    method: Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let path = upstream_path(uri.path());
    let url = upstream_url(&state.upstream, path, uri.query());

    let fail = |err: reqwest::Error| {
        tracing::warn!(%method, path, error = %err, "upstream request failed");
        ProxyError::from_reqwest(&err)
    };

    let response = state
        .http
        .request(method.clone(), &url)
        .headers(filter_headers(headers, &FORWARDED_REQUEST_HEADERS))
        .body(body)
        .send()
        .await
        .map_err(fail)?;

    let status = response.status();
    let relayed = filter_headers(response.headers(), &FORWARDED_RESPONSE_HEADERS);
    let bytes = response.bytes().await.map_err(fail)?;

    if status.is_server_error() {
        tracing::warn!(%method, path, status = status.as_u16(), "upstream error status");
    } else {
        tracing::debug!(%method, path, status = status.as_u16(), "proxied");
    }
    Ok((status, relayed, bytes).into_response())
}
