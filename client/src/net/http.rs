//! Transport-neutral HTTP request/response model.
//!
//! DESIGN
//! ======
//! Pages never touch `gloo-net` directly. They go through `ApiClient`, which
//! builds an [`ApiRequest`] and hands it to a [`Transport`]. The browser build
//! plugs in `GlooTransport`; tests plug in a recorder so every call can be
//! asserted without a network.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

/// HTTP verbs used by the repair-tracking API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Browser file handle for multipart uploads.
#[cfg(feature = "hydrate")]
pub type FileHandle = web_sys::File;

/// Stand-in for a browser file outside the WASM build.
#[cfg(not(feature = "hydrate"))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
}

/// Request payload variants.
#[derive(Clone, Debug)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// Single-file multipart form under the given field name.
    Multipart { field: String, file: FileHandle },
}

/// A fully-resolved request ready for a [`Transport`].
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute or origin-relative URL, base path included.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    /// Render `url` plus the encoded query string.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.url)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response as seen by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors surfaced by API calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("request failed with status {status}")]
    Status { status: u16, detail: Option<String> },

    /// The response body did not match the expected schema.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// No transport exists in this build (server-side rendering).
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Message for a banner: server-supplied detail when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { detail: Some(detail), .. } => detail.clone(),
            _ => fallback.to_owned(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// The stored token was rejected; the session is over.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}

/// Failure of a user action: rejected before sending, or by the server.
///
/// Keeps the underlying [`ApiError`] so the page can tell a rejected token
/// from an ordinary failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Input failed local validation; no request was made.
    #[error("{0}")]
    Invalid(&'static str),

    /// The call failed. `fallback` is shown when the server gives no detail.
    #[error("{error}")]
    Api { error: ApiError, fallback: &'static str },
}

impl ActionError {
    /// Adapter for `map_err` on an API call.
    pub fn api(fallback: &'static str) -> impl Fn(ApiError) -> Self {
        move |error| Self::Api { error, fallback }
    }

    /// Banner text for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(msg) => (*msg).to_owned(),
            Self::Api { error, fallback } => error.user_message(fallback),
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Invalid(_) => None,
            Self::Api { error, .. } => Some(error),
        }
    }
}

/// Executes requests. Implemented by the browser transport and by test doubles.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

const DETAIL_FIELDS: [&str; 4] = ["detail", "error", "message", "non_field_errors"];
const MAX_TEXT_DETAIL_LEN: usize = 300;

/// Pull a human-readable error out of an error response body.
///
/// Recognizes `{"detail": ...}`-style bodies, per-field validation maps
/// (`{"date": ["required"]}`), bare string arrays, and short plain-text bodies.
/// HTML error pages are ignored.
pub fn extract_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => {
            for key in DETAIL_FIELDS {
                if let Some(text) = map.get(key).and_then(value_text) {
                    return Some(text);
                }
            }
            let parts = map
                .iter()
                .filter_map(|(field, value)| value_text(value).map(|text| format!("{field}: {text}")))
                .collect::<Vec<_>>();
            if parts.is_empty() { None } else { Some(parts.join("; ")) }
        }
        Ok(value @ (serde_json::Value::Array(_) | serde_json::Value::String(_))) => value_text(&value),
        Ok(_) => None,
        Err(_) => {
            if trimmed.starts_with('<') || trimmed.len() > MAX_TEXT_DETAIL_LEN {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
    }
}

fn value_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        serde_json::Value::Array(items) => {
            let parts = items.iter().filter_map(value_text).collect::<Vec<_>>();
            if parts.is_empty() { None } else { Some(parts.join(" ")) }
        }
        _ => None,
    }
}

/// Percent-encode a query component (RFC 3986 unreserved set passes through).
pub fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(char::from(byte)),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
