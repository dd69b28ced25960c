//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! host keeps no mutable state: it holds one pooled HTTP client and the
//! upstream base URL, both shared across requests behind `Arc`.

use std::sync::Arc;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    /// Base URL of the repair-tracking API, without a trailing `/`.
    pub upstream: Arc<str>,
}

impl AppState {
    /// Build the shared upstream client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` error if the TLS backend cannot be initialised.
    pub fn new(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.proxy_timeout).build()?;
        Ok(Self { http, upstream: Arc::from(config.upstream_url.as_str()) })
    }
}
