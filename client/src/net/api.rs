//! Typed REST client for the repair-tracking API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every screen reads and writes through [`ApiClient`]. It owns base-path
//! resolution and bearer-token attachment, so no page decides on its own
//! whether a call is authenticated. There is deliberately no response cache:
//! pages refetch after each mutation.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError::Status`] carrying whatever detail the
//! server put in the body; callers turn that into a banner via
//! [`ApiError::user_message`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::http::{ApiError, ApiRequest, ApiResponse, FileHandle, Method, RequestBody, Transport, encode_component, extract_detail};
use super::types::{
    ActsOverview, ComplaintGroup, DeviceDetail, DeviceStatusRecord, FlowList, NewAct, RepairRequest, SlotDraft, Stage,
    StatusChange, StatusHistoryEntry, TokenResponse, WarehouseSlot,
};

/// Base path used when the build does not override it.
pub const DEFAULT_API_BASE: &str = "/api";

/// Multipart field name the API expects for uploaded files.
pub const UPLOAD_FIELD: &str = "file";

/// API location. The host proxies `/api` to the upstream service, so the
/// default is origin-relative; `REPAINT_API_BASE` at build time overrides it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::with_base(option_env!("REPAINT_API_BASE").unwrap_or(DEFAULT_API_BASE))
    }
}

impl ApiConfig {
    pub fn with_base(base: &str) -> Self {
        Self { base_url: base.trim_end_matches('/').to_owned() }
    }
}

// =============================================================================
// ENDPOINTS
// =============================================================================

fn device_detail_path(serial: &str) -> String {
    format!("/atm-comment/{}/", encode_component(serial.trim()))
}

fn request_path(id: i64) -> String {
    format!("/requests-list/{id}/")
}

fn act_signature_path(act_id: i64) -> String {
    format!("/acts/{act_id}/upload-signature/")
}

fn slot_path(id: i64) -> String {
    format!("/warehouse/{id}/")
}

fn slot_delete_path(id: i64) -> String {
    format!("/warehouse/{id}/delete/")
}

fn stage_delete_path(id: i64) -> String {
    format!("/stages/{id}/delete/")
}

fn stage_work_add_path(stage_id: i64) -> String {
    format!("/stages/{stage_id}/works/add/")
}

fn work_delete_path(id: i64) -> String {
    format!("/works/{id}/delete/")
}

// =============================================================================
// CLIENT
// =============================================================================

/// Typed operations over a [`Transport`].
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    transport: T,
    base_url: String,
    token: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: &ApiConfig) -> Self {
        Self { transport, base_url: config.base_url.clone(), token: None }
    }

    /// Attach a bearer token to every request. Blank tokens are ignored.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn request(&self, method: Method, path: &str, body: RequestBody) -> ApiRequest {
        let mut headers = vec![("Accept".to_owned(), "application/json".to_owned())];
        if let Some(token) = &self.token {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        ApiRequest { method, url: format!("{}{path}", self.base_url), query: Vec::new(), headers, body }
    }

    fn json_request<B: Serialize>(&self, method: Method, path: &str, body: &B) -> Result<ApiRequest, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(self.request(method, path, RequestBody::Json(value)))
    }

    fn upload_request(&self, path: &str, file: FileHandle) -> ApiRequest {
        self.request(Method::Post, path, RequestBody::Multipart { field: UPLOAD_FIELD.to_owned(), file })
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(ApiError::Status { status: response.status, detail: extract_detail(&response.body) });
        }
        Ok(response)
    }

    async fn fetch_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let response = self.send(request).await?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn expect_ok(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }

    // -------------------------------------------------------------------------
    // auth
    // -------------------------------------------------------------------------

    /// Check credentials (`POST /auth/login/`).
    ///
    /// # Errors
    ///
    /// Returns the server's rejection when the pair is not accepted.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "username": username, "password": password });
        self.expect_ok(self.json_request(Method::Post, "/auth/login/", &body)?).await
    }

    /// Bind a Telegram account so the one-time code can be delivered.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn bind_telegram(&self, username: &str, telegram_id: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "username": username, "telegram_id": telegram_id });
        self.expect_ok(self.json_request(Method::Post, "/auth/telegram/", &body)?).await
    }

    /// Exchange a one-time code for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is rejected or the response has no token.
    pub async fn verify_code(&self, username: &str, code: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({ "username": username, "code": code });
        let response: TokenResponse = self
            .fetch_json(self.json_request(Method::Post, "/auth/verify-code/", &body)?)
            .await?;
        Ok(response.token)
    }

    /// Ask the server to send a fresh code.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn resend_code(&self, username: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "username": username });
        self.expect_ok(self.json_request(Method::Post, "/auth/resend-code/", &body)?).await
    }

    // -------------------------------------------------------------------------
    // devices and statuses
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 when the serial is unknown.
    pub async fn device_detail(&self, serial: &str) -> Result<DeviceDetail, ApiError> {
        self.fetch_json(self.request(Method::Get, &device_detail_path(serial), RequestBody::Empty))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    pub async fn list_statuses(&self) -> Result<Vec<DeviceStatusRecord>, ApiError> {
        self.fetch_json(self.request(Method::Get, "/status_atm/", RequestBody::Empty))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn change_status(&self, change: &StatusChange) -> Result<(), ApiError> {
        self.expect_ok(self.json_request(Method::Patch, "/status_atm/", change)?)
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    pub async fn status_history(&self, serial: &str) -> Result<Vec<StatusHistoryEntry>, ApiError> {
        let mut request = self.request(Method::Get, "/status_atm/", RequestBody::Empty);
        request.query.push(("history".to_owned(), serial.trim().to_owned()));
        self.fetch_json(request).await
    }

    // -------------------------------------------------------------------------
    // requests
    // -------------------------------------------------------------------------

    /// List requests, optionally narrowed server-side to one status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    pub async fn list_requests(&self, status: Option<&str>) -> Result<Vec<RepairRequest>, ApiError> {
        let mut request = self.request(Method::Get, "/requests-list/", RequestBody::Empty);
        if let Some(status) = status.map(str::trim).filter(|s| !s.is_empty()) {
            request.query.push(("status".to_owned(), status.to_owned()));
        }
        self.fetch_json(request).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn set_request_status(&self, id: i64, status: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "status": status });
        self.expect_ok(self.json_request(Method::Patch, &request_path(id), &body)?)
            .await
    }

    // -------------------------------------------------------------------------
    // acts
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    pub async fn acts_overview(&self) -> Result<ActsOverview, ApiError> {
        self.fetch_json(self.request(Method::Get, "/atm_act/", RequestBody::Empty))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn create_act(&self, act: &NewAct) -> Result<(), ApiError> {
        self.expect_ok(self.json_request(Method::Post, "/atm_act/", act)?)
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the upload fails or is rejected.
    pub async fn upload_act_signature(&self, act_id: i64, file: FileHandle) -> Result<(), ApiError> {
        self.expect_ok(self.upload_request(&act_signature_path(act_id), file))
            .await
    }

    // -------------------------------------------------------------------------
    // complaints and flows
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    pub async fn list_complaints(&self) -> Result<Vec<ComplaintGroup>, ApiError> {
        self.fetch_json(self.request(Method::Get, "/complaints/", RequestBody::Empty))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    pub async fn list_flows(&self) -> Result<FlowList, ApiError> {
        self.fetch_json(self.request(Method::Get, "/flow_list/", RequestBody::Empty))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the upload fails or is rejected.
    pub async fn upload_flow(&self, file: FileHandle) -> Result<(), ApiError> {
        self.expect_ok(self.upload_request("/upload_flow/", file)).await
    }

    // -------------------------------------------------------------------------
    // warehouse
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    pub async fn list_slots(&self) -> Result<Vec<WarehouseSlot>, ApiError> {
        self.fetch_json(self.request(Method::Get, "/warehouse/", RequestBody::Empty))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn create_slot(&self, draft: &SlotDraft) -> Result<(), ApiError> {
        self.expect_ok(self.json_request(Method::Post, "/warehouse/add/", draft)?)
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn update_slot(&self, id: i64, draft: &SlotDraft) -> Result<(), ApiError> {
        self.expect_ok(self.json_request(Method::Put, &slot_path(id), draft)?)
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn delete_slot(&self, id: i64) -> Result<(), ApiError> {
        self.expect_ok(self.request(Method::Delete, &slot_delete_path(id), RequestBody::Empty))
            .await
    }

    // -------------------------------------------------------------------------
    // stages and works
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    pub async fn list_stages(&self) -> Result<Vec<Stage>, ApiError> {
        self.fetch_json(self.request(Method::Get, "/stages/", RequestBody::Empty))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn create_stage(&self, name: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "name": name });
        self.expect_ok(self.json_request(Method::Post, "/stages/add/", &body)?)
            .await
    }

    /// Delete a stage; its works go with it on the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn delete_stage(&self, id: i64) -> Result<(), ApiError> {
        self.expect_ok(self.request(Method::Delete, &stage_delete_path(id), RequestBody::Empty))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn create_work(&self, stage_id: i64, name: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "name": name });
        self.expect_ok(self.json_request(Method::Post, &stage_work_add_path(stage_id), &body)?)
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn delete_work(&self, id: i64) -> Result<(), ApiError> {
        self.expect_ok(self.request(Method::Delete, &work_delete_path(id), RequestBody::Empty))
            .await
    }
}

/// Client wired to the browser transport and the stored session token.
#[cfg(feature = "hydrate")]
pub fn browser_client() -> ApiClient<super::gloo::GlooTransport> {
    ApiClient::new(super::gloo::GlooTransport, &ApiConfig::default()).with_token(crate::util::storage::load_token())
}
