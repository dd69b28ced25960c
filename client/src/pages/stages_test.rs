use futures::executor::block_on;

use super::*;
use crate::net::api::ApiConfig;
use crate::net::http::{ApiError, Method};
use crate::net::testing::RecordingTransport;

fn client_with(transport: RecordingTransport) -> ApiClient<RecordingTransport> {
    ApiClient::new(transport, &ApiConfig::with_base("/api"))
}

#[test]
fn blank_names_issue_no_request() {
    let api = client_with(RecordingTransport::default());
    assert_eq!(block_on(add_entry(&api, None, "   ")), Err(ActionError::Invalid(MSG_NAME_REQUIRED)));
    assert_eq!(block_on(add_entry(&api, Some(2), "")), Err(ActionError::Invalid(MSG_NAME_REQUIRED)));
    assert_eq!(api.transport().count(), 0);
}

#[test]
fn add_routes_to_stage_or_work_endpoint() {
    let api = client_with(RecordingTransport::default());
    block_on(add_entry(&api, None, " Покраска ")).unwrap();
    assert_eq!(api.transport().last().url, "/api/stages/add/");
    block_on(add_entry(&api, Some(2), "Шлифовка")).unwrap();
    assert_eq!(api.transport().last().url, "/api/stages/2/works/add/");
}

#[test]
fn delete_routes_by_target() {
    let api = client_with(RecordingTransport::default());
    block_on(delete_entry(&api, DeleteTarget::Stage(4))).unwrap();
    let sent = api.transport().last();
    assert_eq!(sent.method, Method::Delete);
    assert_eq!(sent.url, "/api/stages/4/delete/");
    block_on(delete_entry(&api, DeleteTarget::Work(9))).unwrap();
    assert_eq!(api.transport().last().url, "/api/works/9/delete/");
}

#[test]
fn delete_failure_uses_detail_or_fallback() {
    let api = client_with(RecordingTransport::replying(409, r#"{"detail":"Этап используется"}"#));
    assert_eq!(block_on(delete_entry(&api, DeleteTarget::Stage(4))).unwrap_err().user_message(), "Этап используется");
    let api = client_with(RecordingTransport::replying(500, ""));
    assert_eq!(block_on(delete_entry(&api, DeleteTarget::Work(1))).unwrap_err().user_message(), MSG_DELETE_FAILED);
}

#[test]
fn add_with_rejected_token_reports_unauthorized() {
    let api = client_with(RecordingTransport::replying(401, ""));
    let err = block_on(add_entry(&api, None, "Покраска")).unwrap_err();
    assert!(err.api_error().is_some_and(ApiError::is_unauthorized));
}

#[test]
fn stage_prompt_mentions_cascade() {
    assert!(DeleteTarget::Stage(1).prompt().contains("работами"));
    assert_eq!(DeleteTarget::Work(1).prompt(), "Удалить работу?");
}
