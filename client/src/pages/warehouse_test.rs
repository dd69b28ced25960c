use futures::executor::block_on;

use super::*;
use crate::net::api::ApiConfig;
use crate::net::http::{ApiError, Method, RequestBody};
use crate::net::testing::RecordingTransport;

fn client_with(transport: RecordingTransport) -> ApiClient<RecordingTransport> {
    ApiClient::new(transport, &ApiConfig::with_base("/api"))
}

fn draft(place: &str, description: &str) -> SlotDraft {
    SlotDraft { place_number: place.to_owned(), description: description.to_owned() }
}

#[test]
fn validate_draft_trims_and_requires_place() {
    assert_eq!(validate_draft(&draft("  ", "x")), Err(MSG_PLACE_REQUIRED));
    assert_eq!(validate_draft(&draft(" A-1 ", " у окна ")), Ok(draft("A-1", "у окна")));
}

#[test]
fn blank_place_issues_no_request() {
    let api = client_with(RecordingTransport::default());
    assert_eq!(block_on(save_slot(&api, None, &draft("", "x"))), Err(ActionError::Invalid(MSG_PLACE_REQUIRED)));
    assert_eq!(api.transport().count(), 0);
}

#[test]
fn new_slot_posts_to_add_route() {
    let api = client_with(RecordingTransport::default());
    assert_eq!(block_on(save_slot(&api, None, &draft("A-1", ""))), Ok(MSG_CREATED));
    let sent = api.transport().last();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url, "/api/warehouse/add/");
}

#[test]
fn edited_slot_puts_trimmed_draft() {
    let api = client_with(RecordingTransport::default());
    assert_eq!(block_on(save_slot(&api, Some(4), &draft(" B-2 ", "  "))), Ok(MSG_UPDATED));
    let sent = api.transport().last();
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.url, "/api/warehouse/4/");
    match sent.body {
        RequestBody::Json(value) => assert_eq!(value["place_number"], "B-2"),
        other => panic!("unexpected body {other:?}"),
    }
}

#[test]
fn delete_failure_uses_fallback() {
    let api = client_with(RecordingTransport::replying(500, ""));
    assert_eq!(block_on(remove_slot(&api, 4)).unwrap_err().user_message(), MSG_DELETE_FAILED);
}

#[test]
fn save_with_rejected_token_reports_unauthorized() {
    let api = client_with(RecordingTransport::replying(401, r#"{"detail":"Invalid token."}"#));
    let err = block_on(save_slot(&api, Some(4), &draft("A-1", ""))).unwrap_err();
    assert!(err.api_error().is_some_and(ApiError::is_unauthorized));
}
