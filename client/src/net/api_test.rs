use futures::executor::block_on;

use super::*;
use crate::net::testing::RecordingTransport;

fn client(transport: RecordingTransport) -> ApiClient<RecordingTransport> {
    ApiClient::new(transport, &ApiConfig::with_base("/api/"))
}

fn json_body(request: &ApiRequest) -> serde_json::Value {
    match &request.body {
        RequestBody::Json(value) => value.clone(),
        other => panic!("expected JSON body, got {other:?}"),
    }
}

// =============================================================
// Endpoint paths
// =============================================================

#[test]
fn device_detail_path_encodes_serial() {
    assert_eq!(device_detail_path("SN 01/2"), "/atm-comment/SN%2001%2F2/");
}

#[test]
fn mutation_paths_match_api_layout() {
    assert_eq!(request_path(7), "/requests-list/7/");
    assert_eq!(act_signature_path(12), "/acts/12/upload-signature/");
    assert_eq!(slot_path(3), "/warehouse/3/");
    assert_eq!(slot_delete_path(3), "/warehouse/3/delete/");
    assert_eq!(stage_delete_path(4), "/stages/4/delete/");
    assert_eq!(stage_work_add_path(4), "/stages/4/works/add/");
    assert_eq!(work_delete_path(9), "/works/9/delete/");
}

#[test]
fn api_config_trims_trailing_slash() {
    assert_eq!(ApiConfig::with_base("https://repair.example/api/").base_url, "https://repair.example/api");
}

// =============================================================
// Auth header centralization
// =============================================================

#[test]
fn token_is_attached_to_every_request() {
    let api = client(RecordingTransport::replying(200, "[]")).with_token(Some("abc".to_owned()));
    block_on(api.list_statuses()).unwrap();
    let request = api.transport().last();
    assert_eq!(request.header("Authorization"), Some("Bearer abc"));
    assert_eq!(request.url, "/api/status_atm/");
}

#[test]
fn blank_token_is_not_attached() {
    let api = client(RecordingTransport::replying(200, "[]")).with_token(Some("  ".to_owned()));
    block_on(api.list_stages()).unwrap();
    assert_eq!(api.transport().last().header("Authorization"), None);
}

// =============================================================
// Decoding and errors
// =============================================================

#[test]
fn device_detail_decodes_body() {
    let api = client(RecordingTransport::replying(
        200,
        r#"{"serial_number":"SN-7","model":"NCR","images":[{"url":"/i.jpg","category":"Работы"}]}"#,
    ));
    let detail = block_on(api.device_detail("SN-7")).unwrap();
    assert_eq!(detail.model, "NCR");
    assert_eq!(detail.images.len(), 1);
    assert_eq!(api.transport().last().method, Method::Get);
}

#[test]
fn device_detail_missing_maps_to_not_found() {
    let api = client(RecordingTransport::replying(404, r#"{"detail":"Not found."}"#));
    let err = block_on(api.device_detail("nope")).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.user_message("x"), "Not found.");
}

#[test]
fn malformed_body_is_decode_error() {
    let api = client(RecordingTransport::replying(200, "not json"));
    let err = block_on(api.list_flows()).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn transport_failure_propagates() {
    let transport = RecordingTransport::default();
    transport.push_err(ApiError::Network("offline".to_owned()));
    let api = client(transport);
    assert_eq!(block_on(api.list_slots()).unwrap_err(), ApiError::Network("offline".to_owned()));
}

// =============================================================
// Request shapes
// =============================================================

#[test]
fn list_requests_adds_status_query_only_when_present() {
    let api = client(RecordingTransport::default());
    api.transport().push(200, "[]");
    api.transport().push(200, "[]");
    block_on(api.list_requests(Some("новая"))).unwrap();
    assert_eq!(api.transport().last().query, vec![("status".to_owned(), "новая".to_owned())]);
    block_on(api.list_requests(Some("  "))).unwrap();
    assert!(api.transport().last().query.is_empty());
}

#[test]
fn status_history_uses_history_query() {
    let api = client(RecordingTransport::replying(200, r#"[{"status":"Покраска"}]"#));
    let history = block_on(api.status_history("SN-1")).unwrap();
    assert_eq!(history[0].status, "Покраска");
    assert_eq!(api.transport().last().full_url(), "/api/status_atm/?history=SN-1");
}

#[test]
fn change_status_patches_json_body() {
    let api = client(RecordingTransport::replying(200, "{}"));
    let change = StatusChange { serial_number: "SN-1".to_owned(), status: "ОТК".to_owned() };
    block_on(api.change_status(&change)).unwrap();
    let request = api.transport().last();
    assert_eq!(request.method, Method::Patch);
    assert_eq!(json_body(&request), serde_json::json!({ "serial_number": "SN-1", "status": "ОТК" }));
}

#[test]
fn create_act_posts_selection() {
    let api = client(RecordingTransport::replying(201, "{}"));
    let act = NewAct { number: Some(15), date: "2026-02-01".to_owned(), comment: "ok".to_owned(), device_ids: vec![1, 2] };
    block_on(api.create_act(&act)).unwrap();
    let request = api.transport().last();
    assert_eq!(request.url, "/api/atm_act/");
    assert_eq!(json_body(&request)["device_ids"], serde_json::json!([1, 2]));
}

#[test]
fn signature_upload_is_multipart_under_file_field() {
    let api = client(RecordingTransport::replying(200, ""));
    let file = FileHandle { name: "act-12.pdf".to_owned() };
    block_on(api.upload_act_signature(12, file.clone())).unwrap();
    let request = api.transport().last();
    assert_eq!(request.url, "/api/acts/12/upload-signature/");
    match request.body {
        RequestBody::Multipart { field, file: sent } => {
            assert_eq!(field, UPLOAD_FIELD);
            assert_eq!(sent, file);
        }
        other => panic!("expected multipart body, got {other:?}"),
    }
}

#[test]
fn delete_slot_uses_delete_route() {
    let api = client(RecordingTransport::replying(204, ""));
    block_on(api.delete_slot(5)).unwrap();
    let request = api.transport().last();
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.url, "/api/warehouse/5/delete/");
}

#[test]
fn verify_code_returns_token() {
    let api = client(RecordingTransport::replying(200, r#"{"token":"tok-1"}"#));
    assert_eq!(block_on(api.verify_code("ivanov", "123456")).unwrap(), "tok-1");
    assert_eq!(json_body(&api.transport().last()), serde_json::json!({ "username": "ivanov", "code": "123456" }));
}

#[test]
fn rejected_login_surfaces_detail() {
    let api = client(RecordingTransport::replying(401, r#"{"detail":"Неверный пароль"}"#));
    let err = block_on(api.login("ivanov", "bad")).unwrap_err();
    assert_eq!(err.user_message("Ошибка входа"), "Неверный пароль");
    assert_eq!(api.transport().count(), 1);
}
