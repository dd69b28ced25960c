use super::*;

fn request(query: Vec<(&str, &str)>) -> ApiRequest {
    ApiRequest {
        method: Method::Get,
        url: "/api/requests-list/".to_owned(),
        query: query.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect(),
        headers: vec![("Authorization".to_owned(), "Bearer t".to_owned())],
        body: RequestBody::Empty,
    }
}

// =============================================================
// ApiRequest
// =============================================================

#[test]
fn full_url_without_query_is_plain_url() {
    assert_eq!(request(vec![]).full_url(), "/api/requests-list/");
}

#[test]
fn full_url_encodes_query_values() {
    let req = request(vec![("status", "в работе")]);
    assert_eq!(
        req.full_url(),
        "/api/requests-list/?status=%D0%B2%20%D1%80%D0%B0%D0%B1%D0%BE%D1%82%D0%B5"
    );
}

#[test]
fn header_lookup_is_case_insensitive() {
    let req = request(vec![]);
    assert_eq!(req.header("authorization"), Some("Bearer t"));
    assert_eq!(req.header("Content-Type"), None);
}

#[test]
fn method_names_are_uppercase() {
    assert_eq!(Method::Get.as_str(), "GET");
    assert_eq!(Method::Patch.as_str(), "PATCH");
    assert_eq!(Method::Delete.as_str(), "DELETE");
}

#[test]
fn response_success_range() {
    assert!(ApiResponse { status: 204, body: String::new() }.is_success());
    assert!(!ApiResponse { status: 302, body: String::new() }.is_success());
    assert!(!ApiResponse { status: 400, body: String::new() }.is_success());
}

// =============================================================
// extract_detail
// =============================================================

#[test]
fn extract_detail_prefers_detail_field() {
    let body = r#"{"detail":"Акт уже существует","message":"other"}"#;
    assert_eq!(extract_detail(body), Some("Акт уже существует".to_owned()));
}

#[test]
fn extract_detail_reads_error_field() {
    assert_eq!(extract_detail(r#"{"error":"bad token"}"#), Some("bad token".to_owned()));
}

#[test]
fn extract_detail_joins_field_errors() {
    let body = r#"{"date":["This field is required."]}"#;
    assert_eq!(extract_detail(body), Some("date: This field is required.".to_owned()));
}

#[test]
fn extract_detail_reads_string_array() {
    assert_eq!(extract_detail(r#"["one","two"]"#), Some("one two".to_owned()));
}

#[test]
fn extract_detail_accepts_short_plain_text() {
    assert_eq!(extract_detail("  upstream timeout \n"), Some("upstream timeout".to_owned()));
}

#[test]
fn extract_detail_ignores_html_and_empty() {
    assert_eq!(extract_detail("<html><body>500</body></html>"), None);
    assert_eq!(extract_detail("   "), None);
    assert_eq!(extract_detail(r#"{"count": 3}"#), None);
}

// =============================================================
// ApiError
// =============================================================

#[test]
fn user_message_prefers_server_detail() {
    let err = ApiError::Status { status: 400, detail: Some("Нет устройств".to_owned()) };
    assert_eq!(err.user_message("Ошибка"), "Нет устройств");
}

#[test]
fn user_message_falls_back_without_detail() {
    let err = ApiError::Status { status: 500, detail: None };
    assert_eq!(err.user_message("Ошибка"), "Ошибка");
    assert_eq!(ApiError::Network("offline".to_owned()).user_message("Ошибка"), "Ошибка");
}

#[test]
fn status_predicates_match_exact_codes() {
    assert!(ApiError::Status { status: 404, detail: None }.is_not_found());
    assert!(!ApiError::Status { status: 500, detail: None }.is_not_found());
    assert!(!ApiError::Unavailable.is_not_found());
    assert!(ApiError::Status { status: 401, detail: None }.is_unauthorized());
    assert!(!ApiError::Status { status: 403, detail: None }.is_unauthorized());
}

#[test]
fn encode_component_passes_unreserved() {
    assert_eq!(encode_component("AZaz09-_.~"), "AZaz09-_.~");
    assert_eq!(encode_component("a b&c"), "a%20b%26c");
}

// =============================================================
// ActionError
// =============================================================

#[test]
fn action_error_keeps_the_api_failure() {
    let rejected = ActionError::api("fallback")(ApiError::Status { status: 401, detail: Some("Invalid token.".to_owned()) });
    assert_eq!(rejected.user_message(), "Invalid token.");
    assert!(rejected.api_error().is_some_and(ApiError::is_unauthorized));

    let blank = ActionError::api("fallback")(ApiError::Status { status: 500, detail: None });
    assert_eq!(blank.user_message(), "fallback");

    let invalid = ActionError::Invalid("Укажите дату.");
    assert_eq!(invalid.user_message(), "Укажите дату.");
    assert_eq!(invalid.api_error(), None);
}
