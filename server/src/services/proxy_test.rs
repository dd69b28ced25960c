use axum::http::HeaderValue;

use super::*;

#[test]
fn upstream_path_strips_mount_and_keeps_trailing_slash() {
    assert_eq!(upstream_path("/api/stages/4/delete/"), "stages/4/delete/");
    assert_eq!(upstream_path("/api/atm-comment/SN%2F1/"), "atm-comment/SN%2F1/");
    assert_eq!(upstream_path("/api"), "");
}

#[test]
fn upstream_url_joins_base_path_and_query() {
    assert_eq!(upstream_url("http://u/api/", "requests-list/", Some("status=new")), "http://u/api/requests-list/?status=new");
    assert_eq!(upstream_url("http://u", "status_atm/", None), "http://u/status_atm/");
    assert_eq!(upstream_url("http://u", "flow_list/", Some("")), "http://u/flow_list/");
}

#[test]
fn filter_headers_keeps_only_allowed_names() {
    let mut source = HeaderMap::new();
    source.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t"));
    source.insert(header::COOKIE, HeaderValue::from_static("sid=1"));
    source.insert(header::HOST, HeaderValue::from_static("console.local"));
    source.append(header::ACCEPT, HeaderValue::from_static("application/json"));
    source.append(header::ACCEPT, HeaderValue::from_static("text/plain"));

    let out = filter_headers(&source, &FORWARDED_REQUEST_HEADERS);
    assert_eq!(out.get(header::AUTHORIZATION).unwrap(), "Bearer t");
    assert!(out.get(header::COOKIE).is_none());
    assert!(out.get(header::HOST).is_none());
    assert_eq!(out.get_all(header::ACCEPT).iter().count(), 2);
}

#[test]
fn proxy_error_statuses() {
    assert_eq!(ProxyError::Unreachable("refused".into()).status(), StatusCode::BAD_GATEWAY);
    assert_eq!(ProxyError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn proxy_error_body_carries_detail() {
    let response = ProxyError::Timeout.into_response();
    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["detail"], ProxyError::Timeout.detail());
}
