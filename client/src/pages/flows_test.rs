#![cfg(not(feature = "hydrate"))]

use futures::executor::block_on;

use super::*;
use crate::net::api::ApiConfig;
use crate::net::http::RequestBody;
use crate::net::testing::RecordingTransport;

#[test]
fn upload_sends_multipart_file_field() {
    let api = ApiClient::new(RecordingTransport::default(), &ApiConfig::with_base("/api"));
    let file = FileHandle { name: "march.xlsx".to_owned() };
    assert_eq!(block_on(upload_flow_file(&api, file.clone())), Ok(()));
    let sent = api.transport().last();
    assert_eq!(sent.url, "/api/upload_flow/");
    match sent.body {
        RequestBody::Multipart { field, file: sent_file } => {
            assert_eq!(field, "file");
            assert_eq!(sent_file, file);
        }
        other => panic!("unexpected body {other:?}"),
    }
}

#[test]
fn rejected_spreadsheet_surfaces_detail() {
    let api = ApiClient::new(
        RecordingTransport::replying(400, r#"{"detail":"Неверный формат файла"}"#),
        &ApiConfig::with_base("/api"),
    );
    let file = FileHandle { name: "bad.txt".to_owned() };
    let err = block_on(upload_flow_file(&api, file)).unwrap_err();
    assert_eq!(err.user_message(), "Неверный формат файла");
}
