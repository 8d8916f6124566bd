//! End-to-end tests of the autologin flow against a mock JSON-RPC server.

use lernsax_qr_core::app::session::INVALID_RESPONSE;
use lernsax_qr_core::app::{request, run_submission, FormController};
use lernsax_qr_core::client::NoWasmClient;
use lernsax_qr_core::config::ClientConfig;
use lernsax_qr_core::interface::HttpClient;
use lernsax_qr_core::model::structs::View;
use lernsax_qr_core::ResponseStatus;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUTOLOGIN_URL: &str = "https://www.lernsax.de/wws/something";

async fn client_for(server: &MockServer) -> NoWasmClient {
    let config = ClientConfig::new(
        format!("{}/jsonrpc.php", server.uri()),
        format!("{}/wws/992.php", server.uri()),
    )
    .unwrap();
    NoWasmClient::new(config).await.unwrap()
}

fn autologin_reply(url: &str) -> Value {
    json!([
        { "jsonrpc": "2.0", "id": 1, "result": { "return": "OK" } },
        { "jsonrpc": "2.0", "id": 2, "result": { "return": "OK" } },
        { "jsonrpc": "2.0", "id": 2, "result": { "return": "OK", "url": url } },
        { "jsonrpc": "2.0", "id": 3, "result": { "return": "OK" } }
    ])
}

#[tokio::test]
async fn test_submit_renders_qr_link() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jsonrpc.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(autologin_reply(AUTOLOGIN_URL)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut controller = FormController::new(".lernsax.de");
    let status = run_submission(&client, &mut controller, "alice", "hunter2").await;

    let ResponseStatus::Success { url, image_url } = &status else {
        panic!("expected success, got {status:?}");
    };
    assert_eq!(url, AUTOLOGIN_URL);
    assert_eq!(
        image_url,
        &format!(
            "{}/wws/992.php?url=https%3A%2F%2Fwww.lernsax.de%2Fwws%2Fsomething",
            server.uri()
        )
    );
    assert_eq!(controller.status(), &status);

    match View::from(&status) {
        View::QrLink { href, .. } => assert_eq!(href, AUTOLOGIN_URL),
        other => panic!("expected a QR link, got {other:?}"),
    }

    // The server sees the normalized login in the first call of the batch
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let batch: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(batch.as_array().map(Vec::len), Some(4));
    assert_eq!(batch[0]["method"], "login");
    assert_eq!(batch[0]["params"]["login"], "alice.lernsax.de");
    assert_eq!(batch[0]["params"]["password"], "hunter2");
    assert_eq!(batch[1]["method"], "set_focus");
    assert_eq!(batch[1]["params"]["object"], "trusts");
    assert_eq!(batch[2]["method"], "get_url_for_autologin");
    assert_eq!(batch[3]["method"], "logout");
}

#[tokio::test]
async fn test_login_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jsonrpc.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "jsonrpc": "2.0", "id": 1, "result": { "return": "FATAL", "error": "Ungültige Anmeldedaten" } },
            { "jsonrpc": "2.0", "id": 2, "result": { "return": "FATAL" } },
            { "jsonrpc": "2.0", "id": 2, "result": { "return": "FATAL" } },
            { "jsonrpc": "2.0", "id": 3, "result": { "return": "FATAL" } }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut controller = FormController::new(".lernsax.de");
    let status = run_submission(&client, &mut controller, "alice.lernsax.de", "wrong").await;

    assert_eq!(
        status,
        ResponseStatus::error("Error: Ungültige Anmeldedaten")
    );
}

#[tokio::test]
async fn test_non_json_body_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jsonrpc.php"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut controller = FormController::new(".lernsax.de");
    let status = run_submission(&client, &mut controller, "alice", "pw").await;

    assert_eq!(status, ResponseStatus::error(INVALID_RESPONSE));
}

#[tokio::test]
async fn test_transport_failure_becomes_error_status() {
    // Nothing listens on port 1
    let config =
        ClientConfig::new("http://127.0.0.1:1/jsonrpc.php", "http://127.0.0.1:1/qr").unwrap();
    let client = NoWasmClient::new(config).await.unwrap();
    let mut controller = FormController::new(".lernsax.de");

    let status = run_submission(&client, &mut controller, "alice", "pw").await;

    match &status {
        ResponseStatus::Error { message } => assert!(message.starts_with("Request failed: ")),
        other => panic!("expected an error status, got {other:?}"),
    }
    assert_eq!(controller.status(), &status);
}

#[tokio::test]
async fn test_save_downloads_qr_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jsonrpc.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(autologin_reply(AUTOLOGIN_URL)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wws/992.php"))
        .and(query_param("url", AUTOLOGIN_URL))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(b"\x89PNG fake".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut controller = FormController::new(".lernsax.de");
    let status = run_submission(&client, &mut controller, "alice", "pw").await;

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("qr.png");
    request::save_qr_image(&client, &status, &target).await.unwrap();

    assert_eq!(std::fs::read(&target).unwrap(), b"\x89PNG fake");
}
