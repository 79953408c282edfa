//! Integration tests for [`gemini_client::GeminiImageClient::generate`] against a mock HTTP server.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use gemini_client::GeminiImageClient;
use mockito::Matcher;
use serde_json::json;

fn client_for(server: &mockito::ServerGuard) -> GeminiImageClient {
    GeminiImageClient::new("test-key".to_string()).with_api_base(server.url())
}

#[tokio::test]
async fn generate_decodes_inline_image() {
    let mut server = mockito::Server::new_async().await;
    let encoded = BASE64.encode(b"fake-png-bytes");
    let body = json!({
        "candidates": [{
            "content": {
                "parts": [
                    {"inlineData": {"mimeType": "image/png", "data": encoded}}
                ]
            }
        }]
    });

    let mock = server
        .mock("POST", "/models/imagen-3.0-generate-002:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{"parts": [{"text": "a red fox in snow"}]}],
            "generationConfig": {"sampleCount": 1}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let image = client_for(&server)
        .generate("a red fox in snow")
        .await
        .unwrap();

    assert_eq!(image.bytes, b"fake-png-bytes");
    assert_eq!(image.mime_type, "image/png");
    mock.assert_async().await;
}

#[tokio::test]
async fn generate_uses_configured_model_in_path() {
    let mut server = mockito::Server::new_async().await;
    let encoded = BASE64.encode(b"x");
    let body = json!({
        "candidates": [{
            "content": {"parts": [{"inlineData": {"mimeType": "image/jpeg", "data": encoded}}]}
        }]
    });

    let mock = server
        .mock("POST", "/models/imagen-4.0:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = client_for(&server).with_model("imagen-4.0".to_string());
    let image = client.generate("anything").await.unwrap();

    assert_eq!(image.mime_type, "image/jpeg");
    mock.assert_async().await;
}

#[tokio::test]
async fn generate_fails_on_http_error_with_status_in_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/imagen-3.0-generate-002:generateContent")
        .with_status(400)
        .with_body(r#"{"error": {"message": "invalid prompt"}}"#)
        .create_async()
        .await;

    let err = client_for(&server).generate("bad").await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("400"), "unexpected error: {}", msg);
    assert!(msg.contains("invalid prompt"), "unexpected error: {}", msg);
}

#[tokio::test]
async fn generate_fails_when_no_candidates() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/imagen-3.0-generate-002:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates": []}"#)
        .create_async()
        .await;

    let err = client_for(&server).generate("anything").await.unwrap_err();
    assert!(err.to_string().contains("No image data"));
}

#[tokio::test]
async fn generate_fails_when_parts_carry_no_image() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({
        "candidates": [{
            "content": {"parts": [{"text": "sorry, I can only describe it"}]}
        }]
    });
    let _mock = server
        .mock("POST", "/models/imagen-3.0-generate-002:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let err = client_for(&server).generate("anything").await.unwrap_err();
    assert!(err.to_string().contains("No image data"));
}
