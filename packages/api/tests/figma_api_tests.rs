// ABOUTME: Integration tests for the Figma import endpoint
// ABOUTME: Validates URL and token handling and the returned design summary

mod common;

use axum::http::StatusCode;
use common::{setup_test_app_with, TestOptions};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn with_figma(url: String) -> TestOptions {
    TestOptions {
        figma: Some(("figd_test".to_string(), url)),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_missing_url_is_bad_request() {
    let ctx = setup_test_app_with(TestOptions::default()).await;

    let (status, body) = ctx.post_json("/api/figma/fetch", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Figma URL이 필요합니다.");
}

#[tokio::test]
async fn test_invalid_url_is_bad_request() {
    let ctx = setup_test_app_with(TestOptions::default()).await;

    let (status, body) = ctx
        .post_json("/api/figma/fetch", json!({"figmaUrl": "https://example.com/design"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "유효하지 않은 Figma URL입니다. 예: https://www.figma.com/file/..."
    );
}

#[tokio::test]
async fn test_missing_token_is_server_error() {
    let ctx = setup_test_app_with(TestOptions::default()).await;

    let (status, body) = ctx
        .post_json(
            "/api/figma/fetch",
            json!({"figmaUrl": "https://www.figma.com/file/AbC123/Checkout"}),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Figma 액세스 토큰이 설정되지 않았습니다.");
}

#[tokio::test]
async fn test_fetch_returns_design_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/AbC123"))
        .and(header("X-Figma-Token", "figd_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "결제 플로우",
            "lastModified": "2025-01-01T00:00:00Z",
            "document": {
                "id": "0:0",
                "name": "Document",
                "type": "DOCUMENT",
                "children": [{
                    "id": "0:1",
                    "name": "Page 1",
                    "type": "CANVAS",
                    "children": [{
                        "id": "1:1",
                        "name": "결제",
                        "type": "FRAME",
                        "children": [
                            { "id": "1:2", "name": "Heading", "type": "TEXT", "characters": "결제하기" },
                            { "id": "1:3", "name": "PayButton", "type": "INSTANCE" }
                        ]
                    }]
                }]
            }
        })))
        .mount(&server)
        .await;
    let ctx = setup_test_app_with(with_figma(server.uri())).await;

    let (status, body) = ctx
        .post_json(
            "/api/figma/fetch",
            json!({"figmaUrl": "https://www.figma.com/design/AbC123/Checkout?node-id=1"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fileKey"], "AbC123");
    assert_eq!(body["data"]["fileName"], "결제 플로우");
    assert_eq!(body["data"]["designInfo"]["screens"][0]["name"], "결제");
    assert_eq!(body["data"]["designInfo"]["components"], json!(["PayButton"]));
    let formatted = body["data"]["formattedInfo"].as_str().unwrap();
    assert!(formatted.starts_with("## Figma 디자인 정보\n\n**파일명:** 결제 플로우\n"));
}

#[tokio::test]
async fn test_upstream_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/AbC123"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Invalid token"))
        .mount(&server)
        .await;
    let ctx = setup_test_app_with(with_figma(server.uri())).await;

    let (status, body) = ctx
        .post_json(
            "/api/figma/fetch",
            json!({"figmaUrl": "https://www.figma.com/file/AbC123/Checkout"}),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Figma API error: 403 - Invalid token");
}
