// ABOUTME: Figma client tests against a mock REST server
// ABOUTME: Checks the token header, error formatting, and parsing of a fetched file

use prdforge_integrations::{parse_figma_design, FigmaClient, IntegrationError};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_client_requires_token() {
    assert!(matches!(
        FigmaClient::new(None),
        Err(IntegrationError::MissingFigmaToken)
    ));
    assert!(matches!(
        FigmaClient::new(Some("  ".to_string())),
        Err(IntegrationError::MissingFigmaToken)
    ));
}

#[tokio::test]
async fn test_fetch_file_and_parse() {
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

    let client = FigmaClient::new(Some("figd_test".to_string()))
        .unwrap()
        .with_base_url(server.uri());

    let file = client.fetch_file("AbC123").await.unwrap();
    let info = parse_figma_design(&file);

    assert_eq!(info.file_name, "결제 플로우");
    assert_eq!(info.screens.len(), 1);
    assert_eq!(info.screens[0].elements.len(), 2);
    assert_eq!(info.components, vec!["PayButton".to_string()]);
    assert_eq!(info.text_content, vec!["결제하기".to_string()]);
}

#[tokio::test]
async fn test_fetch_error_includes_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Invalid token"))
        .mount(&server)
        .await;

    let client = FigmaClient::new(Some("bad".to_string()))
        .unwrap()
        .with_base_url(server.uri());

    let err = client.fetch_file("AbC123").await.unwrap_err();
    assert_eq!(err.to_string(), "Figma API error: 403 - Invalid token");
}
