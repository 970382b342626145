// ABOUTME: GitHub client tests against a mock REST server
// ABOUTME: Covers the three-call fetch, token forwarding, and status code mapping

use prdforge_integrations::{GitHubClient, IntegrationError};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PR_URL: &str = "https://github.com/acme/shop/pull/42";

async fn mount_pr(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/repos/acme/shop/pulls/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "장바구니 수량 변경",
            "body": "수량 버튼 추가",
            "user": { "login": "kim" },
            "state": "open",
            "base": { "ref": "main" },
            "head": { "ref": "feature/cart" },
            "additions": 120,
            "deletions": 30,
            "created_at": "2025-01-10T09:00:00Z",
            "updated_at": "2025-01-11T09:00:00Z"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/shop/pulls/42/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "sha": "a1", "commit": { "message": "Add buttons", "author": { "name": "Kim" } } },
            { "sha": "b2", "commit": { "message": "Fix total", "author": null } }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/shop/pulls/42/files"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "filename": "src/cart.ts", "status": "modified", "additions": 100, "deletions": 30, "changes": 130 },
            { "filename": "src/cart.test.ts", "status": "added", "additions": 20, "deletions": 0, "changes": 20 }
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_pull_request_assembles_data() {
    let server = MockServer::start().await;
    mount_pr(&server).await;

    let client = GitHubClient::new(None).unwrap().with_base_url(server.uri());
    let data = client.fetch_pull_request(PR_URL).await.unwrap();

    assert_eq!(data.owner, "acme");
    assert_eq!(data.repo, "shop");
    assert_eq!(data.pr_number, 42);
    assert_eq!(data.title, "장바구니 수량 변경");
    assert_eq!(data.description.as_deref(), Some("수량 버튼 추가"));
    assert_eq!(data.author, "kim");
    assert_eq!(data.base, "main");
    assert_eq!(data.head, "feature/cart");
    assert_eq!(data.diff, "2 files changed, +120 -30");
    assert_eq!(data.commits.len(), 2);
    assert_eq!(data.commits[1].author, "Unknown");
    assert_eq!(data.files[1].status, "added");
    assert_eq!(data.total_changed_lines(), 150);
}

#[tokio::test]
async fn test_token_is_sent_as_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/shop/pulls/42"))
        .and(header("authorization", "Bearer ghp_test"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::new(Some("ghp_test".to_string()))
        .unwrap()
        .with_base_url(server.uri());

    let err = client.fetch_pull_request(PR_URL).await.unwrap_err();
    assert!(matches!(err, IntegrationError::Unauthorized));
}

#[tokio::test]
async fn test_missing_pr_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let client = GitHubClient::new(None).unwrap().with_base_url(server.uri());
    let err = client.fetch_pull_request(PR_URL).await.unwrap_err();

    assert!(matches!(err, IntegrationError::PrNotFound(_)));
}

#[tokio::test]
async fn test_other_errors_carry_github_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "message": "API rate limit exceeded" })),
        )
        .mount(&server)
        .await;

    let client = GitHubClient::new(None).unwrap().with_base_url(server.uri());
    let err = client.fetch_pull_request(PR_URL).await.unwrap_err();

    match err {
        IntegrationError::GitHub(message) => assert_eq!(message, "API rate limit exceeded"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_url_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = GitHubClient::new(None).unwrap().with_base_url(server.uri());
    let err = client
        .fetch_pull_request("https://gitlab.com/acme/shop/merge_requests/1")
        .await
        .unwrap_err();

    assert!(matches!(err, IntegrationError::InvalidPrUrl(_)));
}
