// ABOUTME: Integration tests for prompt template administration and prompt testing
// ABOUTME: Verifies versioned edits, activation, history, and admin dry runs

mod common;

use axum::http::StatusCode;
use common::{setup_test_app, ScriptedProvider, TestContext};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

async fn template_of_type(ctx: &TestContext, kind: &str) -> Value {
    let (_, list) = ctx.get("/api/prompts").await;
    list["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["type"] == kind)
        .cloned()
        .unwrap()
}

#[tokio::test]
async fn test_defaults_are_seeded_for_every_kind() {
    let ctx = setup_test_app(None).await;

    let (status, body) = ctx.get("/api/prompts").await;

    assert_eq!(status, StatusCode::OK);
    let templates = body["data"].as_array().unwrap();
    assert_eq!(templates.len(), 4);
    assert!(templates.iter().all(|t| t["isActive"] == true && t["version"] == 1));
}

#[tokio::test]
async fn test_update_bumps_version_and_records_history() {
    let ctx = setup_test_app(None).await;
    let template = template_of_type(&ctx, "chat_refinement").await;
    let id = template["id"].as_str().unwrap();

    let (status, updated) = ctx
        .put_json(
            &format!("/api/prompts/{}", id),
            json!({"content": "PRD: {currentPrd}\n질문: {message}", "changeNote": "간결하게"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["version"], 2);

    let (_, history) = ctx.get(&format!("/api/prompts/{}/history", id)).await;
    let versions = history["data"].as_array().unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0]["version"], 1);
    assert_eq!(versions[0]["content"], template["content"]);
    assert_eq!(versions[0]["changeNote"], "간결하게");
}

#[tokio::test]
async fn test_edited_template_drives_generation() {
    let provider = ScriptedProvider::replying("# PRD");
    let ctx = setup_test_app(Some(provider.clone())).await;
    let template = template_of_type(&ctx, "prd_generation").await;

    ctx.put_json(
        &format!("/api/prompts/{}", template["id"].as_str().unwrap()),
        json!({"content": "짧은 PRD: {title}"}),
    )
    .await;
    ctx.post_json("/api/prd/generate", json!({"title": "메모 앱"}))
        .await;

    assert_eq!(provider.prompts(), vec!["짧은 PRD: 메모 앱"]);

    let (_, active) = ctx.get("/api/prd/get-prompt").await;
    assert_eq!(active["data"]["version"], 2);
    assert_eq!(active["data"]["parameters"], json!(["title"]));
}

#[tokio::test]
async fn test_blank_content_is_rejected() {
    let ctx = setup_test_app(None).await;
    let template = template_of_type(&ctx, "prd_generation").await;

    let (status, body) = ctx
        .put_json(
            &format!("/api/prompts/{}", template["id"].as_str().unwrap()),
            json!({"content": "   "}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_activate_and_unknown_template() {
    let ctx = setup_test_app(None).await;
    let template = template_of_type(&ctx, "github_pr_analysis").await;

    let (status, body) = ctx
        .post(&format!("/api/prompts/{}/activate", template["id"].as_str().unwrap()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isActive"], true);

    let (status, body) = ctx.get("/api/prompts/prompt_missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "요청한 데이터를 찾을 수 없습니다");
}

#[tokio::test]
async fn test_activated_duplicate_replaces_active_prompt() {
    let provider = ScriptedProvider::replying("# PRD");
    let ctx = setup_test_app(Some(provider.clone())).await;
    let original = template_of_type(&ctx, "prd_generation").await;
    let original_id = original["id"].as_str().unwrap();

    let (status, copy) = ctx
        .post(&format!("/api/prompts/{}/duplicate", original_id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(copy["data"]["isActive"], false);
    assert_eq!(copy["data"]["version"], 1);
    let copy_id = copy["data"]["id"].as_str().unwrap().to_string();
    assert_ne!(copy_id, original_id);

    // The inactive draft does not affect generation until activated
    ctx.put_json(
        &format!("/api/prompts/{}", copy_id),
        json!({"content": "초안: {title}"}),
    )
    .await;
    let (_, active) = ctx.get("/api/prd/get-prompt").await;
    assert_eq!(active["data"]["templateId"], original_id);

    let (status, _) = ctx.post(&format!("/api/prompts/{}/activate", copy_id)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, active) = ctx.get("/api/prd/get-prompt").await;
    assert_eq!(active["data"]["templateId"], copy_id.as_str());
    let (_, previous) = ctx.get(&format!("/api/prompts/{}", original_id)).await;
    assert_eq!(previous["data"]["isActive"], false);

    ctx.post_json("/api/prd/generate", json!({"title": "메모 앱"}))
        .await;
    assert_eq!(provider.prompts(), vec!["초안: 메모 앱"]);

    let (status, _) = ctx.post("/api/prompts/prompt_missing/duplicate").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_prompt_test_substitutes_key_value_input() {
    let provider = ScriptedProvider::replying("테스트 결과");
    let ctx = setup_test_app(Some(provider.clone())).await;

    let (status, body) = ctx
        .post_json(
            "/api/admin/test-prompt",
            json!({
                "promptTemplate": "{title} for {targetaudience}",
                "testInput": "Title: 메모 앱\nTargetAudience: 학생",
                "promptType": "prd_generation"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["result"], "테스트 결과");
    assert_eq!(body["data"]["promptUsed"], "메모 앱 for 학생");
}

#[tokio::test]
async fn test_prompt_test_substitutes_input_for_other_kinds() {
    let ctx = setup_test_app(Some(ScriptedProvider::replying("ok"))).await;

    let (status, body) = ctx
        .post_json(
            "/api/admin/test-prompt",
            json!({
                "promptTemplate": "분석: {input}",
                "testInput": "PR 설명",
                "promptType": "github_pr_analysis"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["promptUsed"], "분석: PR 설명");
}

#[tokio::test]
async fn test_prompt_test_rejects_unknown_type() {
    let ctx = setup_test_app(Some(ScriptedProvider::replying("ok"))).await;

    let (status, body) = ctx
        .post_json(
            "/api/admin/test-prompt",
            json!({"promptTemplate": "x", "testInput": "", "promptType": "summary"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "알 수 없는 프롬프트 유형입니다: summary");
}
