// ABOUTME: Shared harness for API integration tests
// ABOUTME: Builds the router over an in-memory database with a scripted AI provider

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use prdforge_ai::{
    AIResponse, AIServiceError, AIServiceResult, GenerationPipeline, GenerationSettings,
    RetryPolicy, TextGenerator, Usage,
};
use prdforge_api::{create_api_router, AppState};
use prdforge_integrations::{FigmaClient, GitHubClient};
use prdforge_storage::init_memory_pool;
use serde_json::Value;
use tower::ServiceExt;

/// Provider that answers every prompt with the same text, or the same error
pub struct ScriptedProvider {
    reply: Result<String, (u16, String)>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16, message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err((status, message.to_string())),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedProvider {
    fn provider(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        "scripted"
    }

    async fn generate(
        &self,
        prompt: &str,
        _settings: &GenerationSettings,
    ) -> AIServiceResult<AIResponse<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(AIResponse {
                data: text.clone(),
                usage: Usage::default(),
            }),
            Err((status, message)) => Err(AIServiceError::ApiError {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

#[derive(Default)]
pub struct TestOptions {
    pub provider: Option<Arc<ScriptedProvider>>,
    pub github_base_url: Option<String>,
    pub figma: Option<(String, String)>,
}

pub struct TestContext {
    pub app: Router,
    pub state: AppState,
}

pub async fn setup_test_app(provider: Option<Arc<ScriptedProvider>>) -> TestContext {
    setup_test_app_with(TestOptions {
        provider,
        ..Default::default()
    })
    .await
}

pub async fn setup_test_app_with(options: TestOptions) -> TestContext {
    let pool = init_memory_pool().await.unwrap();

    let providers: Vec<Arc<dyn TextGenerator>> = options
        .provider
        .into_iter()
        .map(|p| p as Arc<dyn TextGenerator>)
        .collect();
    let pipeline = GenerationPipeline::new(providers).with_retry_policy(RetryPolicy::immediate(3));

    let mut github = GitHubClient::new(None).unwrap();
    if let Some(url) = options.github_base_url {
        github = github.with_base_url(url);
    }

    let figma = options
        .figma
        .map(|(token, url)| FigmaClient::new(Some(token)).unwrap().with_base_url(url));

    let state = AppState::new(pool, pipeline, github, figma);
    state.prompt_templates.seed_defaults().await.unwrap();

    TestContext {
        app: create_api_router(state.clone()),
        state,
    }
}

impl TestContext {
    async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body.to_vec())
    }

    async fn send_json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let (status, _, bytes) = self.send(request).await;
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send_json(Method::GET, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send_json(Method::POST, uri, Some(body)).await
    }

    pub async fn post(&self, uri: &str) -> (StatusCode, Value) {
        self.send_json(Method::POST, uri, None).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send_json(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send_json(Method::DELETE, uri, None).await
    }

    /// POST an arbitrary body, optionally without a content type
    pub async fn post_raw(&self, uri: &str, content_type: Option<&str>, body: &str) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        let (status, _, bytes) = self.send(request).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    /// GET returning headers and the raw text body, for downloads
    pub async fn get_text(&self, uri: &str) -> (StatusCode, HeaderMap, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, headers, bytes) = self.send(request).await;
        (status, headers, String::from_utf8(bytes).unwrap())
    }

    pub async fn post_json_text(&self, uri: &str, body: Value) -> (StatusCode, HeaderMap, String) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, headers, bytes) = self.send(request).await;
        (status, headers, String::from_utf8(bytes).unwrap())
    }
}
