// ABOUTME: HTTP API layer for PRDForge providing REST endpoints and routing
// ABOUTME: Integration layer that depends on all domain packages

use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub mod error;
pub mod extract;
pub mod figma_handlers;
pub mod github_handlers;
pub mod prd_handlers;
pub mod prompt_handlers;
pub mod response;
pub mod state;
pub mod test_case_handlers;
pub mod usage_handlers;

pub use error::ApiError;
pub use extract::ApiJson;
pub use response::ApiResponse;
pub use state::AppState;

/// PRD generation, chat, and saved PRD history
pub fn create_prd_router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(prd_handlers::generate_prd))
        .route("/chat", post(prd_handlers::chat))
        .route("/get-prompt", get(prd_handlers::get_prd_prompt))
}

pub fn create_prds_router() -> Router<AppState> {
    Router::new()
        .route("/", get(prd_handlers::list_prds))
        .route("/{id}", get(prd_handlers::get_prd))
        .route("/{id}", delete(prd_handlers::delete_prd))
        .route("/{id}/export", get(prd_handlers::export_prd))
}

pub fn create_github_router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(github_handlers::analyze_pr))
        .route("/get-prompt", get(github_handlers::get_github_prompt))
}

pub fn create_pr_analyses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(github_handlers::list_pr_analyses))
        .route("/{id}", get(github_handlers::get_pr_analysis))
        .route("/{id}", delete(github_handlers::delete_pr_analysis))
        .route("/{id}/export", get(github_handlers::export_pr_analysis))
}

pub fn create_test_cases_router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(test_case_handlers::generate_test_cases))
        .route("/export", post(test_case_handlers::export_test_cases))
}

pub fn create_test_case_sets_router() -> Router<AppState> {
    Router::new()
        .route("/", get(test_case_handlers::list_test_case_sets))
        .route("/", post(test_case_handlers::create_test_case_set))
        .route("/{id}", get(test_case_handlers::get_test_case_set))
        .route("/{id}", delete(test_case_handlers::delete_test_case_set))
        .route("/{id}/export", get(test_case_handlers::export_test_case_set))
}

pub fn create_figma_router() -> Router<AppState> {
    Router::new().route("/fetch", post(figma_handlers::fetch_figma))
}

pub fn create_admin_router() -> Router<AppState> {
    Router::new().route("/test-prompt", post(prompt_handlers::test_prompt))
}

pub fn create_prompts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(prompt_handlers::list_templates))
        .route("/{id}", get(prompt_handlers::get_template))
        .route("/{id}", put(prompt_handlers::update_template))
        .route("/{id}/duplicate", post(prompt_handlers::duplicate_template))
        .route("/{id}/activate", post(prompt_handlers::activate_template))
        .route("/{id}/history", get(prompt_handlers::template_history))
}

pub fn create_usage_router() -> Router<AppState> {
    Router::new()
        .route("/", get(usage_handlers::get_summary))
        .route("/records", get(usage_handlers::list_records))
        .route("/reset", post(usage_handlers::reset_usage))
}

/// Every feature router nested under `/api`, with state applied
pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/prd", create_prd_router())
        .nest("/api/prds", create_prds_router())
        .nest("/api/github", create_github_router())
        .nest("/api/pr-analyses", create_pr_analyses_router())
        .nest("/api/test-cases", create_test_cases_router())
        .nest("/api/test-case-sets", create_test_case_sets_router())
        .nest("/api/figma", create_figma_router())
        .nest("/api/admin", create_admin_router())
        .nest("/api/prompts", create_prompts_router())
        .nest("/api/usage", create_usage_router())
        .with_state(state)
}
