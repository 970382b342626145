// ABOUTME: JSON body extractor that rejects malformed requests with the API error envelope
// ABOUTME: Replaces axum's plain-text 400/415/422 rejections with a Korean 400

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use tracing::warn;

use crate::error::{ApiError, BAD_REQUEST};

/// `Json<T>` whose rejection is an [`ApiError::BadRequest`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                Err(ApiError::BadRequest(rejection_message(&rejection)))
            }
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    let detail = match rejection {
        JsonRejection::JsonDataError(_) => "필수 항목이 없거나 형식이 올바르지 않습니다",
        JsonRejection::JsonSyntaxError(_) => "요청 본문이 올바른 JSON이 아닙니다",
        JsonRejection::MissingJsonContentType(_) => "Content-Type은 application/json이어야 합니다",
        _ => "요청 본문을 읽을 수 없습니다",
    };
    format!("{}: {}", BAD_REQUEST, detail)
}
