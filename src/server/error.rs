//! HTTP error responses.

use crate::error::SeoError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

/// Errors returned by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The request body could not be read.
    BadRequest(String),
    Seo(SeoError),
}

impl From<SeoError> for ApiError {
    fn from(e: SeoError) -> Self {
        ApiError::Seo(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Seo(e) => match e {
                SeoError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                SeoError::VideoNotFound(_) | SeoError::ResultNotFound(_) => StatusCode::NOT_FOUND,
                SeoError::YoutubeApi { .. } if e.is_quota_exceeded() => StatusCode::TOO_MANY_REQUESTS,
                SeoError::YoutubeApi { .. }
                | SeoError::Scrape(_)
                | SeoError::Llm(_)
                | SeoError::Http(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Seo(SeoError::InvalidInput(msg)) => msg.clone(),
            ApiError::Seo(e) => e.to_string(),
        };

        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", status, detail);
        }

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
