use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// 积分计算错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("Invalid purchase date: {0:?}")]
    InvalidDate(String),

    #[error("Invalid purchase time: {0:?}")]
    InvalidTime(String),
}

/// 积分存储错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Receipt id already exists: {0}")]
    DuplicateId(String),

    #[error("No receipt found for id: {0}")]
    NotFound(String),
}

/// HTTP 层错误
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid receipt payload: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload(_) | ApiError::Score(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::DuplicateId(_)) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::InvalidPayload("eof".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ScoreError::InvalidTime("25:00".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(StoreError::NotFound("abc".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(StoreError::DuplicateId("abc".into())).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn score_error_message_passes_through() {
        let err = ApiError::from(ScoreError::InvalidDate("2022-13-01".into()));
        assert_eq!(err.to_string(), "Invalid purchase date: \"2022-13-01\"");
    }
}
