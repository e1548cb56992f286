//! HTTP error mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use scribe_core::logging;

/// Message returned for every internal failure; details stay in the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Error returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Internal(scribe_core::Error),
}

impl From<scribe_core::Error> for ApiError {
    fn from(err: scribe_core::Error) -> Self {
        match err {
            scribe_core::Error::Validation(msg) => ApiError::BadRequest(msg),
            scribe_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::Internal(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        warn!(
            { logging::COMPONENT } = "http",
            status = rejection.status().as_u16(),
            { logging::ERROR_MSG } = message.as_str(),
            "api: rejected request body"
        );
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(message)
        } else {
            ApiError::BadRequest(message)
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(err) => {
                let detail = err.to_string();
                error!(
                    { logging::COMPONENT } = "http",
                    { logging::ERROR_MSG } = detail.as_str(),
                    "api: request failed"
                );
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::PayloadTooLarge(msg) => msg,
        };

        let body = Json(serde_json::json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}
