// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of domain errors onto HTTP responses.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use soulfan_core::SoulfanError;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `"error"`.
    pub status: &'static str,
    pub error: String,
}

/// Handler error: a domain error or a malformed request body or path.
#[derive(Debug)]
pub enum ApiError {
    Domain(SoulfanError),
    BadRequest(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => match err {
                SoulfanError::Validation(_) => StatusCode::BAD_REQUEST,
                SoulfanError::NotFound(_) => StatusCode::NOT_FOUND,
                SoulfanError::Conflict(_) | SoulfanError::AlreadyCertified { .. } => {
                    StatusCode::CONFLICT
                }
                SoulfanError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<SoulfanError> for ApiError {
    fn from(err: SoulfanError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = match self {
            ApiError::BadRequest(message) => message,
            ApiError::Domain(err) => err.to_string(),
        };
        if status.is_server_error() {
            tracing::error!(%status, %error, "request failed");
        } else {
            tracing::debug!(%status, %error, "request rejected");
        }
        (
            status,
            Json(ErrorResponse {
                status: "error",
                error,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soulfan_core::PublishError;

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (SoulfanError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (SoulfanError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (SoulfanError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                SoulfanError::Publish(PublishError::InvalidUrl { stdout: String::new() }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                SoulfanError::Provider {
                    message: "x".into(),
                    source: None,
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status_code(), expected);
        }
    }

    #[test]
    fn error_body_has_status_field() {
        let body = serde_json::to_value(ErrorResponse {
            status: "error",
            error: "boom".into(),
        })
        .unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "boom");
    }
}
