//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use stackit_types::error::{AuthError, QaError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Question/answer operation errors.
    Qa(QaError),
    /// Identity gate rejection.
    Auth(AuthError),
    /// Malformed request (body, path parameter).
    Validation(String),
}

impl From<QaError> for AppError {
    fn from(e: QaError) -> Self {
        AppError::Qa(e)
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl AppError {
    /// Status, machine-readable code and client-facing message.
    ///
    /// Storage details never reach the client.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Qa(QaError::Validation(msg)) | AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Qa(QaError::QuestionNotFound) => (
                StatusCode::NOT_FOUND,
                "QUESTION_NOT_FOUND",
                "Question not found".to_string(),
            ),
            AppError::Qa(QaError::AnswerNotFound) => (
                StatusCode::NOT_FOUND,
                "ANSWER_NOT_FOUND",
                "Answer not found".to_string(),
            ),
            AppError::Qa(QaError::Forbidden(msg)) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone())
            }
            AppError::Qa(QaError::StorageError(_) | QaError::Timeout(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
            AppError::Auth(e) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            if let AppError::Qa(e) = &self {
                tracing::error!(error = %e, "request failed");
            }
        }

        let body = json!({
            "data": null,
            "meta": {
                "request_id": uuid::Uuid::now_v7().to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        let mut response = (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Bearer"),
            );
        }

        response
    }
}
