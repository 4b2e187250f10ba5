use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// The primary error type for the application.
///
/// Every handler returns [`AppResult`]; the variant decides the status code and
/// the body shape of the response.
#[derive(Debug, Error)]
pub enum AppError {
    /// Unexpected failures. Logged with a generated error id.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
    /// Field validation failed. The body is a bare JSON array of messages.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    /// No record for the requested id. Answered with an empty body.
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
    /// A multipart request lacked a part, or carried the wrong kind of part.
    #[error("Missing part: {name}")]
    MissingPart { name: String, expected: &'static str },
    #[error("Database error: {0}")]
    Database(String),
    #[error("I/O error: {0}")]
    IoError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, error_message, details) = match self {
            AppError::Validation(messages) => {
                tracing::info!("Validation rejected request: {:?}", messages);
                return (StatusCode::BAD_REQUEST, Json(messages)).into_response();
            }
            AppError::NotFound(what) => {
                tracing::debug!("Not found: {}", what);
                return StatusCode::NOT_FOUND.into_response();
            }
            AppError::Internal(e) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!(%error_id, "Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    Some(json!({ "error_id": error_id.to_string() })),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg, None),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg, None),
            AppError::MissingPart { name, expected } => (
                StatusCode::BAD_REQUEST,
                "MISSING_PART",
                format!("Multipart request requires a {} part named '{}'", expected, name),
                Some(json!({ "part": name, "expected": expected })),
            ),
            AppError::Database(msg) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!(%error_id, "Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                    Some(json!({ "error_id": error_id.to_string() })),
                )
            }
            AppError::IoError(msg) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!(%error_id, "I/O error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IO_ERROR",
                    "An I/O error occurred".to_string(),
                    Some(json!({ "error_id": error_id.to_string() })),
                )
            }
        };

        let mut body = json!({
            "error": {
                "code": error_code,
                "message": error_message,
            },
            "status": status.as_u16(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        if let Some(details) = details {
            body["error"]["details"] = details;
        }

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("record".to_string()),
            sqlx::Error::Database(db_err) => AppError::Database(db_err.message().to_string()),
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(format!("{}: {}", err.kind(), err))
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(err.body_text());
        }
        AppError::BadRequest(format!("Malformed multipart body: {}", err.body_text()))
    }
}

/// A type alias for `Result<T, AppError>`, used throughout the application.
pub type AppResult<T> = Result<T, AppError>;

/// Converts an `Option` into an [`AppError::NotFound`] result.
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(entity.to_string()))
    }
}
