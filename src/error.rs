use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Whether 500 responses carry a `detail` field (development mode only).
static EXPOSE_DETAILS: AtomicBool = AtomicBool::new(false);

pub fn set_expose_details(enabled: bool) {
    EXPOSE_DETAILS.store(enabled, Ordering::Relaxed);
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    /// Stable machine-readable code sent alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::AuthError(_) => "AUTH_ERROR",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::AuthError(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::ConfigError(msg)
            | AppError::InternalError(msg) => msg.clone(),
            AppError::DatabaseError(err) => err.to_string(),
            AppError::JwtError(err) => err.to_string(),
            AppError::SerdeJsonError(err) => err.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let message = self.message();

        if status_code.is_server_error() {
            log::error!("{}: {self}", self.code());
        } else if status_code != StatusCode::NOT_FOUND {
            log::warn!("{}: {message}", self.code());
        }

        let mut body = json!({
            "success": false,
            "message": message,
            "error": {
                "code": self.code(),
                "message": message
            }
        });
        if status_code.is_server_error() && EXPOSE_DETAILS.load(Ordering::Relaxed) {
            body["detail"] = json!(format!("{self:?}"));
        }

        HttpResponse::build(status_code).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        let cases = [
            (AppError::ValidationError("x".into()), 400),
            (AppError::AuthError("x".into()), 401),
            (AppError::Forbidden("x".into()), 403),
            (AppError::NotFound("x".into()), 404),
            (AppError::Conflict("x".into()), 409),
            (AppError::InternalError("x".into()), 500),
            (
                AppError::DatabaseError(sea_orm::DbErr::Custom("boom".into())),
                500,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code().as_u16(), status, "{err}");
        }
    }

    #[test]
    fn test_internal_message_is_passed_through() {
        let err = AppError::DatabaseError(sea_orm::DbErr::Custom("disk full".into()));
        assert!(err.message().contains("disk full"));
        assert_eq!(err.code(), "DATABASE_ERROR");
    }
}
