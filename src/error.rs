use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Every handler failure funnels through this type, so every request
/// terminates with a JSON response.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    // Deliberately does not say whether the email or the password was wrong.
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Authentication required")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
    #[error(transparent)]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AppError::Hash(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Db(_) | AppError::Hash(_) | AppError::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {self}");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}
