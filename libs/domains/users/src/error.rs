use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Errors for staff account operations
#[derive(Debug, Error)]
pub enum UserError {
    #[error("An account with email '{0}' already exists")]
    EmailTaken(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User with id {0} not found")]
    NotFound(i32),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailTaken(_) => AppError::Conflict(err.to_string()),
            UserError::InvalidCredentials => AppError::Unauthorized(err.to_string()),
            UserError::NotFound(_) => AppError::NotFound(err.to_string()),
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::PasswordHash(_) | UserError::Internal(_) => {
                AppError::InternalServerError(err.to_string())
            }
            UserError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_invalid_credentials_maps_to_401() {
        let response = UserError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_email_taken_maps_to_409() {
        let response = UserError::EmailTaken("a@b.com".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
