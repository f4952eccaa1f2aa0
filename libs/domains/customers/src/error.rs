use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Errors for customer operations
#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("Customer with id {0} not found")]
    NotFound(i32),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub type CustomerResult<T> = Result<T, CustomerError>;

impl From<CustomerError> for AppError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::NotFound(_) => AppError::NotFound(err.to_string()),
            CustomerError::Validation(msg) => AppError::BadRequest(msg),
            CustomerError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CustomerError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
