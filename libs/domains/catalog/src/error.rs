use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Errors for catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category with id {0} not found")]
    CategoryNotFound(i32),

    #[error("Menu with id {0} not found")]
    MenuNotFound(i32),

    #[error("Menu add-on with id {0} not found")]
    AddonNotFound(i32),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CategoryNotFound(_)
            | CatalogError::MenuNotFound(_)
            | CatalogError::AddonNotFound(_) => AppError::NotFound(err.to_string()),
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_menu_not_found_maps_to_404() {
        let response = CatalogError::MenuNotFound(7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response = CatalogError::Validation("price".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
