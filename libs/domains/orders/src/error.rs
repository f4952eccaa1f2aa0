use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_catalog::CatalogError;
use domain_customers::CustomerError;
use thiserror::Error;

/// Errors for order and payment operations.
///
/// Reference failures during order creation (unknown customer, menu, or
/// add-on) are client errors and map to 400; lookups of missing orders or
/// payments on read paths map to 404.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order must contain at least one item")]
    EmptyOrder,

    #[error("Customer with id {0} not found")]
    CustomerNotFound(i32),

    #[error("Menu with id {0} not found")]
    MenuNotFound(i32),

    #[error("Menu add-on with id {0} not found")]
    AddonNotFound(i32),

    #[error("Order with id {0} not found")]
    NotFound(i32),

    #[error("Payment with id {0} not found")]
    PaymentNotFound(i32),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::EmptyOrder
            | OrderError::CustomerNotFound(_)
            | OrderError::MenuNotFound(_)
            | OrderError::AddonNotFound(_) => AppError::BadRequest(err.to_string()),
            OrderError::NotFound(_) | OrderError::PaymentNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            OrderError::Validation(msg) => AppError::BadRequest(msg),
            OrderError::Catalog(e) => e.into(),
            OrderError::Customer(e) => e.into(),
            OrderError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_reference_errors_map_to_400() {
        for err in [
            OrderError::EmptyOrder,
            OrderError::CustomerNotFound(42),
            OrderError::MenuNotFound(999),
            OrderError::AddonNotFound(7),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_missing_order_maps_to_404() {
        let response = OrderError::NotFound(1).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_error_maps_to_500() {
        let err = OrderError::Database(sea_orm::DbErr::Custom("boom".to_string()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
