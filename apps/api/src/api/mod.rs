//! API routes module

pub mod health;

use axum::Router;
use axum_helpers::JwtAuth;
use domain_catalog::{CatalogService, PgCatalogRepository};
use domain_customers::{CustomerService, PgCustomerRepository};
use domain_orders::{OrderService, PgOrderRepository};
use domain_users::{AuthState, PgUserRepository, UserService};

use crate::state::AppState;

/// Create all API routes
///
/// Each domain router already carries its own state and JWT-protected
/// sub-routes, so they merge into one flat router here.
pub fn routes(state: &AppState, jwt_auth: JwtAuth) -> Router {
    let catalog = CatalogService::new(PgCatalogRepository::new(state.db.clone()));
    let customers = CustomerService::new(PgCustomerRepository::new(state.db.clone()));
    let orders = OrderService::new(
        PgOrderRepository::new(state.db.clone()),
        PgCatalogRepository::new(state.db.clone()),
        PgCustomerRepository::new(state.db.clone()),
    );
    let users = UserService::new(PgUserRepository::new(state.db.clone()));

    Router::new()
        .merge(domain_catalog::handlers::router(catalog, jwt_auth.clone()))
        .merge(domain_customers::handlers::router(customers, jwt_auth.clone()))
        .merge(domain_orders::handlers::router(orders, jwt_auth.clone()))
        .merge(domain_users::handlers::router(AuthState {
            service: users,
            jwt_auth,
        }))
}
