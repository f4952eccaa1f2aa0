//! Customers Domain
//!
//! Customer directory: the optional owner of an order. Follows the same
//! handler/service/repository layering as the other domain crates.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CustomerError, CustomerResult};
pub use handlers::ApiDoc;
pub use models::{CreateCustomer, Customer, CustomerFilter, UpdateCustomer};
pub use postgres::PgCustomerRepository;
pub use repository::{CustomerRepository, InMemoryCustomerRepository};
pub use service::CustomerService;
