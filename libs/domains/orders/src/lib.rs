//! Orders Domain
//!
//! The core of the system: order creation with server-side pricing,
//! atomic persistence of the order header and its items, order CRUD,
//! and payments.
//!
//! Order creation flow:
//!
//! ```text
//! CreateOrder ──► validate references ──► price lines ──► one transaction
//!                 (customer, menus,       (catalog price   (header + items
//!                  add-ons)                snapshot)         commit together)
//! ```
//!
//! The service is generic over three repository traits: its own
//! [`repository::OrderRepository`] plus the catalog and customer
//! repositories it validates against.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod pricing;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateOrder, CreateOrderItem, CreatePayment, NewOrder, NewOrderItem, Order, OrderItem,
    OrderWithItems, Payment, UpdateOrder, UpdatePayment,
};
pub use postgres::PgOrderRepository;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
