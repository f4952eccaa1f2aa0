//! Catalog Domain
//!
//! Categories, menu items, and per-item add-ons for the café catalog.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use models::{
    Category, CreateMenu, CreateMenuAddon, Menu, MenuAddon, MenuFilter, UpdateCategory,
    UpdateMenu, UpdateMenuAddon,
};
pub use postgres::PgCatalogRepository;
pub use repository::{CatalogRepository, InMemoryCatalogRepository};
pub use service::CatalogService;
