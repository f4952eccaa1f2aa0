//! Users Domain
//!
//! Staff accounts: registration, argon2 password hashing, credential
//! verification, and the auth endpoints issuing JWT bearer tokens.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::{ApiDoc, AuthState};
pub use models::{LoginRequest, NewUser, RegisterRequest, TokenResponse, User, UserResponse};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
