//! Authentication and authorization module.
//!
//! This module provides:
//! - Stateless JWT token creation and verification (HS256)
//! - Authentication middleware for protected routes
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! // Load config and create auth instance
//! let config = JwtConfig::from_env()?;
//! let auth = JwtAuth::new(&config);
//!
//! // Protect routes with JWT middleware
//! let protected = Router::new()
//!     .route("/api/protected", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

// Re-export commonly used types
pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, ACCESS_TOKEN_TTL, REFRESH_TOKEN_TTL};
pub use middleware::{jwt_auth_middleware, optional_jwt_auth_middleware};
