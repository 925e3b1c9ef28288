//! Users Domain
//!
//! User registration and credential verification for the catalog API.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐
//! │ Auth handlers │  ← /register and /login endpoints
//! └──────┬────────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, Argon2 password hashing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory + Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{
//!     auth_handlers::{self, AuthState},
//!     repository::InMemoryUserRepository,
//!     service::UserService,
//! };
//!
//! let repository = InMemoryUserRepository::new();
//! let service = UserService::new(repository);
//! let jwt = JwtAuth::new(&JwtConfig::new("a-secret-that-is-32-characters-long"));
//!
//! let router = auth_handlers::router(AuthState { service, jwt });
//! ```

pub mod auth_handlers;
pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use auth_handlers::AuthState;
pub use error::{UserError, UserResult};
pub use models::{LoginRequest, NewUser, RegisterRequest, TokenPairResponse, User};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
