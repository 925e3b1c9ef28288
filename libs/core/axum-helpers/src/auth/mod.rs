//! JWT authentication.
//!
//! Stateless HS256 tokens issued as an access/refresh pair. The access
//! token guards the protected API routes via [`jwt_auth_middleware`];
//! the refresh token only proves identity to the token endpoints.

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, ACCESS_TOKEN_TTL, REFRESH_TOKEN_TTL, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
pub use middleware::jwt_auth_middleware;
