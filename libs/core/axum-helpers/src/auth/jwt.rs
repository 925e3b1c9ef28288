use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT token time-to-live constants
pub const ACCESS_TOKEN_TTL: i64 = 900; // 15 minutes
pub const REFRESH_TOKEN_TTL: i64 = 604800; // 7 days

/// Token type discriminators carried in the claims
pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,        // Subject (user ID)
    pub username: String,   // Login name
    pub email: String,      // User email
    pub token_type: String, // "access" or "refresh"
    pub exp: i64,           // Expiration time
    pub iat: i64,           // Issued at
    pub jti: String,        // JWT ID
}

impl JwtClaims {
    /// Parse the subject back into a numeric user id.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Stateless JWT authentication.
///
/// Issues an access/refresh token pair and verifies token signatures.
/// There is no server-side token store; a token is valid until it
/// expires.
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
}

impl JwtAuth {
    /// Create a new JWT auth instance from configuration.
    ///
    /// # Example
    /// ```ignore
    /// use axum_helpers::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let config = JwtConfig::from_env()?;
    /// let jwt = JwtAuth::new(&config);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
        }
    }

    /// Create access token (15 min)
    pub fn create_access_token(
        &self,
        user_id: &str,
        username: &str,
        email: &str,
    ) -> eyre::Result<String> {
        self.create_token(user_id, username, email, ACCESS_TOKEN_TTL, TOKEN_TYPE_ACCESS)
    }

    /// Create refresh token (7 days)
    pub fn create_refresh_token(
        &self,
        user_id: &str,
        username: &str,
        email: &str,
    ) -> eyre::Result<String> {
        self.create_token(
            user_id,
            username,
            email,
            REFRESH_TOKEN_TTL,
            TOKEN_TYPE_REFRESH,
        )
    }

    /// Create JWT token with specified TTL and type
    fn create_token(
        &self,
        user_id: &str,
        username: &str,
        email: &str,
        ttl_seconds: i64,
        token_type: &str,
    ) -> eyre::Result<String> {
        let now = Utc::now();
        let exp = (now + Duration::seconds(ttl_seconds)).timestamp();
        let iat = now.timestamp();
        let jti = Uuid::new_v4().to_string();

        let claims = JwtClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            token_type: token_type.to_string(),
            exp,
            iat,
            jti,
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify JWT token signature and decode claims
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("unit-test-secret-key-32-characters!!"))
    }

    #[test]
    fn test_access_token_round_trip() {
        let auth = test_auth();
        let token = auth.create_access_token("1", "alice", "a@x.com").unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.sub, "1");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.token_type, TOKEN_TYPE_ACCESS);
        assert_eq!(claims.user_id(), Some(1));
    }

    #[test]
    fn test_refresh_token_has_refresh_type() {
        let auth = test_auth();
        let token = auth.create_refresh_token("7", "bob", "b@x.com").unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.token_type, TOKEN_TYPE_REFRESH);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let auth = test_auth();
        let other = JwtAuth::new(&JwtConfig::new("another-secret-key-with-32-chars!!!!"));

        let token = auth.create_access_token("1", "alice", "a@x.com").unwrap();
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let auth = test_auth();
        assert!(auth.verify_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_tokens_have_unique_jti() {
        let auth = test_auth();
        let a = auth.create_access_token("1", "alice", "a@x.com").unwrap();
        let b = auth.create_access_token("1", "alice", "a@x.com").unwrap();

        let ca = auth.verify_token(&a).unwrap();
        let cb = auth.verify_token(&b).unwrap();
        assert_ne!(ca.jti, cb.jti);
    }
}
