use super::jwt::{JwtAuth, TOKEN_TYPE_ACCESS};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Extract JWT from Authorization header or cookie
fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    // Try Authorization header first: "Bearer <token>"
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
        .or_else(|| {
            // Fallback to cookie: "access_token=<token>"
            headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        let parts: Vec<&str> = cookie.trim().splitn(2, '=').collect();
                        if parts.len() == 2 && parts[0] == "access_token" {
                            Some(parts[1].to_string())
                        } else {
                            None
                        }
                    })
                })
        })
}

/// JWT authentication middleware
///
/// Validates the Bearer token (Authorization header or `access_token`
/// cookie), requires an access-type token, and inserts `JwtClaims` into
/// request extensions on success.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::{jwt_auth_middleware, JwtAuth, JwtConfig};
///
/// let auth = JwtAuth::new(&JwtConfig::new("a-secret-that-is-32-characters-long"));
///
/// let protected_routes = Router::new()
///     .route("/protected", get(protected_handler))
///     .layer(axum::middleware::from_fn_with_state(
///         auth.clone(),
///         jwt_auth_middleware,
///     ));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_token_from_request(&headers) {
        Some(t) => t,
        None => {
            tracing::debug!("No JWT found in Authorization header or cookie");
            return Err(
                AppError::Unauthorized("Authentication credentials were not provided".to_string())
                    .into_response(),
            );
        }
    };

    // Verify JWT signature, expiry, and decode claims
    let claims = match auth.verify_token(&token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return Err(
                AppError::Unauthorized("Token is invalid or expired".to_string()).into_response(),
            );
        }
    };

    // Refresh tokens only prove identity to the token endpoints
    if claims.token_type != TOKEN_TYPE_ACCESS {
        tracing::debug!("Rejected non-access token: {}", claims.token_type);
        return Err(
            AppError::Unauthorized("Token has wrong type".to_string()).into_response(),
        );
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
