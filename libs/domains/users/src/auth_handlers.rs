//! HTTP handlers for registration and login.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{BadRequestValidationResponse, ConflictResponse, UnauthorizedResponse},
    JwtAuth, ValidatedJson,
};

use crate::error::UserError;
use crate::models::{LoginRequest, RegisterRequest, TokenPairResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Application state for auth handlers
pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub jwt: JwtAuth,
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            jwt: self.jwt.clone(),
        }
    }
}

/// Create the auth router with registration and login endpoints.
///
/// Routes are registered with and without the trailing slash the API
/// contract uses.
pub fn router<R: UserRepository + 'static>(state: AuthState<R>) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/register/", post(register))
        .route("/login", post(login))
        .route("/login/", post(login))
        .with_state(state)
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = String),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse)
    )
)]
pub async fn register<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, UserError> {
    let user = state.service.register(input).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "New user registered");

    Ok((StatusCode::CREATED, Json("New user created")))
}

/// Login with username/password, returning a JWT token pair
#[utoipa::path(
    post,
    path = "/login/",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token pair", body = TokenPairResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
pub async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenPairResponse>, UserError> {
    let user = state
        .service
        .verify_credentials(&input.username, &input.password)
        .await?;

    let user_id = user.id.to_string();

    let access = state
        .jwt
        .create_access_token(&user_id, &user.username, &user.email)
        .map_err(|e| {
            tracing::error!("Failed to create access token: {:?}", e);
            UserError::Internal("Failed to create token".to_string())
        })?;

    let refresh = state
        .jwt
        .create_refresh_token(&user_id, &user.username, &user.email)
        .map_err(|e| {
            tracing::error!("Failed to create refresh token: {:?}", e);
            UserError::Internal("Failed to create token".to_string())
        })?;

    tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

    Ok(Json(TokenPairResponse { access, refresh }))
}
