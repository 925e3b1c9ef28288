use axum_helpers::errors::responses::{
    BadRequestValidationResponse, ConflictResponse, UnauthorizedResponse,
};
use domain_users::{LoginRequest, RegisterRequest, TokenPairResponse};
use utoipa::OpenApi;

/// Aggregated OpenAPI documentation for the catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        description = "Product catalog backend: registration, JWT login, and product CRUD"
    ),
    nest(
        (path = "/products", api = domain_products::ApiDoc)
    ),
    paths(
        domain_users::auth_handlers::register,
        domain_users::auth_handlers::login,
    ),
    components(
        schemas(RegisterRequest, LoginRequest, TokenPairResponse),
        responses(
            BadRequestValidationResponse,
            ConflictResponse,
            UnauthorizedResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Auth", description = "Registration and login")
    )
)]
pub struct ApiDoc;
