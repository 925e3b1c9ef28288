use axum::{routing::get, Router};

pub mod auth;
pub mod health;
pub mod products;

/// Fixed greeting used as an unauthenticated liveness probe.
async fn index() -> &'static str {
    "Hello"
}

/// Creates the API routes.
///
/// This function takes a reference to AppState and initializes all
/// services. Returns a stateless Router (sub-routers have their state
/// already applied); only cheap Arc clones remain.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .merge(auth::router(state))
        .nest("/products", products::router(state))
}

/// Creates a router with the /ready endpoint that performs actual health
/// checks.
///
/// This router has state applied and can be merged with the stateless app
/// router from `create_router`. The /ready endpoint pings the database.
pub fn ready_router(state: crate::state::AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
