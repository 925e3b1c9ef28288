use axum::Router;
use domain_users::{auth_handlers, AuthState, PgUserRepository, UserService};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgUserRepository::new(state.db.clone());
    let service = UserService::new(repository);

    auth_handlers::router(AuthState {
        service,
        jwt: state.jwt.clone(),
    })
}
