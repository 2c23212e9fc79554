pub mod admin;
pub mod auth;
pub mod form;
pub mod middleware;
pub mod pages;
pub mod state;

pub use state::AppState;

use axum::{
    Router,
    routing::get,
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/admin", get(admin::admin_panel))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_admin,
        ));

    Router::new()
        .route("/register", get(auth::show_register).post(auth::register))
        .route("/login", get(auth::show_login).post(auth::login))
        .route("/logout", get(auth::logout))
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
