use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_database::AppState;

use crate::handlers;

pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/hospital/login", post(handlers::hospital_login))
        .route("/user/login", post(handlers::user_login))
        .route("/user/register", post(handlers::user_register))
        .route("/session", get(handlers::get_session))
        .route("/logout", post(handlers::logout))
        .with_state(state)
}
