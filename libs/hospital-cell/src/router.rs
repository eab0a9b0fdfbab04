use std::sync::Arc;

use axum::{routing::{get, post}, Router};

use shared_database::AppState;

use crate::handlers;

pub fn hospital_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/register", post(handlers::register_hospital))
        .route("/profile", get(handlers::get_profile).put(handlers::update_profile))

        // Patient-facing
        .route("/directory", get(handlers::get_directory))
        .route("/catalog", get(handlers::get_catalogue))

        .with_state(state)
}
