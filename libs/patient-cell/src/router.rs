use std::sync::Arc;

use axum::{routing::get, Router};

use shared_database::AppState;

use crate::handlers;

pub fn patient_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/profile", get(handlers::get_profile).put(handlers::update_profile))
        .route("/stats", get(handlers::get_stats))
        .with_state(state)
}
