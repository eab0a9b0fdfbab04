use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_database::AppState;

use crate::handlers;

pub fn waitlist_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_requests).post(handlers::submit_request))
        .route("/counts", get(handlers::get_counts))
        .route("/{request_id}/approve", post(handlers::approve_request))
        .route("/{request_id}/reject", post(handlers::reject_request))
        .route(
            "/history",
            get(handlers::get_history).delete(handlers::clear_history),
        )
        .with_state(state)
}
