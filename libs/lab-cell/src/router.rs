use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

use shared_database::AppState;

use crate::handlers;

pub fn lab_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_labs).post(handlers::create_lab))
        .route(
            "/{lab_id}",
            get(handlers::get_lab)
                .patch(handlers::update_lab)
                .delete(handlers::delete_lab),
        )
        .route("/{lab_id}/schedule/{day}", get(handlers::get_day_schedule))
        .route("/{lab_id}/schedule/{day}/toggle", post(handlers::toggle_day))
        .route("/{lab_id}/schedule/{day}/range", put(handlers::set_day_range))
        .route("/{lab_id}/schedule/{day}/slots", post(handlers::toggle_slot))
        .with_state(state)
}
