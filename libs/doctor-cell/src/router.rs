use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

use shared_database::AppState;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Roster
        .route("/", get(handlers::list_doctors).post(handlers::create_doctor))
        .route(
            "/{doctor_id}",
            get(handlers::get_doctor)
                .patch(handlers::update_doctor)
                .delete(handlers::delete_doctor),
        )

        // Weekly schedule editing
        .route("/{doctor_id}/schedule/{day}", get(handlers::get_day_schedule))
        .route("/{doctor_id}/schedule/{day}/toggle", post(handlers::toggle_day))
        .route("/{doctor_id}/schedule/{day}/range", put(handlers::set_day_range))
        .route("/{doctor_id}/schedule/{day}/slots", post(handlers::toggle_slot))

        .with_state(state)
}
