// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_database::AppState;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Patient catalogues
        .route("/specialists", get(handlers::list_specialists))
        .route("/labs", get(handlers::list_lab_tests))

        // Booking calendars
        .route("/calendar/week", get(handlers::get_week))
        .route("/calendar/{kind}/{resource_id}/slots", get(handlers::get_day_slots))
        .route("/calendar/{kind}/book", post(handlers::book_slot))

        // Confirmed bookings
        .route("/bookings", get(handlers::list_bookings))
        .route("/bookings/{booking_id}/receipt", get(handlers::download_receipt))

        .with_state(state)
}
