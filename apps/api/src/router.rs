use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::appointment_routes;
use auth_cell::router::auth_routes;
use doctor_cell::router::doctor_routes;
use hospital_cell::router::hospital_routes;
use lab_cell::router::lab_routes;
use patient_cell::router::patient_routes;
use shared_database::AppState;
use waitlist_cell::router::waitlist_routes;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "HospiGo API is running!" }))
        .nest("/auth", auth_routes(state.clone()))
        .nest("/hospitals", hospital_routes(state.clone()))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/labs", lab_routes(state.clone()))
        .nest("/waitlist", waitlist_routes(state.clone()))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/patients", patient_routes(state))
}
