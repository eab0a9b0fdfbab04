use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;
use shared_models::schedule::{RangeRequest, SlotToggleRequest, Weekday};

use crate::models::{CreateDoctorRequest, UpdateDoctorRequest};
use crate::services::DoctorService;

// ==============================================================================
// DOCTOR ROSTER HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctors = doctor_service.list_doctors().await;

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service.create_doctor(request).await?;

    Ok(Json(json!({
        "doctor": doctor,
        "message": "Doctor Added Successfully!"
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service.get_doctor(doctor_id).await?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<i64>,
    Json(request): Json<UpdateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service.update_doctor(doctor_id, request).await?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let outcome = doctor_service.delete_doctor(doctor_id).await?;

    Ok(Json(json!(outcome)))
}

// ==============================================================================
// WEEKLY SCHEDULE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_day_schedule(
    State(state): State<Arc<AppState>>,
    Path((doctor_id, day)): Path<(i64, String)>,
) -> Result<Json<Value>, AppError> {
    let day: Weekday = day.parse()?;
    let doctor_service = DoctorService::new(&state);

    let view = doctor_service.day_schedule(doctor_id, day).await?;

    Ok(Json(json!(view)))
}

#[axum::debug_handler]
pub async fn toggle_day(
    State(state): State<Arc<AppState>>,
    Path((doctor_id, day)): Path<(i64, String)>,
) -> Result<Json<Value>, AppError> {
    let day: Weekday = day.parse()?;
    let doctor_service = DoctorService::new(&state);

    let view = doctor_service.toggle_day(doctor_id, day).await?;

    Ok(Json(json!(view)))
}

#[axum::debug_handler]
pub async fn set_day_range(
    State(state): State<Arc<AppState>>,
    Path((doctor_id, day)): Path<(i64, String)>,
    Json(range): Json<RangeRequest>,
) -> Result<Json<Value>, AppError> {
    let day: Weekday = day.parse()?;
    let doctor_service = DoctorService::new(&state);

    let view = doctor_service.set_day_range(doctor_id, day, &range).await?;

    Ok(Json(json!(view)))
}

#[axum::debug_handler]
pub async fn toggle_slot(
    State(state): State<Arc<AppState>>,
    Path((doctor_id, day)): Path<(i64, String)>,
    Json(request): Json<SlotToggleRequest>,
) -> Result<Json<Value>, AppError> {
    let day: Weekday = day.parse()?;
    let doctor_service = DoctorService::new(&state);

    let view = doctor_service.toggle_slot(doctor_id, day, &request.slot).await?;

    Ok(Json(json!(view)))
}
