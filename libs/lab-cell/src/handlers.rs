use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;
use shared_models::schedule::{RangeRequest, SlotToggleRequest, Weekday};

use crate::models::{CreateLabRequest, UpdateLabRequest};
use crate::services::LabService;

#[axum::debug_handler]
pub async fn list_labs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let labs = LabService::new(&state).list_labs().await;

    Ok(Json(json!({
        "labs": labs,
        "total": labs.len()
    })))
}

#[axum::debug_handler]
pub async fn create_lab(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateLabRequest>,
) -> Result<Json<Value>, AppError> {
    let lab = LabService::new(&state).create_lab(request).await?;

    Ok(Json(json!({
        "lab": lab,
        "message": "Lab Service Added Successfully!"
    })))
}

#[axum::debug_handler]
pub async fn get_lab(
    State(state): State<Arc<AppState>>,
    Path(lab_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let lab = LabService::new(&state).get_lab(lab_id).await?;
    Ok(Json(json!(lab)))
}

#[axum::debug_handler]
pub async fn update_lab(
    State(state): State<Arc<AppState>>,
    Path(lab_id): Path<i64>,
    Json(request): Json<UpdateLabRequest>,
) -> Result<Json<Value>, AppError> {
    let lab = LabService::new(&state).update_lab(lab_id, request).await?;
    Ok(Json(json!(lab)))
}

#[axum::debug_handler]
pub async fn delete_lab(
    State(state): State<Arc<AppState>>,
    Path(lab_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let outcome = LabService::new(&state).delete_lab(lab_id).await?;
    Ok(Json(json!(outcome)))
}

#[axum::debug_handler]
pub async fn get_day_schedule(
    State(state): State<Arc<AppState>>,
    Path((lab_id, day)): Path<(i64, String)>,
) -> Result<Json<Value>, AppError> {
    let day: Weekday = day.parse()?;
    let view = LabService::new(&state).day_schedule(lab_id, day).await?;
    Ok(Json(json!(view)))
}

#[axum::debug_handler]
pub async fn toggle_day(
    State(state): State<Arc<AppState>>,
    Path((lab_id, day)): Path<(i64, String)>,
) -> Result<Json<Value>, AppError> {
    let day: Weekday = day.parse()?;
    let view = LabService::new(&state).toggle_day(lab_id, day).await?;
    Ok(Json(json!(view)))
}

#[axum::debug_handler]
pub async fn set_day_range(
    State(state): State<Arc<AppState>>,
    Path((lab_id, day)): Path<(i64, String)>,
    Json(range): Json<RangeRequest>,
) -> Result<Json<Value>, AppError> {
    let day: Weekday = day.parse()?;
    let view = LabService::new(&state).set_day_range(lab_id, day, &range).await?;
    Ok(Json(json!(view)))
}

#[axum::debug_handler]
pub async fn toggle_slot(
    State(state): State<Arc<AppState>>,
    Path((lab_id, day)): Path<(i64, String)>,
    Json(request): Json<SlotToggleRequest>,
) -> Result<Json<Value>, AppError> {
    let day: Weekday = day.parse()?;
    let view = LabService::new(&state)
        .toggle_slot(lab_id, day, &request.slot)
        .await?;
    Ok(Json(json!(view)))
}
