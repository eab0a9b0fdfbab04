use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::{json, Value};
use tracing::info;

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{RequestStatus, SubmitWaitlistRequest, WaitlistQuery};
use crate::services::WaitlistService;

/// Queue a booking request for hospital approval
pub async fn submit_request(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SubmitWaitlistRequest>,
) -> Result<Json<Value>, AppError> {
    let service = WaitlistService::new(&state);

    let entry = service.submit(request).await?;

    Ok(Json(json!({
        "success": true,
        "request": entry,
        "message": format!("Booking request sent for {}! Check the Admin Dashboard.", entry.title)
    })))
}

/// Active waitlist, newest first
pub async fn list_requests(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WaitlistQuery>,
) -> Result<Json<Value>, AppError> {
    let service = WaitlistService::new(&state);

    let items = service.list(&query).await;

    Ok(Json(json!({
        "requests": items,
        "total": items.len()
    })))
}

pub async fn get_counts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let counts = WaitlistService::new(&state).counts().await;
    Ok(Json(json!(counts)))
}

pub async fn approve_request(
    State(state): State<Arc<AppState>>,
    Path(request_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let entry = WaitlistService::new(&state)
        .process(request_id, RequestStatus::Approved)
        .await?;

    Ok(Json(json!({
        "success": true,
        "entry": entry
    })))
}

pub async fn reject_request(
    State(state): State<Arc<AppState>>,
    Path(request_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let entry = WaitlistService::new(&state)
        .process(request_id, RequestStatus::Rejected)
        .await?;

    Ok(Json(json!({
        "success": true,
        "entry": entry
    })))
}

pub async fn get_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let history = WaitlistService::new(&state).history().await;

    Ok(Json(json!({
        "history": history,
        "total": history.len()
    })))
}

pub async fn clear_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let cleared = WaitlistService::new(&state).clear_history().await?;
    info!("History clear requested (had entries: {})", cleared);

    Ok(Json(json!({
        "success": true,
        "cleared": cleared
    })))
}
