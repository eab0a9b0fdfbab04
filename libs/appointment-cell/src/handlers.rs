use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{BookSlotRequest, CalendarKind, CatalogueQuery, SlotsQuery, WeekQuery};
use crate::services::receipt::{confirmation_for, receipt_file_name, receipt_text};
use crate::services::{CalendarService, CatalogueService};

// ==============================================================================
// CATALOGUES
// ==============================================================================

#[axum::debug_handler]
pub async fn list_specialists(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CatalogueQuery>,
) -> Result<Json<Value>, AppError> {
    let specialists = CatalogueService::new(&state).specialists(&query).await?;

    Ok(Json(json!({
        "specialists": specialists,
        "total": specialists.len()
    })))
}

#[axum::debug_handler]
pub async fn list_lab_tests(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CatalogueQuery>,
) -> Result<Json<Value>, AppError> {
    let labs = CatalogueService::new(&state).lab_offerings(&query).await?;

    Ok(Json(json!({
        "labs": labs,
        "total": labs.len()
    })))
}

// ==============================================================================
// CALENDAR
// ==============================================================================

#[axum::debug_handler]
pub async fn get_week(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<Value>, AppError> {
    let week = CalendarService::new(&state).week(&query)?;
    Ok(Json(json!(week)))
}

#[axum::debug_handler]
pub async fn get_day_slots(
    State(state): State<Arc<AppState>>,
    Path((kind, resource_id)): Path<(CalendarKind, i64)>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Value>, AppError> {
    let slots = CalendarService::new(&state)
        .slots(kind, resource_id, query.date)
        .await;

    Ok(Json(json!(slots)))
}

#[axum::debug_handler]
pub async fn book_slot(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<CalendarKind>,
    Json(request): Json<BookSlotRequest>,
) -> Result<Json<Value>, AppError> {
    let confirmation = CalendarService::new(&state).book(kind, request).await?;

    Ok(Json(json!({
        "success": true,
        "confirmation": confirmation
    })))
}

// ==============================================================================
// BOOKINGS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let bookings = CalendarService::new(&state).bookings().await;

    Ok(Json(json!({
        "bookings": bookings,
        "total": bookings.len()
    })))
}

/// Plain-text receipt served as a download.
#[axum::debug_handler]
pub async fn download_receipt(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let booking = CalendarService::new(&state).booking(booking_id).await?;
    let confirmation = confirmation_for(&booking);

    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", receipt_file_name(&confirmation)),
        ),
    ];

    Ok((headers, receipt_text(&confirmation)))
}
