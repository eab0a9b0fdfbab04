use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::debug;

use shared_database::AppState;
use shared_models::auth::Credentials;
use shared_models::error::AppError;

use crate::services::SessionService;

pub async fn hospital_login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Value>, AppError> {
    let session_service = SessionService::new(&state);

    let session = session_service.hospital_login(&credentials).await?;

    Ok(Json(json!({
        "success": true,
        "session": session,
        "message": "Login successful! Redirecting to dashboard..."
    })))
}

pub async fn user_login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Value>, AppError> {
    let session_service = SessionService::new(&state);

    let session = session_service.user_login(&credentials).await?;

    Ok(Json(json!({
        "success": true,
        "session": session,
        "message": "Login successful"
    })))
}

pub async fn user_register(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Value>, AppError> {
    let session_service = SessionService::new(&state);

    let session = session_service.user_register(&credentials).await?;

    Ok(Json(json!({
        "success": true,
        "session": session,
        "message": "User registered"
    })))
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    debug!("Reading session");
    let session = SessionService::new(&state).session().await;

    Ok(Json(json!({
        "session": session,
        "hospital": session.is_hospital(),
        "user": session.is_user()
    })))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    SessionService::new(&state).logout().await?;

    Ok(Json(json!({ "success": true })))
}
