use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::UserProfile;
use crate::services::UserProfileService;

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let profile_service = UserProfileService::new(&state);

    let profile = profile_service.profile().await;

    Ok(Json(json!(profile)))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<Value>, AppError> {
    let profile_service = UserProfileService::new(&state);

    let profile = profile_service.update_profile(profile).await?;

    Ok(Json(json!({
        "profile": profile,
        "message": "Profile saved successfully!"
    })))
}

#[axum::debug_handler]
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let profile_service = UserProfileService::new(&state);

    let stats = profile_service.stats().await;

    Ok(Json(json!(stats)))
}
