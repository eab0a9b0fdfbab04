use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{
    CatalogueTab, DirectoryQuery, HospitalCatalogueQuery, HospitalProfile, RegisterHospitalRequest,
};
use crate::services::{DirectoryService, HospitalCatalogueService, HospitalProfileService};

// ==============================================================================
// PROFILE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn register_hospital(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterHospitalRequest>,
) -> Result<Json<Value>, AppError> {
    let profile_service = HospitalProfileService::new(&state);

    let profile = profile_service.register(request).await?;

    Ok(Json(json!({
        "success": true,
        "profile": profile,
        "message": "Registration Successful!"
    })))
}

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let profile_service = HospitalProfileService::new(&state);

    let profile = profile_service.profile().await;

    Ok(Json(json!(profile)))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Json(profile): Json<HospitalProfile>,
) -> Result<Json<Value>, AppError> {
    let profile_service = HospitalProfileService::new(&state);

    let profile = profile_service.update_profile(profile).await?;

    Ok(Json(json!({
        "profile": profile,
        "message": "Profile updated successfully!"
    })))
}

// ==============================================================================
// PATIENT-FACING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_directory(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DirectoryQuery>,
) -> Result<Json<Value>, AppError> {
    let directory_service = DirectoryService::new(&state);

    let result = directory_service.directory(&query).await?;

    Ok(Json(json!(result)))
}

#[axum::debug_handler]
pub async fn get_catalogue(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HospitalCatalogueQuery>,
) -> Result<Json<Value>, AppError> {
    let catalogue_service = HospitalCatalogueService::new(&state);

    let body = match query.tab {
        CatalogueTab::Doctors => {
            let doctors = catalogue_service.doctors(&query).await;
            json!({ "tab": query.tab, "doctors": doctors, "total": doctors.len() })
        }
        CatalogueTab::Labs => {
            let labs = catalogue_service.labs(&query).await;
            json!({ "tab": query.tab, "labs": labs, "total": labs.len() })
        }
    };

    Ok(Json(body))
}
