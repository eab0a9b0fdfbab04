// libs/patient-cell/tests/handlers_test.rs

use axum::{
    body::Body,
    extract::State,
    http::{header, Method, Request, StatusCode},
    Json,
};
use chrono::{Duration, Local, Utc};
use serde_json::json;
use tower::ServiceExt;

use appointment_cell::{Booking, CalendarKind};
use patient_cell::handlers::*;
use patient_cell::models::UserProfile;
use patient_cell::router::patient_routes;
use shared_database::keys;
use shared_models::error::AppError;
use shared_utils::test_utils::{response_json, seed, test_state};

#[tokio::test]
async fn test_profile_defaults_to_session_username() {
    let state = test_state();
    state
        .store
        .set_item(keys::USERNAME, "priya".to_string())
        .await
        .unwrap();

    let Json(body) = get_profile(State(state)).await.unwrap();

    assert_eq!(body["name"], "priya");
    assert_eq!(body["city"], "Mumbai");
    assert_eq!(body["preferredHospital"], "Apollo Hospital");
}

#[tokio::test]
async fn test_saved_profile_wins_over_defaults() {
    let state = test_state();
    let profile = UserProfile {
        name: "Priya Nair".to_string(),
        blood_group: "O+".to_string(),
        age: Some(31),
        ..UserProfile::for_user(None)
    };

    update_profile(State(state.clone()), Json(profile)).await.unwrap();
    let Json(body) = get_profile(State(state)).await.unwrap();

    assert_eq!(body["name"], "Priya Nair");
    assert_eq!(body["bloodGroup"], "O+");
    assert_eq!(body["age"], 31);
}

#[tokio::test]
async fn test_update_profile_requires_name() {
    let state = test_state();

    let result = update_profile(State(state.clone()), Json(UserProfile::default())).await;

    match result {
        Err(AppError::ValidationError(msg)) => assert_eq!(msg, "Name is required"),
        other => panic!("expected validation error, got {:?}", other.map(|j| j.0)),
    }
    assert!(state.store.get_item(keys::HOSPI_USER_PROFILE).await.is_none());
}

#[tokio::test]
async fn test_stats_from_saved_bookings() {
    let state = test_state();
    let today = Local::now().date_naive();
    let booking = |id, kind, date| Booking {
        id,
        kind,
        resource_id: 1,
        name: "CBC".to_string(),
        hospital: "Apollo Hospital".to_string(),
        date,
        time: "09:00".to_string(),
        specialty: None,
        price: None,
        created_at: Utc::now(),
    };
    seed(
        &state,
        keys::USER_BOOKINGS,
        &vec![
            booking(1, CalendarKind::Doctor, today - Duration::days(30)),
            booking(2, CalendarKind::Lab, today + Duration::days(3)),
            booking(3, CalendarKind::Lab, today + Duration::days(9)),
        ],
    )
    .await;

    let Json(body) = get_stats(State(state)).await.unwrap();

    assert_eq!(body, json!({ "doctorAppointments": 1, "labBookings": 2, "upcoming": 2 }));
}

#[tokio::test]
async fn test_router_put_profile() {
    let state = test_state();
    let app = patient_routes(state.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::PUT)
                .uri("/profile")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "name": "Rohan", "city": "Pune" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["profile"]["city"], "Pune");

    let stored: UserProfile = state.store.load(keys::HOSPI_USER_PROFILE).await.unwrap();
    assert_eq!(stored.name, "Rohan");
}
