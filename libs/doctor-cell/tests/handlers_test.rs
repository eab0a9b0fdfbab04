// libs/doctor-cell/tests/handlers_test.rs

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    Json,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use doctor_cell::handlers::*;
use doctor_cell::models::*;
use doctor_cell::router::doctor_routes;
use shared_database::{keys, LocalStore};
use shared_models::error::AppError;
use shared_models::schedule::{RangeRequest, SlotToggleRequest};
use shared_utils::test_utils::{response_json, seed, test_state, TestConfig};

fn add_request(name: &str) -> CreateDoctorRequest {
    CreateDoctorRequest {
        name: name.to_string(),
        specialization: None,
        qualification: "MBBS, MS".to_string(),
        experience: 8,
        designation: Some("Senior Consultant".to_string()),
        fee: 1200,
        bio: Some("Knee and hip replacements".to_string()),
    }
}

#[tokio::test]
async fn test_list_shows_demo_roster_when_nothing_saved() {
    let state = test_state();

    let Json(body) = list_doctors(State(state.clone())).await.unwrap();

    assert_eq!(body["total"], 1);
    assert_eq!(body["doctors"][0]["name"], "Dr. Rahul Mehta");
    assert!(state.store.get_item(keys::HOSPITAL_DOCTORS).await.is_none());
}

#[tokio::test]
async fn test_create_doctor_appends_exactly_one_entry() {
    let state = test_state();

    let Json(first) = create_doctor(State(state.clone()), Json(add_request("Dr. Anjali Rao")))
        .await
        .unwrap();
    let Json(second) = create_doctor(State(state.clone()), Json(add_request("Dr. Vikram Shah")))
        .await
        .unwrap();

    assert_eq!(first["message"], "Doctor Added Successfully!");
    assert_eq!(first["doctor"]["specialty"], "Cardiology");
    assert_ne!(first["doctor"]["id"], second["doctor"]["id"]);

    let stored: Vec<Doctor> = state.store.load(keys::HOSPITAL_DOCTORS).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].name, "Dr. Anjali Rao");
    assert_eq!(stored[1].name, "Dr. Vikram Shah");
    assert_eq!(stored[1].schedule.sun.slots.len(), 0);
}

#[tokio::test]
async fn test_first_add_does_not_persist_demo_roster() {
    let state = test_state();
    assert!(state.store.get_item(keys::HOSPITAL_DOCTORS).await.is_none());

    create_doctor(State(state.clone()), Json(add_request("Dr. Meera Nair")))
        .await
        .unwrap();

    let stored: Vec<Doctor> = state.store.load(keys::HOSPITAL_DOCTORS).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Dr. Meera Nair");
    assert!(stored.iter().all(|d| d.name != "Dr. Rahul Mehta"));
}

#[tokio::test]
async fn test_create_doctor_requires_name() {
    let state = test_state();

    let result = create_doctor(State(state.clone()), Json(add_request("   "))).await;

    match result {
        Err(AppError::ValidationError(msg)) => assert_eq!(msg, "Doctor name is required"),
        other => panic!("expected validation error, got {:?}", other.map(|j| j.0)),
    }
    assert!(state.store.get_item(keys::HOSPITAL_DOCTORS).await.is_none());
}

#[tokio::test]
async fn test_get_unknown_doctor_is_not_found() {
    let state = test_state();

    let result = get_doctor(State(state), Path(42)).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_update_doctor_details() {
    let state = test_state();

    let request = UpdateDoctorRequest {
        fee: Some(1800),
        available: Some(false),
        ..Default::default()
    };
    let Json(body) = update_doctor(State(state.clone()), Path(1), Json(request))
        .await
        .unwrap();

    assert_eq!(body["fee"], 1800);
    assert_eq!(body["available"], false);
    assert_eq!(body["name"], "Dr. Rahul Mehta");
}

#[tokio::test]
async fn test_delete_selects_first_remaining() {
    let state = test_state();
    let mut roster = seed_doctors();
    let mut second = roster[0].clone();
    second.id = 2;
    second.name = "Dr. Neha Kapoor".to_string();
    roster.push(second);
    seed(&state, keys::HOSPITAL_DOCTORS, &roster).await;

    let Json(body) = delete_doctor(State(state.clone()), Path(1)).await.unwrap();

    assert_eq!(body["deleted_id"], 1);
    assert_eq!(body["next_selected_id"], 2);
    assert_eq!(body["remaining"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_toggle_day_off_and_on() {
    let state = test_state();

    let Json(off) = toggle_day(State(state.clone()), Path((1, "Mon".to_string())))
        .await
        .unwrap();
    assert_eq!(off["active"], false);
    assert_eq!(off["slots"], json!([]));

    let Json(on) = toggle_day(State(state.clone()), Path((1, "Mon".to_string())))
        .await
        .unwrap();
    assert_eq!(on["active"], true);
    assert_eq!(on["slots"].as_array().unwrap().len(), 8);
    assert_eq!(on["slots"][0], "09:00");
}

#[tokio::test]
async fn test_wednesday_toggle_regenerates_from_stored_range() {
    let state = test_state();

    let Json(body) = toggle_day(State(state), Path((1, "wed".to_string())))
        .await
        .unwrap();

    assert_eq!(body["day"], "Wed");
    assert_eq!(body["slots"][7], "16:00");
}

#[tokio::test]
async fn test_set_range_and_toggle_slot() {
    let state = test_state();

    let range = RangeRequest {
        start: Some("11:00".to_string()),
        end: Some("14:00".to_string()),
    };
    let Json(body) = set_day_range(State(state.clone()), Path((1, "Thu".to_string())), Json(range))
        .await
        .unwrap();
    assert_eq!(body["slots"], json!(["11:00", "12:00", "13:00"]));

    let slot = SlotToggleRequest { slot: "12:00".to_string() };
    let Json(body) = toggle_slot(State(state.clone()), Path((1, "Thu".to_string())), Json(slot))
        .await
        .unwrap();
    assert_eq!(body["slots"], json!(["11:00", "13:00"]));

    let open: Vec<&Value> = body["grid"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|cell| cell["open"] == true)
        .collect();
    assert_eq!(open.len(), 2);
}

#[tokio::test]
async fn test_toggle_slot_on_day_off_is_rejected() {
    let state = test_state();

    let slot = SlotToggleRequest { slot: "10:00".to_string() };
    let result = toggle_slot(State(state), Path((1, "Sun".to_string())), Json(slot)).await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn test_invalid_weekday_is_rejected() {
    let state = test_state();

    let result = get_day_schedule(State(state), Path((1, "Someday".to_string()))).await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn test_reload_reproduces_persisted_value_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(LocalStore::open(dir.path()).await.unwrap());
    let state = TestConfig::default().to_state_with_store(store.clone());

    let Json(created) = create_doctor(State(state.clone()), Json(add_request("Dr. Farah Khan")))
        .await
        .unwrap();
    let doctor_id = created["doctor"]["id"].as_i64().unwrap();
    toggle_day(State(state.clone()), Path((doctor_id, "Fri".to_string())))
        .await
        .unwrap();
    let written = store.get_item(keys::HOSPITAL_DOCTORS).await.unwrap();

    let reopened = Arc::new(LocalStore::open(dir.path()).await.unwrap());
    let reloaded_state = TestConfig::default().to_state_with_store(reopened.clone());
    let Json(body) = list_doctors(State(reloaded_state)).await.unwrap();

    assert_eq!(reopened.get_item(keys::HOSPITAL_DOCTORS).await.unwrap(), written);
    assert_eq!(body["total"], 1);
    assert_eq!(body["doctors"][0]["name"], "Dr. Farah Khan");
    assert_eq!(body["doctors"][0]["schedule"]["Fri"]["active"], false);
}

#[tokio::test]
async fn test_router_schedule_routes() {
    let app = doctor_routes(test_state());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/1/schedule/Sat/toggle")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/1/schedule/Sat")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["active"], false);
}

#[tokio::test]
async fn test_router_unknown_doctor_returns_error_body() {
    let app = doctor_routes(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Doctor 999 not found");
}
