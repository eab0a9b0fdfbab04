// libs/lab-cell/tests/handlers_test.rs

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    Json,
};
use serde_json::json;
use tower::ServiceExt;

use lab_cell::handlers::*;
use lab_cell::models::*;
use lab_cell::router::lab_routes;
use shared_database::keys;
use shared_models::error::AppError;
use shared_models::schedule::RangeRequest;
use shared_utils::test_utils::{response_json, test_state};

fn add_request(name: &str) -> CreateLabRequest {
    CreateLabRequest {
        name: name.to_string(),
        category: Some("Imaging".to_string()),
        price: 2500,
        tat: "24 Hrs".to_string(),
        home: false,
        instructions: Some("Remove metal objects".to_string()),
    }
}

#[tokio::test]
async fn test_list_shows_cbc_when_nothing_saved() {
    let Json(body) = list_labs(State(test_state())).await.unwrap();

    assert_eq!(body["total"], 1);
    assert_eq!(body["labs"][0]["tat"], "6 Hrs");
    assert_eq!(body["labs"][0]["home"], true);
}

#[tokio::test]
async fn test_create_lab_appends_one_entry() {
    let state = test_state();

    let Json(body) = create_lab(State(state.clone()), Json(add_request("Chest X-Ray")))
        .await
        .unwrap();

    assert_eq!(body["message"], "Lab Service Added Successfully!");
    assert_eq!(body["lab"]["category"], "Imaging");

    let stored: Vec<LabTest> = state.store.load(keys::HOSPITAL_LABS).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Chest X-Ray");
    assert_eq!(stored[0].schedule.sun.start, "08:00");
}

#[tokio::test]
async fn test_create_lab_requires_turnaround() {
    let state = test_state();
    let mut request = add_request("MRI Brain");
    request.tat = String::new();

    let result = create_lab(State(state), Json(request)).await;

    match result {
        Err(AppError::ValidationError(msg)) => assert_eq!(msg, "Turnaround time is required"),
        other => panic!("expected validation error, got {:?}", other.map(|j| j.0)),
    }
}

#[tokio::test]
async fn test_update_lab_clears_instructions() {
    let state = test_state();
    let Json(created) = create_lab(State(state.clone()), Json(add_request("CT Abdomen")))
        .await
        .unwrap();
    let lab_id = created["lab"]["id"].as_i64().unwrap();

    let request = UpdateLabRequest {
        price: Some(3000),
        instructions: Some(String::new()),
        ..Default::default()
    };
    let Json(body) = update_lab(State(state), Path(lab_id), Json(request)).await.unwrap();

    assert_eq!(body["price"], 3000);
    assert!(body.get("instructions").is_none());
}

#[tokio::test]
async fn test_toggle_sunday_off_clears_slots() {
    let state = test_state();

    let Json(body) = toggle_day(State(state.clone()), Path((1, "Sun".to_string())))
        .await
        .unwrap();

    assert_eq!(body["active"], false);
    assert_eq!(body["slots"], json!([]));
    assert_eq!(body["start"], "08:00");
}

#[tokio::test]
async fn test_inverted_range_is_rejected() {
    let state = test_state();

    let range = RangeRequest {
        start: Some("20:00".to_string()),
        end: Some("09:00".to_string()),
    };
    let result = set_day_range(State(state), Path((1, "Mon".to_string())), Json(range)).await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn test_router_delete_then_list() {
    let state = test_state();
    let app = lab_routes(state);

    let response = app
        .clone()
        .oneshot(Request::builder().method("DELETE").uri("/1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["next_selected_id"], json!(null));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["total"], 0);
}
