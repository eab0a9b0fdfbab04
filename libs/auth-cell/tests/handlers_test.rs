use axum::{
    body::Body,
    extract::State,
    http::{header, Method, Request, StatusCode},
    Json,
};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_cell::handlers::{get_session, hospital_login, logout, user_login, user_register};
use auth_cell::router::auth_routes;
use shared_database::keys;
use shared_models::auth::Credentials;
use shared_models::error::AppError;
use shared_utils::test_utils::{response_json, test_state, TestConfig};

fn credentials(name: &str, password: &str) -> Credentials {
    Credentials {
        name: name.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_hospital_login_stores_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hospital/login"))
        .and(body_json(json!({ "name": "Apollo Hospitals", "password": "secret1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "hospital_id": 7,
            "name": "Apollo Hospitals Bandra"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let state = TestConfig::with_api(&server.uri()).to_state();

    let Json(body) = hospital_login(
        State(state.clone()),
        Json(credentials("  Apollo Hospitals ", "secret1 ")),
    )
    .await
    .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["session"]["hospital_id"], "7");
    assert_eq!(
        state.store.get_item(keys::HOSPITAL_NAME).await.as_deref(),
        Some("Apollo Hospitals Bandra")
    );
}

#[tokio::test]
async fn test_hospital_name_falls_back_to_submitted_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hospital/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "hospital_id": 3
        })))
        .mount(&server)
        .await;
    let state = TestConfig::with_api(&server.uri()).to_state();

    hospital_login(State(state.clone()), Json(credentials("Kamlayan Bajaj", "password")))
        .await
        .unwrap();

    assert_eq!(
        state.store.get_item(keys::HOSPITAL_NAME).await.as_deref(),
        Some("Kamlayan Bajaj")
    );
}

#[tokio::test]
async fn test_short_password_never_reaches_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hospital/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let state = TestConfig::with_api(&server.uri()).to_state();

    let result = hospital_login(State(state.clone()), Json(credentials("Apollo", "12345"))).await;

    match result {
        Err(AppError::ValidationError(msg)) => {
            assert_eq!(msg, "Password must be at least 6 characters")
        }
        other => panic!("expected validation error, got {:?}", other.map(|j| j.0)),
    }
    assert!(state.store.get_item(keys::HOSPITAL_ID).await.is_none());
}

#[tokio::test]
async fn test_rejected_login_shows_static_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hospital/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid credentials" })))
        .mount(&server)
        .await;
    let state = TestConfig::with_api(&server.uri()).to_state();

    let result = hospital_login(State(state.clone()), Json(credentials("Apollo", "wrongpass"))).await;

    match result {
        Err(AppError::Auth(msg)) => {
            assert_eq!(msg, "Invalid hospital credentials. Please check name and password.")
        }
        other => panic!("expected auth error, got {:?}", other.map(|j| j.0)),
    }
    assert!(state.store.get_item(keys::HOSPITAL_ID).await.is_none());
}

#[tokio::test]
async fn test_unreachable_api_is_a_failed_login() {
    let state = test_state();

    let result = hospital_login(State(state), Json(credentials("Apollo", "secret1"))).await;

    assert!(matches!(result, Err(AppError::Auth(_))));
}

#[tokio::test]
async fn test_user_register_then_logout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "User registered",
            "user_id": 42
        })))
        .mount(&server)
        .await;
    let state = TestConfig::with_api(&server.uri()).to_state();

    user_register(State(state.clone()), Json(credentials("priya", "pass")))
        .await
        .unwrap();

    let Json(body) = get_session(State(state.clone())).await.unwrap();
    assert_eq!(body["user"], true);
    assert_eq!(body["hospital"], false);
    assert_eq!(body["session"]["username"], "priya");
    assert_eq!(state.store.get_item("userid").await.as_deref(), Some("42"));

    logout(State(state.clone())).await.unwrap();

    let Json(body) = get_session(State(state)).await.unwrap();
    assert_eq!(body["user"], false);
}

#[tokio::test]
async fn test_user_login_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let state = TestConfig::with_api(&server.uri()).to_state();

    let result = user_login(State(state), Json(credentials("priya", "nope"))).await;

    match result {
        Err(AppError::Auth(msg)) => assert_eq!(msg, "Invalid username or password."),
        other => panic!("expected auth error, got {:?}", other.map(|j| j.0)),
    }
}

#[tokio::test]
async fn test_router_validates_hospital_login() {
    let app = auth_routes(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/hospital/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "name": "", "password": "secret1" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Hospital name is required");
}
