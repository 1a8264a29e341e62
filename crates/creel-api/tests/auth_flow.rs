//! End-to-end account and token lifecycle tests

mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{body_json, json_request, login, register, test_app};

#[tokio::test]
async fn test_register_login_end_to_end() {
    let app = test_app().await;

    // Fresh registration succeeds
    let response = register(&app, "alice", "hunter2!").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Same username again conflicts
    let response = register(&app, "alice", "hunter2!").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Wrong password is unauthorized
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({"username": "alice", "password": "wrong-password"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Unknown username is indistinguishable from a wrong password
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({"username": "nobody", "password": "wrong-password"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Correct credentials yield both tokens
    let (access_token, refresh_token) = login(&app, "alice", "hunter2!").await;
    assert!(!access_token.is_empty());
    assert!(!refresh_token.is_empty());
    assert_ne!(access_token, refresh_token);
}

#[tokio::test]
async fn test_register_validation() {
    let app = test_app().await;

    // Username must start with a letter
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({
                "username": "1alice",
                "password": "hunter2!",
                "firstName": "Alice",
                "lastName": "Anglersson",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Password too short
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({
                "username": "alice",
                "password": "short",
                "firstName": "Alice",
                "lastName": "Anglersson",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_lifecycle() {
    let app = test_app().await;

    register(&app, "alice", "hunter2!").await;
    let (_, refresh_token) = login(&app, "alice", "hunter2!").await;

    // Refresh mints a fresh access token and echoes the refresh token
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/refresh",
            Some(&refresh_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["access_token"].as_str().is_some());
    assert_eq!(body["refresh_token"].as_str().unwrap(), refresh_token);

    // The minted access token carries alice's identity
    let access_token = body["access_token"].as_str().unwrap().to_string();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/reports",
            Some(&access_token),
            Some(common::sample_report_body()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Logout revokes the backing record
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/logout",
            Some(&refresh_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The refresh token is now permanently disabled
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/refresh",
            Some(&refresh_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Logging out twice observes the same end state
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/logout",
            Some(&refresh_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_mandatory_auth_failures() {
    let app = test_app().await;

    // No Authorization header at all
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/v1/reports/some-id", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"].as_str().unwrap(),
        "Missing authorization header"
    );

    // Wrong scheme
    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("GET")
                .uri("/api/v1/reports/some-id")
                .header("authorization", "Basic abc")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"].as_str().unwrap(),
        "Invalid authentication scheme"
    );

    // Garbage token
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/v1/reports/some-id",
            Some("not-a-token"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_index_links() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/v1/auth", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let links = body["_links"].as_object().unwrap();
    assert!(links.contains_key("login"));
    assert!(links.contains_key("register"));
    assert!(links.contains_key("refresh"));
}
