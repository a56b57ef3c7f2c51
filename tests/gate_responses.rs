//! Router-level tests of the authorization gate's response mapping.
//!
//! These run without a database: the state carries a lazy pool pointing at
//! an address nothing listens on, so any handler that reaches the store
//! hits a connection failure. That is exactly the outage case the gate
//! must surface as 503, distinguishable from a 403 denial.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{setup_test_app, test_jwt_config};
use gestaller::utils::jwt::create_access_token;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_missing_token_is_401_with_fixed_body() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/usuarios")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Not authenticated or invalid token.");
}

#[tokio::test]
async fn test_invalid_token_is_401() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/usuarios")
                .header("Authorization", "Bearer not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_bearer_authorization_header_is_401() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/usuarios")
                .header("Authorization", "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_store_outage_is_503_not_403() {
    let app = setup_test_app();
    let token = create_access_token(Uuid::new_v4(), &test_jwt_config()).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/usuarios")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // An unreachable store must never read as "no permission".
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Service temporarily unavailable.");
}

#[tokio::test]
async fn test_probe_maps_outage_to_503() {
    let app = setup_test_app();
    let token = create_access_token(Uuid::new_v4(), &test_jwt_config()).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/permisos/verificar")
                .header("Authorization", format!("Bearer {token}"))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "modulo": "Projects",
                        "accion": "CompleteArea",
                        "area": "Cutting"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_effective_permissions_for_self_maps_outage_to_503() {
    let app = setup_test_app();
    let user_id = Uuid::new_v4();
    let token = create_access_token(user_id, &test_jwt_config()).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/permisos-efectivos/{user_id}"))
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_probe_rejects_empty_capability_components() {
    let app = setup_test_app();
    let token = create_access_token(Uuid::new_v4(), &test_jwt_config()).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/permisos/verificar")
                .header("Authorization", format!("Bearer {token}"))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({"modulo": "", "accion": "View"})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    // Validation fires before any store access.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
