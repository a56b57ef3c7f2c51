use anyhow::anyhow;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use gestaller::utils::errors::AppError;
use http_body_util::BodyExt;

async fn response_parts(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_authentication_maps_to_401_with_fixed_body() {
    let (status, body) = response_parts(AppError::Authentication).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authenticated or invalid token.");
}

#[tokio::test]
async fn test_authorization_maps_to_403_with_generic_body() {
    let (status, body) = response_parts(AppError::Authorization).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "You do not have permission to perform this action."
    );
}

#[tokio::test]
async fn test_validation_maps_to_422() {
    let (status, body) =
        response_parts(AppError::validation("Areas can only be assigned to operator users")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["message"],
        "Areas can only be assigned to operator users"
    );
}

#[tokio::test]
async fn test_not_found_maps_to_404() {
    let (status, _) = response_parts(AppError::not_found("User not found")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_infrastructure_is_distinct_from_denial() {
    let (status, body) =
        response_parts(AppError::infrastructure(anyhow!("connection refused"))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_ne!(status, StatusCode::FORBIDDEN);
    // The outage body never leaks backend details.
    assert_eq!(body["message"], "Service temporarily unavailable.");
}

#[tokio::test]
async fn test_internal_maps_to_500_with_generic_body() {
    let (status, body) = response_parts(AppError::internal(anyhow!("boom"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error.");
}

#[test]
fn test_sqlx_errors_fold_into_infrastructure() {
    let err = AppError::from(sqlx::Error::PoolTimedOut);
    assert!(matches!(err, AppError::Infrastructure(_)));
    assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
}
