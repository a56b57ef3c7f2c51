use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{AreaAssignmentResponse, AreaDto, AssignAreaDto, CreateAreaDto};
use super::service;

#[utoipa::path(
    get,
    path = "/areas",
    responses(
        (status = 200, description = "All areas, name ordered", body = [AreaDto]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Areas",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_areas(State(state): State<AppState>) -> Result<Json<Vec<AreaDto>>, AppError> {
    let areas = service::list_areas(&state.db).await?;
    Ok(Json(areas.into_iter().map(AreaDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/areas",
    request_body = CreateAreaDto,
    responses(
        (status = 201, description = "Area created", body = AreaDto),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Duplicate or invalid name")
    ),
    tag = "Areas",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_area(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAreaDto>,
) -> Result<(StatusCode, Json<AreaDto>), AppError> {
    let area = service::create_area(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(AreaDto::from(area))))
}

#[utoipa::path(
    get,
    path = "/usuarios/{user_id}/areas",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Areas assigned to the user", body = [AreaDto]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Areas",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_user_areas(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<AreaDto>>, AppError> {
    let areas = service::list_user_areas(&state.db, user_id).await?;
    Ok(Json(areas.into_iter().map(AreaDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/usuarios/{user_id}/areas",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    request_body = AssignAreaDto,
    responses(
        (status = 200, description = "Area assigned (idempotent)", body = AreaAssignmentResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Unknown user or area"),
        (status = 422, description = "User is not an operator")
    ),
    tag = "Areas",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn assign_area(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AssignAreaDto>,
) -> Result<Json<AreaAssignmentResponse>, AppError> {
    service::assign_area(&state.db, user_id, dto.area_id).await?;
    Ok(Json(AreaAssignmentResponse {
        message: "Area assigned".to_string(),
        user_id,
        area_id: dto.area_id,
    }))
}

#[utoipa::path(
    delete,
    path = "/usuarios/{user_id}/areas/{area_id}",
    params(
        ("user_id" = Uuid, Path, description = "User ID"),
        ("area_id" = Uuid, Path, description = "Area ID")
    ),
    responses(
        (status = 204, description = "Assignment removed (or was absent)"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Areas",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn remove_area(
    State(state): State<AppState>,
    Path((user_id, area_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    service::remove_area(&state.db, user_id, area_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
