use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationParams;
use crate::validator::ValidatedJson;

use super::model::{
    CreateUserDto, PaginatedUsersResponse, UpdateRoleDto, UpdateStatusDto, UserDto,
};
use super::service;

#[utoipa::path(
    get,
    path = "/usuarios",
    params(PaginationParams),
    responses(
        (status = 200, description = "Users with their roles", body = PaginatedUsersResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedUsersResponse>, AppError> {
    let users = service::list_users(&state.db, params).await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/usuarios/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserDto),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserDto>, AppError> {
    let user = service::get_user(&state.db, user_id).await?;
    Ok(Json(UserDto::from(user)))
}

#[utoipa::path(
    post,
    path = "/usuarios",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Duplicate email or unknown role")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<UserDto>), AppError> {
    let user = service::create_user(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

#[utoipa::path(
    patch,
    path = "/usuarios/{user_id}/estado",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Status updated", body = UserDto),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Invalid status value")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStatusDto>,
) -> Result<Json<UserDto>, AppError> {
    let user = service::update_status(&state.db, user_id, &dto.status).await?;
    Ok(Json(UserDto::from(user)))
}

#[utoipa::path(
    patch,
    path = "/usuarios/{user_id}/rol",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated", body = UserDto),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Unknown role")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_role(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateRoleDto>,
) -> Result<Json<UserDto>, AppError> {
    let user = service::update_role(&state.db, user_id, dto.role_id).await?;
    Ok(Json(UserDto::from(user)))
}
