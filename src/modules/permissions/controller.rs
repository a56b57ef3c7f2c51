use axum::{
    Json,
    extract::{Path, State},
};
use gestaller_core::{actions, modules};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    CatalogPermissionDto, CheckPermissionDto, CheckPermissionResponse,
    EffectivePermissionsResponse, ReloadResponse, RoleDto,
};
use super::service;

#[utoipa::path(
    get,
    path = "/permisos-efectivos/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Effective permission set", body = EffectivePermissionsResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden"),
        (status = 503, description = "Authorization backend unavailable")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_effective_permissions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<EffectivePermissionsResponse>, AppError> {
    let caller = auth_user.user_id()?;

    // Every authenticated user may fetch their own set (the mirror does so
    // right after login); reading someone else's requires the user
    // administration capability. An unknown target user answers 403, not
    // 404, so this surface leaks no account existence.
    if caller != user_id {
        let allowed =
            service::has_permission(&state, caller, modules::USERS, actions::VIEW, None).await?;
        if !allowed {
            return Err(AppError::Authorization);
        }
    }

    let set = service::effective_permissions(&state, user_id).await?;
    Ok(Json(EffectivePermissionsResponse::from(set)))
}

#[utoipa::path(
    post,
    path = "/permisos/verificar",
    request_body = CheckPermissionDto,
    responses(
        (status = 200, description = "Verdict for the calling user", body = CheckPermissionResponse),
        (status = 401, description = "Not authenticated"),
        (status = 503, description = "Authorization backend unavailable")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn check_permission(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CheckPermissionDto>,
) -> Result<Json<CheckPermissionResponse>, AppError> {
    let caller = auth_user.user_id()?;

    let allowed = service::has_permission(
        &state,
        caller,
        &dto.module,
        &dto.action,
        dto.area.as_deref(),
    )
    .await?;

    Ok(Json(CheckPermissionResponse { allowed }))
}

#[utoipa::path(
    get,
    path = "/roles",
    responses(
        (status = 200, description = "Administered roles", body = [RoleDto]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_roles(State(state): State<AppState>) -> Result<Json<Vec<RoleDto>>, AppError> {
    let roles = service::list_roles(&state.db).await?;
    Ok(Json(roles))
}

#[utoipa::path(
    get,
    path = "/permisos",
    responses(
        (status = 200, description = "Declared capabilities in the running catalog", body = [CatalogPermissionDto]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_permissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalogPermissionDto>>, AppError> {
    let permissions = service::list_permissions(&state)
        .into_iter()
        .map(CatalogPermissionDto::from)
        .collect();
    Ok(Json(permissions))
}

#[utoipa::path(
    post,
    path = "/permisos/recargar",
    responses(
        (status = 200, description = "Catalog rebuilt and swapped in", body = ReloadResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden"),
        (status = 503, description = "Authorization backend unavailable")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn reload_permissions(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, AppError> {
    let permissions_loaded = service::reload_catalog(&state).await?;
    Ok(Json(ReloadResponse {
        message: "Permission catalog reloaded".to_string(),
        permissions_loaded,
    }))
}
