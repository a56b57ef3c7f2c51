//! Catalog loading and the resolving half of the evaluator.
//!
//! The pure verdict lives in `gestaller_core`; this service owns the IO
//! around it. User state and area assignments are read fresh from the
//! store on every check, so a mid-session role change, deactivation, or
//! area reassignment takes effect on the very next request. Only the
//! declared capability catalog is held in memory, and it is replaced
//! whole on reload.

use gestaller_core::{
    CapabilityEntry, PermissionCatalog, RoleClass, Subject, UserStatus,
    effective_permissions as materialize_effective, has_capability,
};
use sqlx::{FromRow, PgPool};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::modules::areas::service::list_area_names;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::RoleDto;

#[derive(Debug, FromRow)]
struct PermissionRow {
    id: Uuid,
    name: String,
    module: String,
    action: String,
    area_scoped: bool,
}

#[derive(Debug, FromRow)]
struct GrantRow {
    role_id: Uuid,
    permission_id: Uuid,
}

#[derive(Debug, FromRow)]
struct SubjectRow {
    id: Uuid,
    status: String,
    role_id: Uuid,
    role_name: String,
    classification: String,
}

/// Build the immutable catalog from the administered grant tables.
#[instrument(skip(db))]
pub async fn load_catalog(db: &PgPool) -> Result<PermissionCatalog, AppError> {
    let permissions: Vec<PermissionRow> =
        sqlx::query_as("SELECT id, name, module, action, area_scoped FROM permissions")
            .fetch_all(db)
            .await?;

    let grants: Vec<GrantRow> =
        sqlx::query_as("SELECT role_id, permission_id FROM role_permissions")
            .fetch_all(db)
            .await?;

    let declared = permissions
        .into_iter()
        .map(|row| CapabilityEntry {
            id: row.id,
            name: row.name,
            module: row.module,
            action: row.action,
            area_scoped: row.area_scoped,
        })
        .collect();
    let grant_rows = grants
        .into_iter()
        .map(|row| (row.role_id, row.permission_id))
        .collect();

    Ok(PermissionCatalog::build(declared, grant_rows))
}

/// Rebuild the catalog and swap it in atomically. In-flight checks keep
/// the snapshot they started with.
#[instrument(skip(state))]
pub async fn reload_catalog(state: &AppState) -> Result<usize, AppError> {
    let catalog = load_catalog(&state.db).await?;
    let loaded = catalog.len();
    state.catalog.replace(catalog);
    info!(permissions = loaded, "permission catalog reloaded");
    Ok(loaded)
}

/// Resolve a user into the snapshot the pure evaluator consumes.
/// `Ok(None)` means the user does not exist; callers on the authorization
/// path fold that into a denial.
pub async fn resolve_subject(db: &PgPool, user_id: Uuid) -> Result<Option<Subject>, AppError> {
    let row: Option<SubjectRow> = sqlx::query_as(
        "SELECT u.id, u.status, u.role_id, r.name AS role_name, r.classification \
         FROM users u JOIN roles r ON r.id = u.role_id WHERE u.id = $1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let areas = if row.classification.trim() == "operator" {
        list_area_names(db, row.id).await?.into_iter().collect()
    } else {
        Default::default()
    };

    Ok(Some(Subject {
        user_id: row.id,
        role_id: row.role_id,
        role_name: row.role_name,
        status: UserStatus::parse(&row.status),
        class: RoleClass::classify(&row.classification, areas),
    }))
}

/// May `user_id` perform (`module`, `action`), optionally in
/// `context_area`? Unknown and inactive users deny alike; store failures
/// surface as `AppError::Infrastructure`, never as a verdict.
#[instrument(skip(state), fields(user_id = %user_id))]
pub async fn has_permission(
    state: &AppState,
    user_id: Uuid,
    module: &str,
    action: &str,
    context_area: Option<&str>,
) -> Result<bool, AppError> {
    let catalog = state.catalog.current();
    match resolve_subject(&state.db, user_id).await? {
        None => Ok(false),
        Some(subject) => Ok(has_capability(
            &subject, &catalog, module, action, context_area,
        )),
    }
}

/// Materialize the effective permission set for a user. Recomputed on
/// every call; an unknown user folds into a denial rather than a 404.
#[instrument(skip(state), fields(user_id = %user_id))]
pub async fn effective_permissions(
    state: &AppState,
    user_id: Uuid,
) -> Result<gestaller_core::EffectivePermissionSet, AppError> {
    let catalog = state.catalog.current();
    match resolve_subject(&state.db, user_id).await? {
        None => Err(AppError::Authorization),
        Some(subject) => Ok(materialize_effective(&subject, &catalog)),
    }
}

#[instrument(skip(db))]
pub async fn list_roles(db: &PgPool) -> Result<Vec<RoleDto>, AppError> {
    let roles: Vec<RoleDto> =
        sqlx::query_as("SELECT id, name, classification FROM roles ORDER BY name")
            .fetch_all(db)
            .await?;
    Ok(roles)
}

/// The declared capabilities as the running evaluator sees them, i.e. the
/// current in-memory catalog rather than the raw tables.
pub fn list_permissions(state: &AppState) -> Vec<CapabilityEntry> {
    state
        .catalog
        .current()
        .entries()
        .into_iter()
        .cloned()
        .collect()
}
