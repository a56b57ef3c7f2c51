use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::pagination::{PaginationMeta, PaginationParams};

use super::model::{CreateUserDto, PaginatedUsersResponse, UserDto, UserWithRole};

const SELECT_USER: &str = "SELECT u.id, u.name, u.email, u.role_id, \
     r.name AS role_name, r.classification, u.status, u.created_at, u.updated_at \
     FROM users u JOIN roles r ON r.id = u.role_id";

#[instrument(skip(db))]
pub async fn list_users(
    db: &PgPool,
    params: PaginationParams,
) -> Result<PaginatedUsersResponse, AppError> {
    let limit = params.limit();
    let offset = params.offset();

    let users: Vec<UserWithRole> =
        sqlx::query_as(&format!("{SELECT_USER} ORDER BY u.name LIMIT $1 OFFSET $2"))
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
            .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await?;
    let has_more = offset + (users.len() as i64) < total;

    Ok(PaginatedUsersResponse {
        data: users.into_iter().map(UserDto::from).collect(),
        meta: PaginationMeta {
            total,
            limit,
            offset,
            has_more,
        },
    })
}

#[instrument(skip(db))]
pub async fn get_user(db: &PgPool, id: Uuid) -> Result<UserWithRole, AppError> {
    sqlx::query_as(&format!("{SELECT_USER} WHERE u.id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
}

#[instrument(skip(db))]
pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<UserWithRole, AppError> {
    let role: Option<Uuid> = sqlx::query_scalar("SELECT id FROM roles WHERE id = $1")
        .bind(dto.role_id)
        .fetch_optional(db)
        .await?;
    if role.is_none() {
        return Err(AppError::validation("Unknown role"));
    }

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (name, email, role_id, status) \
         VALUES ($1, $2, $3, 'active') RETURNING id",
    )
    .bind(dto.name.trim())
    .bind(dto.email.trim())
    .bind(dto.role_id)
    .fetch_one(db)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::validation("A user with this email already exists");
            }
        }
        AppError::from(e)
    })?;

    get_user(db, id).await
}

#[instrument(skip(db))]
pub async fn update_status(db: &PgPool, id: Uuid, status: &str) -> Result<UserWithRole, AppError> {
    let status = status.trim();
    if status != "active" && status != "inactive" {
        return Err(AppError::validation("estado must be 'active' or 'inactive'"));
    }

    let updated = sqlx::query("UPDATE users SET status = $1, updated_at = now() WHERE id = $2")
        .bind(status)
        .bind(id)
        .execute(db)
        .await?;
    if updated.rows_affected() == 0 {
        return Err(AppError::not_found("User not found"));
    }

    get_user(db, id).await
}

/// Change a user's role. When the new role is not an operator role the
/// user's area assignments are cleared in the same transaction, keeping
/// the stored state aligned with the invariant that only operators hold
/// areas.
#[instrument(skip(db))]
pub async fn update_role(db: &PgPool, id: Uuid, role_id: Uuid) -> Result<UserWithRole, AppError> {
    let classification: Option<String> =
        sqlx::query_scalar("SELECT classification FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_optional(db)
            .await?;
    let Some(classification) = classification else {
        return Err(AppError::validation("Unknown role"));
    };

    let mut tx = db.begin().await?;

    let updated = sqlx::query("UPDATE users SET role_id = $1, updated_at = now() WHERE id = $2")
        .bind(role_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if updated.rows_affected() == 0 {
        return Err(AppError::not_found("User not found"));
    }

    if classification.trim() != "operator" {
        sqlx::query("DELETE FROM user_areas WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    get_user(db, id).await
}
