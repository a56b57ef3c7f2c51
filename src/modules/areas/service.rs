//! Area administration and the user/area assignment store.
//!
//! Assignments are meaningful only for operator users and the boundary
//! enforces it: assigning to any other classification is a validation
//! error. Assignment is idempotent and removal of an absent assignment is
//! not an error. Listing order is by name, for display only.

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{Area, CreateAreaDto};

#[instrument(skip(db))]
pub async fn list_areas(db: &PgPool) -> Result<Vec<Area>, AppError> {
    let areas: Vec<Area> =
        sqlx::query_as("SELECT id, name, created_at FROM areas ORDER BY name")
            .fetch_all(db)
            .await?;
    Ok(areas)
}

#[instrument(skip(db))]
pub async fn create_area(db: &PgPool, dto: CreateAreaDto) -> Result<Area, AppError> {
    sqlx::query_as(
        "INSERT INTO areas (name) VALUES ($1) RETURNING id, name, created_at",
    )
    .bind(dto.name.trim())
    .fetch_one(db)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::validation("An area with this name already exists");
            }
        }
        AppError::from(e)
    })
}

/// Assigned area names for one user, name ordered. This is what the
/// evaluator reads while resolving an operator.
pub async fn list_area_names(db: &PgPool, user_id: Uuid) -> Result<Vec<String>, AppError> {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT a.name FROM user_areas ua \
         JOIN areas a ON a.id = ua.area_id \
         WHERE ua.user_id = $1 ORDER BY a.name",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(names)
}

#[instrument(skip(db))]
pub async fn list_user_areas(db: &PgPool, user_id: Uuid) -> Result<Vec<Area>, AppError> {
    let areas: Vec<Area> = sqlx::query_as(
        "SELECT a.id, a.name, a.created_at FROM user_areas ua \
         JOIN areas a ON a.id = ua.area_id \
         WHERE ua.user_id = $1 ORDER BY a.name",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(areas)
}

#[instrument(skip(db))]
pub async fn assign_area(db: &PgPool, user_id: Uuid, area_id: Uuid) -> Result<(), AppError> {
    let classification: Option<String> = sqlx::query_scalar(
        "SELECT r.classification FROM users u \
         JOIN roles r ON r.id = u.role_id WHERE u.id = $1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    let Some(classification) = classification else {
        return Err(AppError::not_found("User not found"));
    };
    if classification.trim() != "operator" {
        return Err(AppError::validation(
            "Areas can only be assigned to operator users",
        ));
    }

    let area: Option<Uuid> = sqlx::query_scalar("SELECT id FROM areas WHERE id = $1")
        .bind(area_id)
        .fetch_optional(db)
        .await?;
    if area.is_none() {
        return Err(AppError::not_found("Area not found"));
    }

    // Re-assigning an already held area is a no-op.
    sqlx::query(
        "INSERT INTO user_areas (user_id, area_id) VALUES ($1, $2) \
         ON CONFLICT (user_id, area_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(area_id)
    .execute(db)
    .await?;

    Ok(())
}

#[instrument(skip(db))]
pub async fn remove_area(db: &PgPool, user_id: Uuid, area_id: Uuid) -> Result<(), AppError> {
    // Absence is not an error.
    sqlx::query("DELETE FROM user_areas WHERE user_id = $1 AND area_id = $2")
        .bind(user_id)
        .bind(area_id)
        .execute(db)
        .await?;

    Ok(())
}
