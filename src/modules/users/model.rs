use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::PaginationMeta;

/// A user joined with its role, as read for administration responses.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithRole {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role_id: Uuid,
    pub role_name: String,
    pub classification: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    #[serde(rename = "idUsuario")]
    pub id: Uuid,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "email")]
    pub email: String,
    #[serde(rename = "idRol")]
    pub role_id: Uuid,
    #[serde(rename = "nombreRol")]
    pub role_name: String,
    #[serde(rename = "estado")]
    pub status: String,
}

impl From<UserWithRole> for UserDto {
    fn from(user: UserWithRole) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role_id: user.role_id,
            role_name: user.role_name,
            status: user.status,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[serde(rename = "nombre")]
    #[validate(length(
        min = 1,
        max = 200,
        message = "nombre must be between 1 and 200 characters"
    ))]
    pub name: String,
    #[serde(rename = "email")]
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[serde(rename = "idRol")]
    pub role_id: Uuid,
}

/// Users are never deleted; deactivation is the terminal state change.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusDto {
    #[serde(rename = "estado")]
    #[validate(length(min = 1, message = "estado is required"))]
    pub status: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleDto {
    #[serde(rename = "idRol")]
    pub role_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<UserDto>,
    pub meta: PaginationMeta,
}
