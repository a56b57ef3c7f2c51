use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// An operational zone of the workshop ("Cutting", "Sewing", "Quality").
/// Other entities reference areas; here they only scope operator checks.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Area {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AreaDto {
    #[serde(rename = "idArea")]
    pub id: Uuid,
    #[serde(rename = "nombre")]
    pub name: String,
}

impl From<Area> for AreaDto {
    fn from(area: Area) -> Self {
        Self {
            id: area.id,
            name: area.name,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAreaDto {
    #[serde(rename = "nombre")]
    #[validate(length(
        min = 1,
        max = 100,
        message = "nombre must be between 1 and 100 characters"
    ))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignAreaDto {
    #[serde(rename = "idArea")]
    pub area_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AreaAssignmentResponse {
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "idUsuario")]
    pub user_id: Uuid,
    #[serde(rename = "idArea")]
    pub area_id: Uuid,
}
