//! Wire types for the permission surface.
//!
//! Field names are the Spanish legacy contract of the surrounding
//! application and are normative: the browser mirror deserializes them
//! as-is. The mirror caches the effective set for UX only (hiding and
//! disabling affordances); it must discard it on logout or on any 401/403,
//! and it is never consulted for enforcement, which happens server side on
//! every request.

use gestaller_core::{CapabilityEntry, EffectivePermissionSet};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// One held capability as presented to the mirror.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PermissionDto {
    #[serde(rename = "idPermiso")]
    pub id: Uuid,
    #[serde(rename = "nombrePermiso")]
    pub name: String,
    #[serde(rename = "modulo")]
    pub module: String,
    #[serde(rename = "accion")]
    pub action: String,
}

impl From<CapabilityEntry> for PermissionDto {
    fn from(entry: CapabilityEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            module: entry.module,
            action: entry.action,
        }
    }
}

/// The effective permission set of one user.
///
/// Area-scoped capabilities appear in `permisos` unconditionally; whether
/// an operator may use one in a concrete area is resolved only at check
/// time, since this set carries no per-area context. Inactive users get
/// empty `permisos` and `areasAsignadas`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EffectivePermissionsResponse {
    #[serde(rename = "idUsuario")]
    pub user_id: Uuid,
    #[serde(rename = "idRol")]
    pub role_id: Uuid,
    #[serde(rename = "nombreRol")]
    pub role_name: String,
    #[serde(rename = "esAdmin")]
    pub is_admin: bool,
    #[serde(rename = "esSupervisor")]
    pub is_supervisor: bool,
    #[serde(rename = "esOperario")]
    pub is_operator: bool,
    #[serde(rename = "esDeposito")]
    pub is_warehouse: bool,
    #[serde(rename = "areasAsignadas")]
    pub areas: Vec<String>,
    #[serde(rename = "permisos")]
    pub permissions: Vec<PermissionDto>,
}

impl From<EffectivePermissionSet> for EffectivePermissionsResponse {
    fn from(set: EffectivePermissionSet) -> Self {
        Self {
            user_id: set.user_id,
            role_id: set.role_id,
            role_name: set.role_name,
            is_admin: set.is_admin,
            is_supervisor: set.is_supervisor,
            is_operator: set.is_operator,
            is_warehouse: set.is_warehouse,
            areas: set.areas,
            permissions: set.capabilities.into_iter().map(PermissionDto::from).collect(),
        }
    }
}

/// Decision probe request, evaluated for the calling user.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckPermissionDto {
    #[serde(rename = "modulo")]
    #[validate(length(min = 1, message = "modulo is required"))]
    pub module: String,
    #[serde(rename = "accion")]
    #[validate(length(min = 1, message = "accion is required"))]
    pub action: String,
    #[serde(rename = "area")]
    pub area: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckPermissionResponse {
    #[serde(rename = "permitido")]
    pub allowed: bool,
}

/// A role as administered, with its classification tag.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RoleDto {
    #[serde(rename = "idRol")]
    pub id: Uuid,
    #[serde(rename = "nombreRol")]
    pub name: String,
    #[serde(rename = "clasificacion")]
    pub classification: String,
}

/// A declared capability on the catalog administration listing. Unlike the
/// mirror DTO this one exposes the area-scoping flag.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogPermissionDto {
    #[serde(rename = "idPermiso")]
    pub id: Uuid,
    #[serde(rename = "nombrePermiso")]
    pub name: String,
    #[serde(rename = "modulo")]
    pub module: String,
    #[serde(rename = "accion")]
    pub action: String,
    #[serde(rename = "requiereArea")]
    pub area_scoped: bool,
}

impl From<CapabilityEntry> for CatalogPermissionDto {
    fn from(entry: CapabilityEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            module: entry.module,
            action: entry.action,
            area_scoped: entry.area_scoped,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReloadResponse {
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "permisosCargados")]
    pub permissions_loaded: usize,
}
