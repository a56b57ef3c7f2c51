use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::areas::model::{
    Area, AreaAssignmentResponse, AreaDto, AssignAreaDto, CreateAreaDto,
};
use crate::modules::permissions::model::{
    CatalogPermissionDto, CheckPermissionDto, CheckPermissionResponse,
    EffectivePermissionsResponse, PermissionDto, ReloadResponse, RoleDto,
};
use crate::modules::users::model::{
    CreateUserDto, PaginatedUsersResponse, UpdateRoleDto, UpdateStatusDto, UserDto,
};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::update_status,
        crate::modules::users::controller::update_role,
        crate::modules::areas::controller::get_areas,
        crate::modules::areas::controller::create_area,
        crate::modules::areas::controller::get_user_areas,
        crate::modules::areas::controller::assign_area,
        crate::modules::areas::controller::remove_area,
        crate::modules::permissions::controller::get_effective_permissions,
        crate::modules::permissions::controller::check_permission,
        crate::modules::permissions::controller::get_roles,
        crate::modules::permissions::controller::get_permissions,
        crate::modules::permissions::controller::reload_permissions,
    ),
    components(
        schemas(
            UserDto,
            CreateUserDto,
            UpdateStatusDto,
            UpdateRoleDto,
            PaginatedUsersResponse,
            Area,
            AreaDto,
            CreateAreaDto,
            AssignAreaDto,
            AreaAssignmentResponse,
            PermissionDto,
            EffectivePermissionsResponse,
            CheckPermissionDto,
            CheckPermissionResponse,
            RoleDto,
            CatalogPermissionDto,
            ReloadResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "User provisioning and administration"),
        (name = "Areas", description = "Area administration and user assignments"),
        (name = "Permissions", description = "Effective permissions, catalog administration, decision probe")
    ),
    info(
        title = "Gestaller API",
        version = "0.1.0",
        description = "Workshop management API. Every privileged request is re-evaluated against the permission catalog and the caller's role and area assignments.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
