//! Wire-contract tests for the client permission mirror.
//!
//! The browser mirror deserializes these payloads verbatim; the Spanish
//! field names are part of the external contract and renaming any of them
//! is a breaking change.

use gestaller::modules::areas::model::{AreaAssignmentResponse, AreaDto};
use gestaller::modules::permissions::model::{
    CheckPermissionDto, CheckPermissionResponse, EffectivePermissionsResponse, PermissionDto,
};
use gestaller::modules::users::model::UserDto;
use gestaller_core::{CapabilityEntry, EffectivePermissionSet};
use uuid::Uuid;

fn sample_set() -> EffectivePermissionSet {
    EffectivePermissionSet {
        user_id: Uuid::new_v4(),
        role_id: Uuid::new_v4(),
        role_name: "Floor operator".to_string(),
        is_admin: false,
        is_supervisor: false,
        is_operator: true,
        is_warehouse: false,
        areas: vec!["Cutting".to_string(), "Quality".to_string()],
        capabilities: vec![CapabilityEntry {
            id: Uuid::new_v4(),
            name: "Projects.CompleteArea".to_string(),
            module: "Projects".to_string(),
            action: "CompleteArea".to_string(),
            area_scoped: true,
        }],
    }
}

#[test]
fn test_effective_permissions_field_names() {
    let response = EffectivePermissionsResponse::from(sample_set());
    let json = serde_json::to_value(&response).unwrap();

    for key in [
        "idUsuario",
        "idRol",
        "nombreRol",
        "esAdmin",
        "esSupervisor",
        "esOperario",
        "esDeposito",
        "areasAsignadas",
        "permisos",
    ] {
        assert!(json.get(key).is_some(), "missing field {key}");
    }

    assert_eq!(json["esOperario"], true);
    assert_eq!(json["areasAsignadas"][0], "Cutting");

    let permiso = &json["permisos"][0];
    for key in ["idPermiso", "nombrePermiso", "modulo", "accion"] {
        assert!(permiso.get(key).is_some(), "missing field permisos[].{key}");
    }
    assert_eq!(permiso["modulo"], "Projects");
    assert_eq!(permiso["accion"], "CompleteArea");
}

#[test]
fn test_permission_dto_does_not_leak_internal_flags() {
    let dto = PermissionDto::from(CapabilityEntry {
        id: Uuid::new_v4(),
        name: "Clients.View".to_string(),
        module: "Clients".to_string(),
        action: "View".to_string(),
        area_scoped: false,
    });
    let json = serde_json::to_value(&dto).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 4);
}

#[test]
fn test_check_permission_request_and_response_shape() {
    let dto: CheckPermissionDto = serde_json::from_str(
        r#"{"modulo": "Projects", "accion": "CompleteArea", "area": "Cutting"}"#,
    )
    .unwrap();
    assert_eq!(dto.module, "Projects");
    assert_eq!(dto.action, "CompleteArea");
    assert_eq!(dto.area.as_deref(), Some("Cutting"));

    // The area context is optional on the wire.
    let dto: CheckPermissionDto =
        serde_json::from_str(r#"{"modulo": "Clients", "accion": "View"}"#).unwrap();
    assert!(dto.area.is_none());

    let json = serde_json::to_value(CheckPermissionResponse { allowed: false }).unwrap();
    assert_eq!(json["permitido"], false);
}

#[test]
fn test_area_wire_shapes() {
    let area_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let json = serde_json::to_value(AreaDto {
        id: area_id,
        name: "Sewing".to_string(),
    })
    .unwrap();
    assert_eq!(json["idArea"], serde_json::json!(area_id));
    assert_eq!(json["nombre"], "Sewing");

    let json = serde_json::to_value(AreaAssignmentResponse {
        message: "Area assigned".to_string(),
        user_id,
        area_id,
    })
    .unwrap();
    assert_eq!(json["idUsuario"], serde_json::json!(user_id));
    assert_eq!(json["idArea"], serde_json::json!(area_id));
}

#[test]
fn test_user_wire_shape() {
    let json = serde_json::to_value(UserDto {
        id: Uuid::new_v4(),
        name: "Ana Duarte".to_string(),
        email: "ana@example.com".to_string(),
        role_id: Uuid::new_v4(),
        role_name: "Supervisor".to_string(),
        status: "active".to_string(),
    })
    .unwrap();

    for key in ["idUsuario", "nombre", "email", "idRol", "nombreRol", "estado"] {
        assert!(json.get(key).is_some(), "missing field {key}");
    }
}
