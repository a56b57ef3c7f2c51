use axum::{
    Router,
    routing::{get, post},
};
use gestaller_core::{actions, modules};

use crate::middleware::gate::{RequiredCapability, protect};
use crate::state::AppState;

use super::controller;

pub fn init_permissions_router(state: &AppState) -> Router<AppState> {
    // The effective-set endpoint and the probe only need authentication;
    // the handlers enforce the self-or-admin rule and evaluate for the
    // caller respectively.
    let query = Router::new()
        .route(
            "/permisos-efectivos/{user_id}",
            get(controller::get_effective_permissions),
        )
        .route("/permisos/verificar", post(controller::check_permission));

    let catalog_read = Router::new()
        .route("/roles", get(controller::get_roles))
        .route("/permisos", get(controller::get_permissions));

    let catalog_reload =
        Router::new().route("/permisos/recargar", post(controller::reload_permissions));

    query
        .merge(protect(
            catalog_read,
            state,
            RequiredCapability::new(modules::PERMISSIONS, actions::VIEW),
        ))
        .merge(protect(
            catalog_reload,
            state,
            RequiredCapability::new(modules::PERMISSIONS, actions::RELOAD),
        ))
}
