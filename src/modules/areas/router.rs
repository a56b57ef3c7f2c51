use axum::{
    Router,
    routing::{delete, get, post},
};
use gestaller_core::{actions, modules};

use crate::middleware::gate::{RequiredCapability, protect};
use crate::state::AppState;

use super::controller;

pub fn init_areas_router(state: &AppState) -> Router<AppState> {
    let read = Router::new().route("/areas", get(controller::get_areas));
    let create = Router::new().route("/areas", post(controller::create_area));

    let assignment_read =
        Router::new().route("/usuarios/{user_id}/areas", get(controller::get_user_areas));
    let assignment_write = Router::new()
        .route("/usuarios/{user_id}/areas", post(controller::assign_area))
        .route(
            "/usuarios/{user_id}/areas/{area_id}",
            delete(controller::remove_area),
        );

    protect(
        read,
        state,
        RequiredCapability::new(modules::AREAS, actions::VIEW),
    )
    .merge(protect(
        create,
        state,
        RequiredCapability::new(modules::AREAS, actions::CREATE),
    ))
    .merge(protect(
        assignment_read,
        state,
        RequiredCapability::new(modules::USERS, actions::VIEW),
    ))
    .merge(protect(
        assignment_write,
        state,
        RequiredCapability::new(modules::USERS, actions::ASSIGN_AREAS),
    ))
}
