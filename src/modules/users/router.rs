use axum::{
    Router,
    routing::{get, patch, post},
};
use gestaller_core::{actions, modules};

use crate::middleware::gate::{RequiredCapability, protect};
use crate::state::AppState;

use super::controller;

pub fn init_users_router(state: &AppState) -> Router<AppState> {
    let read = Router::new()
        .route("/usuarios", get(controller::get_users))
        .route("/usuarios/{user_id}", get(controller::get_user));
    let create = Router::new().route("/usuarios", post(controller::create_user));
    let edit = Router::new()
        .route("/usuarios/{user_id}/estado", patch(controller::update_status))
        .route("/usuarios/{user_id}/rol", patch(controller::update_role));

    protect(
        read,
        state,
        RequiredCapability::new(modules::USERS, actions::VIEW),
    )
    .merge(protect(
        create,
        state,
        RequiredCapability::new(modules::USERS, actions::CREATE),
    ))
    .merge(protect(
        edit,
        state,
        RequiredCapability::new(modules::USERS, actions::EDIT),
    ))
}
