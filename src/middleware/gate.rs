//! Request-path authorization gate.
//!
//! Every protected route is bound, at registration time in `router.rs`, to
//! a [`RequiredCapability`]: a plain value naming the (module, action) the
//! route demands and, where the capability is area scoped, the carrier the
//! request delivers the area context in. There is no runtime discovery of
//! requirements.
//!
//! Per request the gate authenticates, evaluates against current store
//! state, and only then lets the handler run, so no mutating side effect
//! can start before a verdict exists. Denials produce an audit record and
//! the generic 403 body; infrastructure failures pass through as 503 and
//! are never collapsed into a denial.
//!
//! # Usage
//!
//! ```rust,ignore
//! use axum::{Router, middleware, routing::get};
//! use gestaller_core::{actions, modules};
//!
//! let protected = Router::new()
//!     .route("/usuarios", get(list_users))
//!     .route_layer(middleware::from_fn_with_state(
//!         state.clone(),
//!         |state, req, next| {
//!             enforce(state, req, next, RequiredCapability::new(modules::USERS, actions::VIEW))
//!         },
//!     ));
//! ```

use axum::{
    Router,
    extract::{FromRequestParts, Request, State},
    middleware::{self, Next},
    response::Response,
};
use tracing::warn;

use crate::middleware::auth::AuthUser;
use crate::modules::permissions::service::has_permission;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Where a route's area context travels in the request. Resolving which
/// area a target resource belongs to is the owning domain's job; routes
/// whose resources carry an area declare the carrier here and the caller
/// supplies the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaSource {
    /// The capability is not area scoped for this route.
    None,
    /// Query string parameter, e.g. `?area=Cutting`.
    Query(&'static str),
    /// Request header, e.g. `X-Area: Cutting`.
    Header(&'static str),
}

/// The capability a protected route demands, declared when the route is
/// registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredCapability {
    pub module: &'static str,
    pub action: &'static str,
    pub area: AreaSource,
}

impl RequiredCapability {
    pub const fn new(module: &'static str, action: &'static str) -> Self {
        Self {
            module,
            action,
            area: AreaSource::None,
        }
    }

    pub const fn with_area(mut self, area: AreaSource) -> Self {
        self.area = area;
        self
    }
}

fn context_area(req: &Request, source: AreaSource) -> Option<String> {
    match source {
        AreaSource::None => None,
        AreaSource::Query(name) => {
            let query = req.uri().query()?;
            let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).ok()?;
            pairs.into_iter().find(|(k, _)| k == name).map(|(_, v)| v)
        }
        AreaSource::Header(name) => req
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string()),
    }
}

/// Middleware body shared by every protected route. The check completes,
/// and must grant, before `next` runs.
pub async fn enforce(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    required: RequiredCapability,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    let user_id = auth_user.user_id()?;
    let req = Request::from_parts(parts, body);

    let area = context_area(&req, required.area);

    let allowed = has_permission(
        &state,
        user_id,
        required.module,
        required.action,
        area.as_deref(),
    )
    .await?;

    if !allowed {
        warn!(
            target: "audit",
            user_id = %user_id,
            module = required.module,
            action = required.action,
            path = %req.uri().path(),
            "request denied"
        );
        return Err(AppError::Authorization);
    }

    Ok(next.run(req).await)
}

/// Bind `required` to every route currently registered in `router`. This
/// is the registration-time binding table: a route is protected because
/// the router says so, in code, next to where the route is declared.
pub fn protect(
    router: Router<AppState>,
    state: &AppState,
    required: RequiredCapability,
) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(
        state.clone(),
        move |state: State<AppState>, req: Request, next: Next| {
            enforce(state, req, next, required)
        },
    ))
}
