//! Application error taxonomy.
//!
//! The variants matter as much as the status codes: the authorization gate
//! must be able to tell an infrastructure failure (catalog or store
//! unreachable, pool timeout) apart from a plain denial, so an outage is
//! surfaced as 503 and never silently turned into "no permission". The
//! 401 and 403 bodies are fixed, generic strings; they never reveal which
//! capability or area was missing.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    /// No identity or an invalid token. Rejected before evaluation.
    #[error("Not authenticated or invalid token.")]
    Authentication,

    /// Evaluation returned false. Unknown users and unknown capabilities
    /// fold into this variant so the response leaks no existence
    /// information.
    #[error("You do not have permission to perform this action.")]
    Authorization,

    /// A request that is well formed but violates a domain rule, e.g.
    /// assigning an area to a non-operator.
    #[error("{0}")]
    Validation(String),

    /// Malformed request body or parameters.
    #[error("{0}")]
    BadRequest(String),

    /// Missing resource on the administration surface. Never produced on
    /// the authorization path.
    #[error("{0}")]
    NotFound(String),

    /// The catalog or assignment store is unreachable or timed out.
    /// Distinct from a denial so operators can tell outages from
    /// legitimate rejections.
    #[error("authorization backend unavailable")]
    Infrastructure(#[source] anyhow::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn infrastructure<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Infrastructure(err.into())
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Authentication => StatusCode::UNAUTHORIZED,
            Self::Authorization => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Infrastructure(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Every store access goes through sqlx; a failing pool, connection, or
/// query is an infrastructure fault, not a decision.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Infrastructure(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            Self::Infrastructure(source) => {
                error!(error = %source, "authorization backend unavailable");
                "Service temporarily unavailable.".to_string()
            }
            Self::Internal(source) => {
                error!(error = %source, "unhandled internal error");
                "Internal server error.".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
