//! Error responses.
//!
//! Every resolution error becomes a JSON body with a stable `error` code, so
//! clients can tell a missing route from a missing entity without parsing
//! messages.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ResolveError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ResolveError::TenantNotFound(_)
            | ResolveError::RouteNotFound { .. }
            | ResolveError::EntityNotFound { .. } => StatusCode::NOT_FOUND,
            ResolveError::AmbiguousRoute { .. } | ResolveError::InvalidCatalog(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ResolveError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.code().to_string(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
