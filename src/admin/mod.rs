//! Admin API: route table inspection and cache invalidation.

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/tenants/{tenant}/routes", get(get_tenant_routes))
        .route("/admin/tenants/{tenant}/invalidate", post(invalidate_tenant))
        .route("/admin/invalidate", post(invalidate_all))
        .route("/admin/cache", get(get_cache))
        .layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
