use std::sync::atomic::Ordering;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::error::ResolveError;
use crate::http::server::AppState;
use crate::resolver::RouteReport;
use crate::store::CacheStats;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub uptime_secs: u64,
    pub total_requests: usize,
    pub tenants: usize,
    pub cache: CacheStats,
}

#[derive(Serialize)]
pub struct TenantInvalidation {
    pub tenant: String,
    pub version: u64,
}

#[derive(Serialize)]
pub struct GlobalInvalidation {
    pub global_version: u64,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        uptime_secs: state.started_at.elapsed().as_secs(),
        total_requests: state.request_count.load(Ordering::Relaxed),
        tenants: state.store.snapshot().tenants.len(),
        cache: state.resolver.cache().stats(),
    })
}

/// Effective route table, conflicts and excluded routes of one tenant.
pub async fn get_tenant_routes(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
) -> Result<Json<RouteReport>, ResolveError> {
    let snapshot = state.resolver.site(&tenant).await?;
    Ok(Json(snapshot.report()))
}

pub async fn invalidate_tenant(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
) -> Result<Json<TenantInvalidation>, ResolveError> {
    if state.store.snapshot().tenant(&tenant).is_none() {
        return Err(ResolveError::TenantNotFound(tenant));
    }
    let version = state.resolver.cache().invalidate_tenant(&tenant);
    Ok(Json(TenantInvalidation { tenant, version }))
}

pub async fn invalidate_all(State(state): State<AppState>) -> Json<GlobalInvalidation> {
    Json(GlobalInvalidation {
        global_version: state.resolver.cache().invalidate_all(),
    })
}

pub async fn get_cache(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.resolver.cache().stats())
}
