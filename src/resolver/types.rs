//! Resolver output types.

use serde::{Deserialize, Serialize};

use crate::model::{ComposedComponent, ResolvedPage, RouteDefinition};
use crate::routing::{RouteConflict, ShadowedRoute};
use crate::store::CacheVersion;

/// Complete answer for one `(tenant, path)` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPageWithComponents {
    pub page: ResolvedPage,
    pub components: Vec<ComposedComponent>,
}

/// A custom route excluded from the table because its page types cannot serve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRoute {
    pub prefix: String,
    pub custom_route_id: Option<String>,
    pub reason: String,
}

/// Effective route table of a tenant, for administrators.
#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub tenant: String,
    pub default_language: String,
    pub languages: Vec<String>,
    pub version: CacheVersion,
    /// Enabled routes, system first, with tenant alias overrides applied.
    pub routes: Vec<RouteDefinition>,
    pub conflicts: Vec<RouteConflict>,
    pub shadowed: Vec<ShadowedRoute>,
    pub rejected: Vec<RejectedRoute>,
}
