//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener
//! - Dispatch resolve requests to the resolver
//! - Apply site data reloads (store swap + global cache bump)

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, Request},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin;
use crate::config::{AdminConfig, ResolverConfig};
use crate::error::ResolveError;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::observability::metrics;
use crate::resolver::{ResolvedPageWithComponents, Resolver};
use crate::store::{DataContext, MemoryStore, SiteData};

/// Query parameter carrying the path to resolve; every other parameter is
/// handed to dynamic components.
pub const PATH_PARAM: &str = "path";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
    pub store: Arc<MemoryStore>,
    pub admin: AdminConfig,
    pub started_at: Instant,
    pub request_count: Arc<AtomicUsize>,
}

impl AppState {
    /// Swap in new site data and invalidate every cached tenant.
    pub fn apply_site_data(&self, data: SiteData) {
        let tenants = data.tenants.len();
        self.store.replace(data);
        let version = self.resolver.cache().invalidate_all();
        metrics::record_data_reload("applied");
        tracing::info!(tenants, version, "Site data reloaded");
    }
}

/// HTTP server for the page resolver.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server serving the given store.
    pub fn new(config: ResolverConfig, store: Arc<MemoryStore>) -> Self {
        let resolver = Resolver::new(DataContext::from_store(store.clone()), config.cache.enabled);

        let state = AppState {
            resolver,
            store,
            admin: config.admin.clone(),
            started_at: Instant::now(),
            request_count: Arc::new(AtomicUsize::new(0)),
        };

        let router = Self::build_router(&config, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ResolverConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/resolve/{tenant}", get(resolve_handler))
            .route("/health", get(health_handler));

        if config.admin.enabled {
            router = router.merge(admin::setup_admin_router(state.clone()));
        }

        router
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Site data received on `data_updates` replaces the store contents until
    /// shutdown is signalled.
    pub async fn run(
        self,
        listener: TcpListener,
        mut data_updates: mpsc::UnboundedReceiver<SiteData>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        let mut reload_shutdown = shutdown.resubscribe();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    Some(data) = data_updates.recv() => state.apply_site_data(data),
                    _ = reload_shutdown.recv() => break,
                    else => break,
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// `GET /resolve/{tenant}?path=/en/x&k=v`
async fn resolve_handler(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
    Query(mut query): Query<BTreeMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<ResolvedPageWithComponents>, ResolveError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let path = query.remove(PATH_PARAM).unwrap_or_else(|| "/".to_string());

    tracing::debug!(
        request_id = %request_id(&headers),
        tenant = %tenant,
        path = %path,
        "Resolving page"
    );

    let resolved = state.resolver.resolve(&tenant, &path, &query).await?;
    Ok(Json(resolved))
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health_handler() -> Json<Health> {
    Json(Health { status: "ok" })
}
