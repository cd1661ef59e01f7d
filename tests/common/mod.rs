//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use page_resolver::config::loader::parse_site_data;
use page_resolver::http::HttpServer;
use page_resolver::lifecycle::Shutdown;
use page_resolver::{DataContext, MemoryStore, Resolver, ResolverConfig, SiteData};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

pub const ADMIN_KEY: &str = "test-admin-key";

/// The validated fixture document.
pub fn site_data() -> SiteData {
    parse_site_data(include_str!("../fixtures/site.toml")).expect("fixture site data is valid")
}

pub fn store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new(site_data()))
}

pub fn resolver(store: Arc<MemoryStore>) -> Resolver {
    Resolver::new(DataContext::from_store(store), true)
}

pub fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Service config with admin enabled and metrics off.
pub fn config() -> ResolverConfig {
    let mut config = ResolverConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.observability.metrics_enabled = false;
    config.admin.enabled = true;
    config.admin.api_key = ADMIN_KEY.to_string();
    config
}

/// A running server bound to an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<MemoryStore>,
    pub updates: mpsc::UnboundedSender<SiteData>,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

pub async fn start_server() -> TestServer {
    let store = store();
    let shutdown = Shutdown::new();
    let (updates, data_updates) = mpsc::unbounded_channel();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config(), store.clone());
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, data_updates, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    TestServer {
        addr,
        store,
        updates,
        shutdown,
    }
}
