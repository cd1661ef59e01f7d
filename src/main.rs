//! Page resolver service.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use page_resolver::config::loader::{load_config, load_site_data};
use page_resolver::config::watcher::DataWatcher;
use page_resolver::lifecycle::signals::spawn_signal_handler;
use page_resolver::observability::{logging, metrics};
use page_resolver::{HttpServer, MemoryStore, ResolverConfig, Shutdown, SiteData};

#[derive(Parser)]
#[command(name = "page-resolver")]
#[command(about = "Multi-tenant page resolution service", long_about = None)]
struct Args {
    /// Service configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ResolverConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "page-resolver starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        cache_enabled = config.cache.enabled,
        admin_enabled = config.admin.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let data = match &config.data.seed_path {
        Some(path) => load_site_data(Path::new(path))?,
        None => {
            tracing::warn!("No site data configured; every tenant will be unknown");
            SiteData::default()
        }
    };
    tracing::info!(
        tenants = data.tenants.len(),
        page_types = data.page_types.len(),
        routes = data.routes.len(),
        "Site data loaded"
    );
    let store = Arc::new(MemoryStore::new(data));

    // The watcher must stay alive for reload events to flow.
    let (data_updates, _watcher) = match (&config.data.seed_path, config.data.watch) {
        (Some(path), true) => {
            let (watcher, updates) = DataWatcher::new(Path::new(path));
            (updates, Some(watcher.run()?))
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (updates, None)
        }
    };

    let shutdown = Shutdown::new();
    spawn_signal_handler(shutdown.clone());

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, store);
    server.run(listener, data_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
