//! Site data file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_site_data;
use crate::observability::metrics;
use crate::store::SiteData;

/// A watcher that monitors the site data document for changes.
pub struct DataWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<SiteData>,
}

impl DataWatcher {
    /// Create a new DataWatcher.
    ///
    /// Returns the watcher and a receiver for validated site data updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<SiteData>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for events to flow.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(path = ?path, "Site data change detected, reloading");
                        match load_site_data(&path) {
                            Ok(data) => {
                                let _ = tx.send(data);
                            }
                            Err(e) => {
                                metrics::record_data_reload("rejected");
                                tracing::error!(
                                    error = %e,
                                    "Failed to reload site data. Keeping current data."
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Site data watcher started");
        Ok(watcher)
    }
}
