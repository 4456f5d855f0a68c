//! Application services shared by the headless UI.
//!
//! `AppServices` owns the tokio runtime that executes requests and the
//! tracker client they use. The client sits behind an RwLock so the server
//! URL can be changed without rebuilding the runtime.

use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::RwLock;

use trackmirror_core::Config;
use trackmirror_services::TrackerClient;

use crate::models::{SharedClient, SyncOrchestrator};

pub struct AppServices {
    /// Tokio runtime for async operations
    runtime: tokio::runtime::Runtime,

    config: RwLock<Config>,

    /// Client for the import/sync server, shared with every orchestrator
    tracker_client: SharedClient,
}

impl AppServices {
    /// Build the runtime and client from configuration.
    pub fn new(config: Config) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("trackmirror-tokio")
            .build()
            .context("Failed to create tokio runtime")?;

        let client = build_client(&config)?;
        tracing::info!("Tracker client initialized for {}", client.base_url());

        Ok(Self {
            runtime,
            config: RwLock::new(config),
            tracker_client: Arc::new(RwLock::new(Arc::new(client))),
        })
    }

    /// Get the tokio runtime handle.
    pub fn runtime(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    pub fn tracker_client(&self) -> Arc<TrackerClient> {
        self.tracker_client.read().clone()
    }

    /// Point subsequent requests at another server, including those of
    /// orchestrators built earlier. In-flight requests keep the client they
    /// started with.
    pub fn set_server_url(&self, base_url: &str) -> Result<()> {
        let mut candidate = self.config.read().clone();
        candidate.server.base_url = base_url.to_string();
        let client = build_client(&candidate)?;

        *self.config.write() = candidate;
        *self.tracker_client.write() = Arc::new(client);
        tracing::info!("Tracker client re-pointed at {}", base_url);
        Ok(())
    }

    /// Create an orchestrator bound to this runtime and client.
    pub fn orchestrator(&self) -> SyncOrchestrator {
        let ui = self.config.read().ui.clone();
        SyncOrchestrator::with_shared_client(self.tracker_client.clone(), self.runtime(), &ui)
    }

    /// Block the calling thread on a future using the owned runtime.
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

fn build_client(config: &Config) -> Result<TrackerClient> {
    TrackerClient::new(&config.server.base_url, config.server.request_timeout())
        .context("Failed to create tracker client")
}
