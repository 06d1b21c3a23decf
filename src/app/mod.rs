//! Application state and orchestration

mod actions;
pub mod state;

pub use state::{AppState, InputMode, Screen, Selection};

use crate::catalog::{self, CategoryDescriptor, ModStore, SortKey};
use crate::config::Config;
use crate::status::{StatusClient, StatusPoller};
use crate::tui::Tui;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Main application struct that ties the catalog, config, and status
/// collaborator together
pub struct App {
    /// Application configuration
    pub config: Arc<RwLock<Config>>,

    /// Application state
    pub state: Arc<RwLock<AppState>>,

    /// The immutable mod catalog
    pub store: Arc<ModStore>,

    /// Category tab descriptors, in display order
    pub descriptors: Vec<CategoryDescriptor>,

    /// Status endpoint client
    pub status: StatusClient,
}

impl App {
    /// Create a new App instance
    pub async fn new(config: Config) -> Result<Self> {
        config
            .paths
            .ensure_dirs()
            .context("Failed to create directories")?;

        let store = match config.mods_file_override.as_deref() {
            Some(path) => ModStore::load(Path::new(path))
                .with_context(|| format!("Failed to load mod data from {}", path))?,
            None => ModStore::builtin().context("Failed to parse embedded mod data")?,
        };
        let store = Arc::new(store);

        let descriptors = match config.categories_file_override.as_deref() {
            Some(path) => catalog::load_descriptors(Path::new(path))
                .with_context(|| format!("Failed to load category descriptors from {}", path))?,
            None => catalog::default_descriptors(),
        };

        // Surface data/config drift in the logs up front.
        let grouped = catalog::group_by_category(store.records(), &descriptors);
        if !grouped.unmatched.is_empty() {
            tracing::warn!(
                "{} mod(s) are not assigned to any category tab",
                grouped.unmatched.len()
            );
        }

        let status = StatusClient::new(&config.status_url())?;

        let default_sort = SortKey::parse(&config.tui.default_sort);
        let mut state = AppState::new(config.tui.show_help, default_sort);
        state.refresh_visible(&store);

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            state: Arc::new(RwLock::new(state)),
            store,
            descriptors,
            status,
        })
    }

    /// Run the TUI interface with the status poller running alongside it.
    pub async fn run_tui(&mut self) -> Result<()> {
        let interval = {
            let config = self.config.read().await;
            Duration::from_secs(config.poll_interval_secs.max(1))
        };
        let poller = StatusPoller::spawn(self.status.clone(), interval, self.state.clone());

        let mut tui = Tui::new()?;
        let result = tui.run(self).await;

        // No polls fire after the TUI is torn down.
        poller.shutdown().await;
        result
    }

    /// Open the live map in the system browser.
    pub async fn open_map(&self) -> Result<()> {
        let url = self.config.read().await.map_url.clone();
        open::that_detached(&url).with_context(|| format!("Failed to open {}", url))?;
        Ok(())
    }
}
