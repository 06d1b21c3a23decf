//! Configuration management for Packdex
//!
//! Uses XDG-compliant paths:
//! - Config: ~/.config/packdex/config.toml
//! - Data: ~/.local/share/packdex/

mod paths;

pub use paths::Paths;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

const DEFAULT_SERVER_ADDRESS: &str = "chickenjockey.lol";
const DEFAULT_MAP_URL: &str =
    "https://map.chickenjockey.lol/?worldname=world&mapname=flat&zoom=0&x=16&y=64&z=0";
const STATUS_API_BASE: &str = "https://api.mcsrvstat.us/2";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minecraft server address the status poll looks up
    pub server_address: String,

    /// Full status endpoint override; when unset the mcsrvstat.us URL is
    /// derived from `server_address`.
    pub status_url_override: Option<String>,

    /// Live map (Dynmap) URL opened in the browser
    pub map_url: String,

    /// Seconds between status polls
    pub poll_interval_secs: u64,

    /// Path to a mod data file replacing the embedded one
    pub mods_file_override: Option<String>,

    /// Path to a category descriptor file replacing the built-in tabs
    pub categories_file_override: Option<String>,

    /// TUI settings
    pub tui: TuiConfig,

    /// Paths configuration
    #[serde(skip)]
    pub paths: Paths,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            status_url_override: None,
            map_url: DEFAULT_MAP_URL.to_string(),
            poll_interval_secs: 10,
            mods_file_override: None,
            categories_file_override: None,
            tui: TuiConfig::default(),
            paths: Paths::new(),
        }
    }
}

/// TUI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Show the help overlay on first draw
    pub show_help: bool,

    /// Default explorer sort key: name, category, or tag
    pub default_sort: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            show_help: false,
            default_sort: "name".to_string(),
        }
    }
}

impl Config {
    /// Resolve the status endpoint (override or derived from the address).
    pub fn status_url(&self) -> String {
        self.status_url_override
            .clone()
            .unwrap_or_else(|| format!("{}/{}", STATUS_API_BASE, self.server_address))
    }

    /// Load configuration from disk or create the default file
    pub async fn load() -> Result<Self> {
        let paths = Paths::new();
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .await
                .context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            let config = Config::default();
            config.save().await?;
            config
        };

        config.paths = paths;
        Ok(config)
    }

    /// Save configuration to disk
    pub async fn save(&self) -> Result<()> {
        let config_path = self.paths.config_file();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content)
            .await
            .context("Failed to write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_url_derived_from_address() {
        let config = Config::default();
        assert_eq!(
            config.status_url(),
            "https://api.mcsrvstat.us/2/chickenjockey.lol"
        );
    }

    #[test]
    fn test_status_url_override_wins() {
        let config = Config {
            status_url_override: Some("https://example.org/status".to_string()),
            ..Default::default()
        };
        assert_eq!(config.status_url(), "https://example.org/status");
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let config = Config {
            server_address: "play.example.net".to_string(),
            poll_interval_secs: 30,
            ..Default::default()
        };
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.server_address, "play.example.net");
        assert_eq!(parsed.poll_interval_secs, 30);
    }
}
