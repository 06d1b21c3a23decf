//! Live server status from the mcsrvstat.us API
//!
//! The status endpoint is an opaque JSON source; everything here is boundary
//! code. Fetch failures never surface as "offline" to the user: the previous
//! known snapshot (initially `Unknown`) is retained until the next poll.

pub mod poller;

pub use poller::StatusPoller;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Raw mcsrvstat.us response, limited to the fields we consume
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub online: bool,

    #[serde(default)]
    pub players: Option<PlayerCounts>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub debug: Option<DebugInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerCounts {
    pub online: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DebugInfo {
    /// Whether the API actually reached the server. `online` alone can be a
    /// stale cache hit, so both must be true to call the server up.
    #[serde(default)]
    pub ping: bool,
}

/// What the UI displays for the server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ServerStatus {
    /// No successful poll yet ("Checking...")
    #[default]
    Unknown,
    Online {
        players_online: Option<i64>,
        players_max: Option<i64>,
        version: Option<String>,
    },
    Offline,
}

impl ServerStatus {
    /// Interpret a successfully parsed API response.
    pub fn from_response(response: &StatusResponse) -> Self {
        let pinged = response.debug.as_ref().map(|d| d.ping).unwrap_or(false);
        if response.online && pinged {
            ServerStatus::Online {
                players_online: response.players.as_ref().map(|p| p.online),
                players_max: response.players.as_ref().map(|p| p.max),
                version: response.version.clone(),
            }
        } else {
            ServerStatus::Offline
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServerStatus::Unknown => "Checking...",
            ServerStatus::Online { .. } => "Online",
            ServerStatus::Offline => "Offline",
        }
    }

    /// "4 / 20" style player count, em-dashes when unknown.
    pub fn players_label(&self) -> String {
        match self {
            ServerStatus::Online {
                players_online,
                players_max,
                ..
            } => {
                let online = players_online
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "—".to_string());
                let max = players_max
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "—".to_string());
                format!("{} / {}", online, max)
            }
            _ => "— / —".to_string(),
        }
    }
}

/// HTTP client for the status endpoint
#[derive(Clone)]
pub struct StatusClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl StatusClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid status endpoint URL: {}", endpoint))?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("Packdex/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(8))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, endpoint })
    }

    /// One poll attempt. Any failure (network, HTTP status, parse) is an
    /// error for the caller to swallow; the next scheduled poll is the retry.
    pub async fn fetch(&self) -> Result<StatusResponse> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .context("Failed to reach status API")?;

        let http_status = response.status();
        if !http_status.is_success() {
            bail!("Status API returned {}", http_status);
        }

        response
            .json::<StatusResponse>()
            .await
            .context("Failed to parse status API response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_online_requires_ping_confirmation() {
        let response: StatusResponse = serde_json::from_str(
            r#"{"online": true, "debug": {"ping": true},
                "players": {"online": 4, "max": 20}, "version": "1.21.1"}"#,
        )
        .unwrap();

        let status = ServerStatus::from_response(&response);
        assert_eq!(status.label(), "Online");
        assert_eq!(status.players_label(), "4 / 20");
        match status {
            ServerStatus::Online { version, .. } => {
                assert_eq!(version.as_deref(), Some("1.21.1"))
            }
            other => panic!("expected Online, got {:?}", other),
        }
    }

    #[test]
    fn test_cached_online_without_ping_is_offline() {
        let response: StatusResponse =
            serde_json::from_str(r#"{"online": true, "debug": {"ping": false}}"#).unwrap();
        assert_eq!(
            ServerStatus::from_response(&response),
            ServerStatus::Offline
        );
    }

    #[test]
    fn test_offline_response() {
        let response: StatusResponse = serde_json::from_str(r#"{"online": false}"#).unwrap();
        assert_eq!(
            ServerStatus::from_response(&response),
            ServerStatus::Offline
        );
    }

    #[test]
    fn test_missing_players_block_degrades() {
        let response: StatusResponse =
            serde_json::from_str(r#"{"online": true, "debug": {"ping": true}}"#).unwrap();
        let status = ServerStatus::from_response(&response);
        assert_eq!(status.label(), "Online");
        assert_eq!(status.players_label(), "— / —");
    }

    #[test]
    fn test_default_status_is_unknown() {
        assert_eq!(ServerStatus::default().label(), "Checking...");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        assert!(StatusClient::new("not a url").is_err());
        assert!(StatusClient::new("https://api.mcsrvstat.us/2/example.org").is_ok());
    }
}
