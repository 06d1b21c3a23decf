//! Background status polling task
//!
//! Fires an immediate poll on spawn, then every `interval` until shutdown.
//! The shutdown channel guarantees no poll is issued after teardown; an
//! in-flight request is simply allowed to finish and its result dropped.

use super::{ServerStatus, StatusClient};
use crate::app::state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;

pub struct StatusPoller {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl StatusPoller {
    /// Spawn the polling loop. Each successful poll writes a fresh snapshot
    /// into the shared state; failures are logged and the previous snapshot
    /// stays in place.
    pub fn spawn(
        client: StatusClient,
        interval: Duration,
        state: Arc<RwLock<AppState>>,
    ) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => {
                        tracing::debug!("status poller shutting down");
                        break;
                    }
                    // First tick completes immediately, so the UI gets a
                    // status shortly after startup.
                    _ = ticker.tick() => {
                        match client.fetch().await {
                            Ok(response) => {
                                let status = ServerStatus::from_response(&response);
                                let mut state = state.write().await;
                                state.server_status = status;
                                state.status_checked_at = Some(chrono::Local::now());
                            }
                            Err(e) => {
                                tracing::warn!("server status poll failed: {:#}", e);
                            }
                        }
                    }
                }
            }
        });

        Self { shutdown_tx, handle }
    }

    /// Stop the loop and wait for the task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::AppState;

    #[tokio::test]
    async fn test_failed_polls_keep_previous_snapshot() {
        // Port 1 refuses immediately, so every tick is a failed fetch.
        let client = StatusClient::new("http://127.0.0.1:1/status").unwrap();
        let state = Arc::new(RwLock::new(AppState::new(false, None)));

        let poller = StatusPoller::spawn(client, Duration::from_millis(10), state.clone());
        tokio::time::sleep(Duration::from_millis(60)).await;

        let snapshot = state.read().await;
        assert_eq!(snapshot.server_status, ServerStatus::Unknown);
        assert!(snapshot.status_checked_at.is_none());
        drop(snapshot);

        poller.shutdown().await;
    }

    #[tokio::test]
    async fn test_no_poll_fires_after_shutdown() {
        let client = StatusClient::new("http://127.0.0.1:1/status").unwrap();
        let state = Arc::new(RwLock::new(AppState::new(false, None)));

        let poller = StatusPoller::spawn(client, Duration::from_millis(10), state.clone());
        // shutdown() joins the task, so returning means the loop has exited.
        poller.shutdown().await;

        tokio::time::sleep(Duration::from_millis(60)).await;
        let snapshot = state.read().await;
        assert_eq!(snapshot.server_status, ServerStatus::Unknown);
        assert!(snapshot.status_checked_at.is_none());
    }
}
