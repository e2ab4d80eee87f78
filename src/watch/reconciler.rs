//! # Reconciliation Engine
//!
//! Turns one target's query outcome into a create-or-update decision against
//! the notification surface. Targets within a channel are processed
//! sequentially so one recent-messages fetch serves the whole channel; a
//! failing target never aborts its siblings.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::WatchConfig;
use crate::error::{Result, WatchError};
use crate::models::{Monitor, NewHistoryPoint};
use crate::notify::{offline_presentation, online_presentation, NotificationSurface};
use crate::protocols::protocol_by_tag;
use crate::query::{QueryEngine, QueryOutcome, QueryTarget, ServerSnapshot};
use crate::registry::{HistoryStore, MonitorRegistry};
use crate::watch::report::{TargetOutcome, TargetStatus};

/// Reconciles monitored targets against the notification surface.
pub struct Reconciler {
    surface: Arc<dyn NotificationSurface>,
    registry: Arc<dyn MonitorRegistry>,
    history: Arc<dyn HistoryStore>,
    engine: QueryEngine,
    config: WatchConfig,
}

impl Reconciler {
    pub fn new(
        surface: Arc<dyn NotificationSurface>,
        registry: Arc<dyn MonitorRegistry>,
        history: Arc<dyn HistoryStore>,
        engine: QueryEngine,
        config: WatchConfig,
    ) -> Self {
        Self {
            surface,
            registry,
            history,
            engine,
            config,
        }
    }

    /// Process one channel group sequentially. One recent-messages fetch is
    /// shared across all targets in the channel; if even that fails the
    /// per-target handle fetch still gets its chance.
    pub async fn reconcile_channel(
        &self,
        channel_id: &str,
        monitors: &[Monitor],
    ) -> Vec<TargetOutcome> {
        // Only this process's own messages are edit candidates.
        let known_ids: HashSet<String> = match self
            .surface
            .fetch_recent_messages(channel_id, self.config.message_fetch_limit)
            .await
        {
            Ok(messages) => messages
                .into_iter()
                .filter(|m| m.authored_by_self)
                .map(|m| m.id)
                .collect(),
            Err(e) => {
                debug!(channel_id, error = %e, "recent-messages fetch failed; falling back to per-target fetches");
                HashSet::new()
            }
        };

        let mut outcomes = Vec::with_capacity(monitors.len());
        for monitor in monitors {
            let outcome = match self.reconcile_target(monitor, &known_ids).await {
                Ok(status) => TargetOutcome {
                    monitor_id: monitor.id,
                    status,
                    detail: None,
                },
                Err(e) => {
                    warn!(
                        monitor_id = monitor.id,
                        channel_id,
                        target = %monitor.server_host,
                        error = %e,
                        "target reconciliation failed; will retry next tick"
                    );
                    TargetOutcome {
                        monitor_id: monitor.id,
                        status: TargetStatus::Error,
                        detail: Some(e.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Reconcile a single target. Every tick re-derives the presentation
    /// from a fresh query; there is no flapping suppression.
    async fn reconcile_target(
        &self,
        monitor: &Monitor,
        known_ids: &HashSet<String>,
    ) -> Result<TargetStatus> {
        let port = self.resolve_port(monitor)?;
        let target = QueryTarget {
            query_tag: monitor.game_type.clone(),
            host: monitor.server_host.clone(),
            port,
        };

        let existing = self.resolve_existing_message(monitor, known_ids).await;

        debug!(
            monitor_id = monitor.id,
            target = %target.address(),
            "checking server"
        );
        let outcome = self
            .engine
            .query(&target, self.config.periodic_budget)
            .await;

        match outcome {
            QueryOutcome::Online(snapshot) => {
                self.record_sample(monitor, &snapshot).await;
                let content =
                    online_presentation(monitor, &snapshot, port, &self.config, Utc::now());
                self.publish(monitor, existing, &content).await?;
                Ok(TargetStatus::Online)
            }
            QueryOutcome::Offline(failure) => {
                info!(
                    monitor_id = monitor.id,
                    target = %target.address(),
                    failure = %failure,
                    "server offline"
                );
                let address = target.address();
                let content = offline_presentation(monitor, &address, &self.config, Utc::now());
                self.publish(monitor, existing, &content).await?;
                Ok(TargetStatus::Offline)
            }
        }
    }

    fn resolve_port(&self, monitor: &Monitor) -> Result<u16> {
        if let Some(port) = monitor.server_port {
            return Ok(port as u16);
        }
        protocol_by_tag(&monitor.game_type)
            .map(|p| p.default_port)
            .ok_or_else(|| WatchError::ProtocolUnsupported(monitor.game_type.clone()))
    }

    /// Resolve the stored handle to a live message. Any fetch failure is
    /// treated as "no existing message" for this run only.
    async fn resolve_existing_message(
        &self,
        monitor: &Monitor,
        known_ids: &HashSet<String>,
    ) -> Option<String> {
        let handle = monitor.message_id.as_ref()?;
        if known_ids.contains(handle) {
            return Some(handle.clone());
        }
        match self
            .surface
            .fetch_message(&monitor.channel_id, handle)
            .await
        {
            Ok(message) if message.authored_by_self => Some(message.id),
            Ok(_) => {
                debug!(
                    monitor_id = monitor.id,
                    handle, "stored handle points at a foreign message; will create a new one"
                );
                None
            }
            Err(e) => {
                debug!(
                    monitor_id = monitor.id,
                    handle, error = %e,
                    "could not fetch status message; will create a new one"
                );
                None
            }
        }
    }

    /// Best-effort history append: failures are logged and swallowed because
    /// history is auxiliary to the reconciliation outcome.
    async fn record_sample(&self, monitor: &Monitor, snapshot: &ServerSnapshot) {
        let point = NewHistoryPoint {
            server_monitor_id: monitor.id,
            player_count: snapshot.current_players as i32,
            max_players: snapshot.max_players as i32,
            map_name: snapshot.map.clone(),
            server_name: snapshot.name.clone(),
            ping_ms: snapshot.ping_ms.map(|p| p as i32),
        };
        if let Err(e) = self.history.record(point).await {
            warn!(monitor_id = monitor.id, error = %e, "failed to record history sample");
        }
    }

    /// Edit the existing message or create a new one; persist the handle
    /// only on create.
    async fn publish(
        &self,
        monitor: &Monitor,
        existing: Option<String>,
        content: &crate::notify::MessageContent,
    ) -> Result<()> {
        match existing {
            Some(message_id) => {
                self.surface
                    .edit_message(&monitor.channel_id, &message_id, content)
                    .await?;
                debug!(monitor_id = monitor.id, message_id, "status message updated");
            }
            None => {
                let handle = self
                    .surface
                    .create_message(&monitor.channel_id, content)
                    .await?;
                self.registry.set_message_handle(monitor.id, &handle).await?;
                info!(monitor_id = monitor.id, handle, "status message created");
            }
        }
        Ok(())
    }
}
