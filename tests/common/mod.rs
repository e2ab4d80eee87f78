//! In-memory fakes for the collaborator seams, shared across the
//! integration suites.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use gamewatch_core::error::{Result, WatchError};
use gamewatch_core::models::{HistoryPoint, Monitor, NewHistoryPoint, NewMonitor};
use gamewatch_core::notify::{MessageContent, MessageRef, NotificationSurface};
use gamewatch_core::query::{QueryFailure, QueryTarget, RawQueryClient, RawResponse};
use gamewatch_core::registry::{HistoryStore, MonitorRegistry};

pub fn monitor(id: i64, channel: &str, host: &str, handle: Option<&str>) -> Monitor {
    Monitor {
        id,
        guild_id: "guild".to_string(),
        channel_id: channel.to_string(),
        message_id: handle.map(str::to_string),
        game_type: "csgo".to_string(),
        server_host: host.to_string(),
        server_port: Some(27015),
        created_at: Utc::now(),
    }
}

/// Channel-scoped message store with per-channel failure injection.
#[derive(Default)]
pub struct FakeSurface {
    pub messages: Mutex<HashMap<String, Vec<(String, MessageContent)>>>,
    pub failing_channels: Mutex<Vec<String>>,
    /// Channels whose recent-messages listing fails while everything else
    /// still works.
    pub listing_failures: Mutex<Vec<String>>,
    /// Message ids authored by someone else.
    pub foreign_ids: Mutex<Vec<String>>,
    pub creates: AtomicU64,
    pub edits: AtomicU64,
    next_id: AtomicU64,
}

impl FakeSurface {
    pub fn seed_message(&self, channel: &str, id: &str, content: MessageContent) {
        self.messages
            .lock()
            .unwrap()
            .entry(channel.to_string())
            .or_default()
            .push((id.to_string(), content));
    }

    pub fn fail_channel(&self, channel: &str) {
        self.failing_channels
            .lock()
            .unwrap()
            .push(channel.to_string());
    }

    pub fn seed_foreign_message(&self, channel: &str, id: &str, content: MessageContent) {
        self.seed_message(channel, id, content);
        self.foreign_ids.lock().unwrap().push(id.to_string());
    }

    pub fn fail_listing(&self, channel: &str) {
        self.listing_failures
            .lock()
            .unwrap()
            .push(channel.to_string());
    }

    pub fn message_count(&self, channel: &str) -> usize {
        self.messages
            .lock()
            .unwrap()
            .get(channel)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn content_of(&self, channel: &str, message_id: &str) -> Option<MessageContent> {
        self.messages
            .lock()
            .unwrap()
            .get(channel)
            .and_then(|msgs| msgs.iter().find(|(id, _)| id == message_id))
            .map(|(_, c)| c.clone())
    }

    pub fn last_content(&self, channel: &str) -> Option<MessageContent> {
        self.messages
            .lock()
            .unwrap()
            .get(channel)
            .and_then(|msgs| msgs.last().map(|(_, c)| c.clone()))
    }

    fn authored_by_self(&self, id: &str) -> bool {
        !self.foreign_ids.lock().unwrap().iter().any(|f| f == id)
    }

    fn check_channel(&self, channel: &str) -> Result<()> {
        if self
            .failing_channels
            .lock()
            .unwrap()
            .iter()
            .any(|c| c == channel)
        {
            return Err(WatchError::NotificationSurface(format!(
                "channel {channel} unavailable"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationSurface for FakeSurface {
    async fn fetch_recent_messages(&self, channel_id: &str, limit: u32) -> Result<Vec<MessageRef>> {
        self.check_channel(channel_id)?;
        if self
            .listing_failures
            .lock()
            .unwrap()
            .iter()
            .any(|c| c == channel_id)
        {
            return Err(WatchError::NotificationSurface(
                "message listing unavailable".to_string(),
            ));
        }
        let messages = self.messages.lock().unwrap();
        Ok(messages
            .get(channel_id)
            .map(|msgs| {
                msgs.iter()
                    .rev()
                    .take(limit as usize)
                    .map(|(id, _)| MessageRef {
                        id: id.clone(),
                        authored_by_self: self.authored_by_self(id),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn fetch_message(&self, channel_id: &str, message_id: &str) -> Result<MessageRef> {
        self.check_channel(channel_id)?;
        let messages = self.messages.lock().unwrap();
        messages
            .get(channel_id)
            .and_then(|msgs| msgs.iter().find(|(id, _)| id == message_id))
            .map(|(id, _)| MessageRef {
                id: id.clone(),
                authored_by_self: self.authored_by_self(id),
            })
            .ok_or_else(|| WatchError::NotificationSurface("message not found".to_string()))
    }

    async fn create_message(&self, channel_id: &str, content: &MessageContent) -> Result<String> {
        self.check_channel(channel_id)?;
        let id = format!("msg-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.messages
            .lock()
            .unwrap()
            .entry(channel_id.to_string())
            .or_default()
            .push((id.clone(), content.clone()));
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(id)
    }

    async fn edit_message(
        &self,
        channel_id: &str,
        message_id: &str,
        content: &MessageContent,
    ) -> Result<()> {
        self.check_channel(channel_id)?;
        let mut messages = self.messages.lock().unwrap();
        let slot = messages
            .get_mut(channel_id)
            .and_then(|msgs| msgs.iter_mut().find(|(id, _)| id == message_id))
            .ok_or_else(|| WatchError::NotificationSurface("message not found".to_string()))?;
        slot.1 = content.clone();
        self.edits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory monitor registry.
#[derive(Default)]
pub struct FakeRegistry {
    pub monitors: Mutex<Vec<Monitor>>,
}

impl FakeRegistry {
    pub fn with(monitors: Vec<Monitor>) -> Self {
        Self {
            monitors: Mutex::new(monitors),
        }
    }

    pub fn handle_of(&self, monitor_id: i64) -> Option<String> {
        self.monitors
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == monitor_id)
            .and_then(|m| m.message_id.clone())
    }
}

#[async_trait]
impl MonitorRegistry for FakeRegistry {
    async fn list_all(&self) -> Result<Vec<Monitor>> {
        let mut monitors = self.monitors.lock().unwrap().clone();
        monitors.sort_by_key(|m| m.created_at);
        Ok(monitors)
    }

    async fn find(&self, monitor_id: i64) -> Result<Option<Monitor>> {
        Ok(self
            .monitors
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == monitor_id)
            .cloned())
    }

    async fn insert(&self, new_monitor: NewMonitor) -> Result<Monitor> {
        let mut monitors = self.monitors.lock().unwrap();
        let id = monitors.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let inserted = Monitor {
            id,
            guild_id: new_monitor.guild_id,
            channel_id: new_monitor.channel_id,
            message_id: new_monitor.message_id,
            game_type: new_monitor.game_type,
            server_host: new_monitor.server_host,
            server_port: new_monitor.server_port,
            created_at: Utc::now(),
        };
        monitors.push(inserted.clone());
        Ok(inserted)
    }

    async fn set_message_handle(&self, monitor_id: i64, handle: &str) -> Result<()> {
        let mut monitors = self.monitors.lock().unwrap();
        if let Some(found) = monitors.iter_mut().find(|m| m.id == monitor_id) {
            found.message_id = Some(handle.to_string());
        }
        Ok(())
    }
}

/// In-memory history store with controllable timestamps.
#[derive(Default)]
pub struct FakeHistory {
    pub points: Mutex<Vec<HistoryPoint>>,
    next_id: AtomicU64,
}

impl FakeHistory {
    pub fn push_recorded_at(&self, monitor_id: i64, recorded_at: DateTime<Utc>) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        self.points.lock().unwrap().push(HistoryPoint {
            id,
            server_monitor_id: monitor_id,
            player_count: 1,
            max_players: 10,
            recorded_at,
            map_name: None,
            server_name: None,
            ping_ms: None,
        });
    }

    pub fn count(&self) -> usize {
        self.points.lock().unwrap().len()
    }
}

#[async_trait]
impl HistoryStore for FakeHistory {
    async fn record(&self, point: NewHistoryPoint) -> Result<()> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        self.points.lock().unwrap().push(HistoryPoint {
            id,
            server_monitor_id: point.server_monitor_id,
            player_count: point.player_count,
            max_players: point.max_players,
            recorded_at: Utc::now(),
            map_name: point.map_name,
            server_name: point.server_name,
            ping_ms: point.ping_ms,
        });
        Ok(())
    }

    async fn purge_older_than_days(&self, days: u32) -> Result<u64> {
        let cutoff = Utc::now() - chrono::Duration::days(days as i64);
        let mut points = self.points.lock().unwrap();
        let before = points.len();
        points.retain(|p| p.recorded_at >= cutoff);
        Ok((before - points.len()) as u64)
    }

    async fn recent_points(&self, monitor_id: i64, window_hours: u32) -> Result<Vec<HistoryPoint>> {
        let cutoff = Utc::now() - chrono::Duration::hours(window_hours as i64);
        let mut matching: Vec<HistoryPoint> = self
            .points
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.server_monitor_id == monitor_id && p.recorded_at > cutoff)
            .cloned()
            .collect();
        matching.sort_by_key(|p| p.recorded_at);
        Ok(matching)
    }
}

/// Scripted query client: per-host outcomes plus an optional artificial
/// delay for slow-tick scenarios.
#[derive(Default)]
pub struct FakeQueryClient {
    pub outcomes: Mutex<HashMap<String, std::result::Result<RawResponse, QueryFailure>>>,
    pub delay: Option<Duration>,
}

impl FakeQueryClient {
    pub fn online(&self, host: &str, current: u32, max: u32) {
        let raw = serde_json::json!({ "numplayers": current, "maxplayers": max });
        self.outcomes.lock().unwrap().insert(
            host.to_string(),
            Ok(RawResponse {
                name: Some(format!("{host} server")),
                map: Some("de_dust2".to_string()),
                ping_ms: Some(40),
                raw,
                ..Default::default()
            }),
        );
    }

    pub fn offline(&self, host: &str, failure: QueryFailure) {
        self.outcomes
            .lock()
            .unwrap()
            .insert(host.to_string(), Err(failure));
    }
}

#[async_trait]
impl RawQueryClient for FakeQueryClient {
    async fn query(&self, target: &QueryTarget) -> std::result::Result<RawResponse, QueryFailure> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcomes
            .lock()
            .unwrap()
            .get(&target.host)
            .cloned()
            .unwrap_or(Err(QueryFailure::Unreachable))
    }
}
