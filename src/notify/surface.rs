//! Surface contract and message content types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A message known to exist in a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    pub id: String,
    /// Whether this process's identity authored the message.
    pub authored_by_self: bool,
}

/// One embed field: name/value plus inline layout hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn inline(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline: true,
        }
    }

    pub fn block(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline: false,
        }
    }
}

/// Rich status presentation, renderer-agnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEmbed {
    pub title: String,
    pub color: u32,
    pub description: Option<String>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Interactive affordances attached to a status message. The command surface
/// interpreting clicks is out of scope; the ids here are its contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionButton {
    /// Live player-roster shortcut; only valid while the target is online.
    Roster {
        host: String,
        port: u16,
        query_tag: String,
    },
    /// Player-history chart for one monitor; valid in both states.
    History { monitor_id: i64 },
    /// External support/donation link.
    Link { label: String, url: String },
}

impl ActionButton {
    /// Stable custom id the command surface dispatches on. Link buttons
    /// carry a URL instead.
    pub fn custom_id(&self) -> Option<String> {
        match self {
            ActionButton::Roster {
                host,
                port,
                query_tag,
            } => Some(format!("playerlist|{host}|{port}|{query_tag}")),
            ActionButton::History { monitor_id } => Some(format!("history|{monitor_id}")),
            ActionButton::Link { .. } => None,
        }
    }
}

/// Everything needed to create or edit one status message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageContent {
    pub embed: StatusEmbed,
    pub buttons: Vec<ActionButton>,
}

/// Channel-scoped message operations, each fallible independently.
#[async_trait]
pub trait NotificationSurface: Send + Sync {
    /// Most recent messages in a channel, newest first.
    async fn fetch_recent_messages(&self, channel_id: &str, limit: u32) -> Result<Vec<MessageRef>>;

    async fn fetch_message(&self, channel_id: &str, message_id: &str) -> Result<MessageRef>;

    /// Returns the handle of the created message.
    async fn create_message(&self, channel_id: &str, content: &MessageContent) -> Result<String>;

    async fn edit_message(
        &self,
        channel_id: &str,
        message_id: &str,
        content: &MessageContent,
    ) -> Result<()>;
}
