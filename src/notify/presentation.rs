//! Presentation builders for the periodic status messages.
//!
//! Synchronous formatting only; every suspension point lives in the caller.

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::config::WatchConfig;
use crate::models::Monitor;
use crate::notify::surface::{ActionButton, EmbedField, MessageContent, StatusEmbed};
use crate::query::ServerSnapshot;

pub const COLOR_ONLINE: u32 = 0x2B2D31;
pub const COLOR_OFFLINE: u32 = 0xFF0000;

/// Time until the next multiple of the poll period, rounded up to whole
/// minutes, with correct plurality ("1 minute" / "3 minutes").
pub fn next_update_text(now: DateTime<Utc>, period: Duration) -> String {
    let period_ms = period.as_millis() as i64;
    let now_ms = now.timestamp_millis();
    let next_ms = now_ms.div_euclid(period_ms) * period_ms
        + if now_ms % period_ms == 0 { 0 } else { period_ms };
    let diff_minutes = (next_ms - now_ms + 59_999) / 60_000;
    let plural = if diff_minutes == 1 { "" } else { "s" };
    format!("{diff_minutes} minute{plural}")
}

/// Strip decoration and whitespace from a rendered connect field so it can
/// be compared against a plain host:port.
pub fn clean_server_address(address: &str) -> String {
    address
        .chars()
        .filter(|c| *c != '`' && *c != '🔗' && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Online status message for one target. `port` is the resolved query port
/// (stored or protocol default).
pub fn online_presentation(
    monitor: &Monitor,
    snapshot: &ServerSnapshot,
    port: u16,
    config: &WatchConfig,
    now: DateTime<Utc>,
) -> MessageContent {
    let address = format!("{}:{}", monitor.server_host, port);
    let connect = snapshot.connect.clone().unwrap_or_else(|| address.clone());
    let map = snapshot.map.clone().unwrap_or_else(|| "Unknown".to_string());

    let embed = StatusEmbed {
        title: snapshot
            .name
            .clone()
            .unwrap_or_else(|| "Game Server".to_string()),
        color: COLOR_ONLINE,
        description: None,
        fields: vec![
            EmbedField::inline("Status", "🟢 Online"),
            EmbedField::inline(
                "Players",
                format!("👥 {}/{}", snapshot.current_players, snapshot.max_players),
            ),
            EmbedField::inline("Map", format!("🗺️ {map}")),
            EmbedField::block("Connect", format!("🔗 `{connect}`")),
            EmbedField::block(
                "Next Update",
                format!("🔄 in {}", next_update_text(now, config.poll_period)),
            ),
        ],
        footer: Some("Last updated".to_string()),
        timestamp: now,
    };

    let mut buttons = vec![
        ActionButton::Roster {
            host: monitor.server_host.clone(),
            port,
            query_tag: monitor.game_type.clone(),
        },
        ActionButton::History {
            monitor_id: monitor.id,
        },
    ];
    if let Some(url) = &config.support_link {
        buttons.push(ActionButton::Link {
            label: "Support Us".to_string(),
            url: url.clone(),
        });
    }

    MessageContent { embed, buttons }
}

/// Offline status message. The roster shortcut is dropped (it would query
/// inconsistent state); the history affordance stays valid.
pub fn offline_presentation(
    monitor: &Monitor,
    address: &str,
    config: &WatchConfig,
    now: DateTime<Utc>,
) -> MessageContent {
    let embed = StatusEmbed {
        title: "Server Status".to_string(),
        color: COLOR_OFFLINE,
        description: None,
        fields: vec![
            EmbedField::inline("Status", "🔴 Offline"),
            EmbedField::inline("Server", format!("🔗 `{address}`")),
            EmbedField::block(
                "Next Update",
                format!("🔄 in {}", next_update_text(now, config.poll_period)),
            ),
        ],
        footer: Some("Last updated".to_string()),
        timestamp: now,
    };

    MessageContent {
        embed,
        buttons: vec![ActionButton::History {
            monitor_id: monitor.id,
        }],
    }
}
