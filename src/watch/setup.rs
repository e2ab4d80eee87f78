//! # Setup Operation
//!
//! Registers a new monitored target: validates the request, performs the
//! first query with the setup budget, posts the first status message, and
//! inserts the monitor with its handle already set. Store failures here are
//! fatal to this one setup operation only.

use std::sync::Arc;
use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;
use tracing::info;

use crate::config::WatchConfig;
use crate::error::{Result, WatchError};
use crate::models::{Monitor, NewMonitor};
use crate::notify::{online_presentation, NotificationSurface};
use crate::protocols::protocol_by_id;
use crate::query::{QueryEngine, QueryFailure, QueryOutcome, QueryTarget};
use crate::registry::MonitorRegistry;

/// A request to start monitoring one target.
#[derive(Debug, Clone)]
pub struct SetupRequest {
    /// Operator-facing protocol id (e.g. `gs1`).
    pub protocol_id: String,
    pub host: String,
    /// Explicit port; the protocol default is used when absent.
    pub port: Option<u16>,
    pub guild_id: String,
    pub channel_id: String,
}

static HOSTNAME_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Valid domain name or dotted-quad IPv4.
pub fn is_valid_hostname(host: &str) -> bool {
    let pattern = HOSTNAME_PATTERN.get_or_init(|| {
        Regex::new(
            r"^(([a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9\-]*[a-zA-Z0-9])\.)*([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9])$|^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$",
        )
        .expect("hostname pattern is valid")
    });
    pattern.is_match(host)
}

impl From<QueryFailure> for WatchError {
    fn from(failure: QueryFailure) -> Self {
        match failure {
            QueryFailure::Timeout => WatchError::Timeout,
            QueryFailure::ConnectionRefused => WatchError::ConnectionRefused,
            QueryFailure::Unreachable => WatchError::Unreachable,
            QueryFailure::ProtocolUnsupported => {
                WatchError::ProtocolUnsupported("query client".to_string())
            }
            QueryFailure::Unknown(msg) => WatchError::Unknown(msg),
        }
    }
}

/// Register a new monitor: first query, first post, then insert.
pub async fn setup_monitor(
    request: SetupRequest,
    engine: &QueryEngine,
    surface: Arc<dyn NotificationSurface>,
    registry: Arc<dyn MonitorRegistry>,
    config: &WatchConfig,
) -> Result<Monitor> {
    let protocol = protocol_by_id(&request.protocol_id)
        .ok_or_else(|| WatchError::ProtocolUnsupported(request.protocol_id.clone()))?;

    if !is_valid_hostname(&request.host) {
        return Err(WatchError::Configuration(format!(
            "invalid hostname: {}",
            request.host
        )));
    }

    let port = request.port.unwrap_or(protocol.default_port);
    let target = QueryTarget {
        query_tag: protocol.query_tag.to_string(),
        host: request.host.clone(),
        port,
    };

    // The target must answer once before we commit to monitoring it.
    let snapshot = match engine.query(&target, config.setup_budget).await {
        QueryOutcome::Online(snapshot) => snapshot,
        QueryOutcome::Offline(failure) => return Err(failure.into()),
    };

    // The first post goes out before the insert, so the monitor row is
    // born with its handle already set. Buttons need the monitor id; the
    // first message carries none and the first tick adds them.
    let provisional = Monitor {
        id: 0,
        guild_id: request.guild_id.clone(),
        channel_id: request.channel_id.clone(),
        message_id: None,
        game_type: protocol.query_tag.to_string(),
        server_host: request.host.clone(),
        server_port: Some(port as i32),
        created_at: Utc::now(),
    };
    let mut content = online_presentation(&provisional, &snapshot, port, config, Utc::now());
    content.buttons.clear();

    let handle = surface.create_message(&request.channel_id, &content).await?;

    let monitor = registry
        .insert(NewMonitor {
            guild_id: request.guild_id,
            channel_id: request.channel_id,
            message_id: Some(handle),
            game_type: protocol.query_tag.to_string(),
            server_host: request.host,
            server_port: Some(port as i32),
        })
        .await?;

    info!(
        monitor_id = monitor.id,
        target = %monitor.server_host,
        protocol = protocol.query_tag,
        "monitor registered"
    );
    Ok(monitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_domains_and_ipv4() {
        assert!(is_valid_hostname("play.example.org"));
        assert!(is_valid_hostname("example"));
        assert!(is_valid_hostname("192.168.1.10"));
    }

    #[test]
    fn rejects_decorated_or_empty_hosts() {
        assert!(!is_valid_hostname("play.example.org:27015"));
        assert!(!is_valid_hostname("-bad.example.org"));
        assert!(!is_valid_hostname(""));
        assert!(!is_valid_hostname("host with spaces"));
    }
}
