//! Query result types and player-count extraction.
//!
//! The raw payload shape follows the query library's response: well-known
//! fields at the top level plus a vendor-specific `raw` blob. Player-count
//! extraction precedence is load-bearing and preserved exactly:
//! nested vendor field (block game) → flat `numplayers` → roster length.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocols::BLOCK_GAME_TAG;

/// One roster entry as reported by the query library.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub name: Option<String>,
}

/// Raw, un-normalized response from the query client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawResponse {
    pub name: Option<String>,
    pub map: Option<String>,
    /// Flat legacy max-players field.
    pub maxplayers: Option<u32>,
    /// Roster as reported; `None` when the protocol exposes no roster at all.
    pub players: Option<Vec<PlayerEntry>>,
    pub connect: Option<String>,
    pub ping_ms: Option<u32>,
    /// Vendor-specific payload; nested counts for the block game live here.
    #[serde(default)]
    pub raw: Value,
}

impl RawResponse {
    /// Extract (current, max) player counts for the given protocol tag.
    ///
    /// Block game: `raw.vanilla.raw.players.{online,max}`, defaulting to 0.
    /// Everything else: `raw.numplayers` before roster length for current,
    /// `raw.maxplayers` before the flat field for max. The raw numeric field
    /// wins even when it disagrees with the roster length.
    pub fn player_counts(&self, query_tag: &str) -> (u32, u32) {
        if query_tag == BLOCK_GAME_TAG {
            let nested = self
                .raw
                .pointer("/vanilla/raw/players")
                .unwrap_or(&Value::Null);
            let current = nested.get("online").and_then(Value::as_u64).unwrap_or(0);
            let max = nested.get("max").and_then(Value::as_u64).unwrap_or(0);
            return (current as u32, max as u32);
        }

        let current = self
            .raw
            .get("numplayers")
            .and_then(Value::as_u64)
            .map(|n| n as u32)
            .or_else(|| self.players.as_ref().map(|p| p.len() as u32))
            .unwrap_or(0);

        let max = self
            .raw
            .get("maxplayers")
            .and_then(Value::as_u64)
            .map(|n| n as u32)
            .or(self.maxplayers)
            .unwrap_or(0);

        (current, max)
    }
}

/// Normalized successful query result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSnapshot {
    pub name: Option<String>,
    pub map: Option<String>,
    pub current_players: u32,
    pub max_players: u32,
    pub connect: Option<String>,
    pub ping_ms: Option<u32>,
    /// Roster names; `None` when the payload exposed no roster.
    pub players: Option<Vec<String>>,
}

impl ServerSnapshot {
    /// Normalize a raw response for the given protocol tag.
    pub fn from_raw(raw: RawResponse, query_tag: &str) -> Self {
        let (current_players, max_players) = raw.player_counts(query_tag);
        let players = raw
            .players
            .map(|entries| entries.into_iter().filter_map(|p| p.name).collect());

        Self {
            name: raw.name,
            map: raw.map,
            current_players,
            max_players,
            connect: raw.connect,
            ping_ms: raw.ping_ms,
            players,
        }
    }
}

/// Classified query failure; rendered to operators, never surfaced raw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryFailure {
    Timeout,
    ConnectionRefused,
    Unreachable,
    ProtocolUnsupported,
    Unknown(String),
}

impl QueryFailure {
    /// Human-readable explanation shown to operators during setup.
    pub fn user_message(&self) -> String {
        match self {
            QueryFailure::Timeout => {
                "Connection timed out. The server might be offline or blocking queries.".to_string()
            }
            QueryFailure::ConnectionRefused => {
                "Connection refused. Please verify the server is running and the port is correct."
                    .to_string()
            }
            QueryFailure::Unreachable => {
                "Invalid domain name. Please check the server address and try again.".to_string()
            }
            QueryFailure::ProtocolUnsupported => {
                "This game type is not supported by the query engine.".to_string()
            }
            QueryFailure::Unknown(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryFailure::Timeout => write!(f, "timeout"),
            QueryFailure::ConnectionRefused => write!(f, "connection refused"),
            QueryFailure::Unreachable => write!(f, "unreachable"),
            QueryFailure::ProtocolUnsupported => write!(f, "protocol unsupported"),
            QueryFailure::Unknown(msg) => write!(f, "unknown: {msg}"),
        }
    }
}

/// Outcome of one bounded query. Exactly one of the two, never both.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    Online(ServerSnapshot),
    Offline(QueryFailure),
}

impl QueryOutcome {
    pub fn is_online(&self) -> bool {
        matches!(self, QueryOutcome::Online(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_with(raw: Value) -> RawResponse {
        RawResponse {
            raw,
            ..Default::default()
        }
    }

    #[test]
    fn flat_numplayers_field_wins() {
        let mut response = raw_with(json!({ "numplayers": 5, "maxplayers": 32 }));
        // A disagreeing roster must not override the raw numeric field.
        response.players = Some(vec![PlayerEntry::default(); 3]);
        assert_eq!(response.player_counts("csgo"), (5, 32));
    }

    #[test]
    fn roster_length_is_the_fallback() {
        let mut response = raw_with(json!({}));
        response.players = Some(vec![PlayerEntry::default(); 5]);
        response.maxplayers = Some(16);
        assert_eq!(response.player_counts("tf2"), (5, 16));
    }

    #[test]
    fn block_game_reads_the_nested_vendor_payload() {
        let mut response = raw_with(json!({
            "numplayers": 3,
            "vanilla": { "raw": { "players": { "online": 7, "max": 20 } } }
        }));
        response.players = Some(vec![PlayerEntry::default(); 1]);
        assert_eq!(response.player_counts("minecraft"), (7, 20));
    }

    #[test]
    fn block_game_defaults_to_zero_without_vendor_payload() {
        let response = raw_with(json!({ "numplayers": 9 }));
        assert_eq!(response.player_counts("minecraft"), (0, 0));
    }

    #[test]
    fn missing_everything_yields_zero() {
        let response = raw_with(Value::Null);
        assert_eq!(response.player_counts("csgo"), (0, 0));
    }

    #[test]
    fn snapshot_keeps_roster_names_and_drops_unnamed_entries() {
        let mut response = raw_with(json!({}));
        response.players = Some(vec![
            PlayerEntry {
                name: Some("alice".to_string()),
            },
            PlayerEntry { name: None },
        ]);
        let snapshot = ServerSnapshot::from_raw(response, "csgo");
        assert_eq!(snapshot.players, Some(vec!["alice".to_string()]));
        assert_eq!(snapshot.current_players, 2);
    }
}
