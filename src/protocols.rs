//! # Protocol Registry
//!
//! Static table of supported game protocols. Each entry carries the short id
//! operators type into setup, the query tag handed to the query client, and a
//! default port used when none is given.

/// One supported game protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameProtocol {
    /// Short operator-facing id (e.g. `gs1`).
    pub id: &'static str,
    /// Display name shown in presentations.
    pub name: &'static str,
    /// Tag understood by the query client.
    pub query_tag: &'static str,
    /// Port used when the monitor has none stored.
    pub default_port: u16,
    /// Whether the protocol exposes a usable player roster.
    pub has_roster: bool,
}

/// Query tag of the block-based survival/creative game whose player counts
/// live inside a nested vendor payload.
pub const BLOCK_GAME_TAG: &str = "minecraft";

/// Protocols known not to expose a player roster; the roster handler
/// short-circuits on these before querying.
pub const ROSTER_DENYLIST: &[&str] = &["protocol-v2", "teamspeak2", "teamspeak3", BLOCK_GAME_TAG];

pub const PROTOCOLS: &[GameProtocol] = &[
    GameProtocol {
        id: "gs1",
        name: "Minecraft",
        query_tag: "minecraft",
        default_port: 25565,
        has_roster: false,
    },
    GameProtocol {
        id: "gs2",
        name: "Counter-Strike 2",
        query_tag: "csgo",
        default_port: 27015,
        has_roster: true,
    },
    GameProtocol {
        id: "gs3",
        name: "Team Fortress 2",
        query_tag: "tf2",
        default_port: 27015,
        has_roster: true,
    },
    GameProtocol {
        id: "gs4",
        name: "Rust",
        query_tag: "rust",
        default_port: 28015,
        has_roster: true,
    },
];

/// Look up a protocol by its operator-facing id.
pub fn protocol_by_id(id: &str) -> Option<&'static GameProtocol> {
    PROTOCOLS.iter().find(|p| p.id == id)
}

/// Look up a protocol by the tag handed to the query client.
pub fn protocol_by_tag(tag: &str) -> Option<&'static GameProtocol> {
    PROTOCOLS.iter().find(|p| p.query_tag == tag)
}

/// Whether a query tag is on the roster denylist.
pub fn roster_denied(tag: &str) -> bool {
    ROSTER_DENYLIST.contains(&tag)
}
