//! # Live Player Roster
//!
//! Re-queries the target live (short budget) instead of reusing the last
//! periodic sample: roster membership is more volatile than aggregate
//! counts. Protocols known not to expose a roster short-circuit before any
//! network traffic.

use tracing::debug;

use crate::config::QueryBudget;
use crate::protocols::roster_denied;
use crate::query::{QueryEngine, QueryFailure, QueryOutcome, QueryTarget};

/// Hard cap on one formatted field at the notification surface.
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// Classified roster answer; the caller always gets one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterResponse {
    /// The protocol never exposes a roster; no query was made.
    Denied { query_tag: String },
    /// The server answered but provided no roster payload.
    Unavailable,
    /// Roster present but empty (or all names hidden).
    Empty,
    /// Too many players to render inside the surface's field limit.
    TooLong { total: usize },
    /// Formatted multi-column block ready for display.
    List { total: usize, block: String },
    /// The live query failed.
    Offline { failure: QueryFailure },
}

/// Answers on-demand roster requests.
pub struct RosterHandler {
    engine: QueryEngine,
    budget: QueryBudget,
}

impl RosterHandler {
    pub fn new(engine: QueryEngine, budget: QueryBudget) -> Self {
        Self { engine, budget }
    }

    pub async fn respond(&self, query_tag: &str, host: &str, port: u16) -> RosterResponse {
        if roster_denied(query_tag) {
            return RosterResponse::Denied {
                query_tag: query_tag.to_string(),
            };
        }

        let target = QueryTarget {
            query_tag: query_tag.to_string(),
            host: host.to_string(),
            port,
        };

        let snapshot = match self.engine.query(&target, self.budget).await {
            QueryOutcome::Online(snapshot) => snapshot,
            QueryOutcome::Offline(failure) => {
                debug!(target = %target.address(), failure = %failure, "roster query failed");
                return RosterResponse::Offline { failure };
            }
        };

        let Some(names) = snapshot.players else {
            return RosterResponse::Unavailable;
        };
        if names.is_empty() {
            return RosterResponse::Empty;
        }

        let total = names.len();
        let Some(block) = format_roster(&names) else {
            return RosterResponse::Empty;
        };
        if block.len() > FIELD_VALUE_LIMIT {
            return RosterResponse::TooLong { total };
        }

        RosterResponse::List { total, block }
    }
}

/// Format player names into a fixed-width multi-column grid.
///
/// Column width is the longest name plus two, clamped to 14..=18; column
/// count is what fits in a 50-character line, capped at 4; row count keeps
/// the whole block near the surface's budget. Overflow is cut with an
/// explicit "N more" suffix. Returns `None` when no usable names remain.
pub fn format_roster(names: &[String]) -> Option<String> {
    let mut sorted: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|n| !n.is_empty())
        .collect();
    sorted.sort_unstable();

    if sorted.is_empty() {
        return None;
    }

    let longest = sorted.iter().map(|n| n.chars().count()).max().unwrap_or(0);
    let max_name_len = longest.clamp(12, 16);
    let column_width = max_name_len + 2;

    let columns = (50 / column_width).min(4).max(1);
    let max_rows = 1200 / (column_width * columns);
    let capacity = max_rows * columns;

    let truncated = sorted.len() > capacity;
    let visible = if truncated { &sorted[..capacity] } else { &sorted[..] };

    let rows = visible.len().div_ceil(columns);
    let mut grid = vec![vec![String::new(); columns]; rows];
    for (i, name) in visible.iter().enumerate() {
        let cell = if name.chars().count() > max_name_len {
            let mut cut: String = name.chars().take(max_name_len - 1).collect();
            cut.push('…');
            cut
        } else {
            (*name).to_string()
        };
        grid[i / columns][i % columns] = format!("{cell:<column_width$}");
    }

    let mut output = grid
        .iter()
        .map(|row| row.concat().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n");

    if truncated {
        let remaining = sorted.len() - capacity;
        output.push_str(&format!("\n\n... and {remaining} more players"));
    }

    Some(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn three_short_names_fit_one_row() {
        let block = format_roster(&names(&["alice", "bob", "carol"])).unwrap();
        // Short names clamp to a 14-wide column, 3 columns: one row.
        assert_eq!(block.lines().count(), 1);
        assert!(block.starts_with("alice"));
        assert!(!block.contains("more players"));
    }

    #[test]
    fn long_rosters_truncate_with_the_remaining_count() {
        let many: Vec<String> = (0..200).map(|i| format!("player{i:03}")).collect();
        let block = format_roster(&many).unwrap();
        // width 14, 3 columns, 28 rows: 84 names visible, 116 remain.
        assert!(block.contains("... and 116 more players"));
    }

    #[test]
    fn names_longer_than_the_column_are_cut_with_an_ellipsis() {
        let block = format_roster(&names(&["averyveryverylongplayername", "bob"])).unwrap();
        assert!(block.contains('…'));
        assert!(!block.contains("averyveryverylongplayername"));
    }

    #[test]
    fn empty_and_nameless_rosters_yield_nothing() {
        assert_eq!(format_roster(&[]), None);
        assert_eq!(format_roster(&names(&["", ""])), None);
    }

    #[tokio::test]
    async fn oversized_blocks_become_a_too_long_response() {
        use crate::query::{PlayerEntry, RawQueryClient, RawResponse};
        use async_trait::async_trait;
        use std::sync::Arc;
        use std::time::Duration;

        struct CrowdedClient;

        #[async_trait]
        impl RawQueryClient for CrowdedClient {
            async fn query(&self, _t: &QueryTarget) -> Result<RawResponse, QueryFailure> {
                let players = (0..200)
                    .map(|i| PlayerEntry {
                        name: Some(format!("player{i:03}")),
                    })
                    .collect();
                Ok(RawResponse {
                    players: Some(players),
                    ..Default::default()
                })
            }
        }

        let handler = RosterHandler::new(
            QueryEngine::new(Arc::new(CrowdedClient)),
            QueryBudget::new(1, Duration::from_millis(100)),
        );
        // 200 names at width 14 render well past the field limit.
        let response = handler.respond("csgo", "play.example.org", 27015).await;
        assert_eq!(response, RosterResponse::TooLong { total: 200 });
    }

    #[tokio::test]
    async fn denylisted_protocols_short_circuit_without_querying() {
        use crate::query::{RawQueryClient, RawResponse};
        use async_trait::async_trait;
        use std::sync::Arc;
        use std::time::Duration;

        struct PanickingClient;

        #[async_trait]
        impl RawQueryClient for PanickingClient {
            async fn query(&self, _t: &QueryTarget) -> Result<RawResponse, QueryFailure> {
                panic!("denylisted roster request must not reach the network");
            }
        }

        let handler = RosterHandler::new(
            QueryEngine::new(Arc::new(PanickingClient)),
            QueryBudget::new(1, Duration::from_millis(10)),
        );
        let response = handler.respond("minecraft", "play.example.org", 25565).await;
        assert_eq!(
            response,
            RosterResponse::Denied {
                query_tag: "minecraft".to_string()
            }
        );
    }
}
