//! # History Model
//!
//! One row per successful periodic query: player counts plus optional map,
//! display name, and latency. Rows age out through the daily retention
//! sweep and cascade-delete with their monitor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// One observed sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HistoryPoint {
    pub id: i64,
    pub server_monitor_id: i64,
    pub player_count: i32,
    pub max_players: i32,
    pub recorded_at: DateTime<Utc>,
    pub map_name: Option<String>,
    pub server_name: Option<String>,
    pub ping_ms: Option<i32>,
}

/// Sample fields for insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHistoryPoint {
    pub server_monitor_id: i64,
    pub player_count: i32,
    pub max_players: i32,
    pub map_name: Option<String>,
    pub server_name: Option<String>,
    pub ping_ms: Option<i32>,
}

impl HistoryPoint {
    pub async fn create(pool: &PgPool, point: NewHistoryPoint) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO server_player_history
                (server_monitor_id, player_count, max_players, map_name, server_name, ping_ms)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(point.server_monitor_id)
        .bind(point.player_count)
        .bind(point.max_players)
        .bind(point.map_name)
        .bind(point.server_name)
        .bind(point.ping_ms)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete all points older than the retention window. Returns the number
    /// of rows removed.
    pub async fn delete_older_than_days(pool: &PgPool, days: u32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM server_player_history WHERE recorded_at < NOW() - ($1 * INTERVAL '1 day')",
        )
        .bind(days as i32)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Points for one monitor inside the lookback window, oldest first,
    /// which is the shape the chart renderer expects.
    pub async fn recent_for_monitor(
        pool: &PgPool,
        monitor_id: i64,
        window_hours: u32,
    ) -> Result<Vec<HistoryPoint>, sqlx::Error> {
        sqlx::query_as::<_, HistoryPoint>(
            r#"
            SELECT id, server_monitor_id, player_count, max_players,
                   recorded_at, map_name, server_name, ping_ms
            FROM server_player_history
            WHERE server_monitor_id = $1
              AND recorded_at > NOW() - ($2 * INTERVAL '1 hour')
            ORDER BY recorded_at ASC
            "#,
        )
        .bind(monitor_id)
        .bind(window_hours as i32)
        .fetch_all(pool)
        .await
    }
}
