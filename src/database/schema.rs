//! Idempotent schema setup.
//!
//! Both tables are created inside one transaction so a partially applied
//! schema never becomes visible. Steady-state operations elsewhere are
//! single-statement.

use sqlx::PgPool;
use tracing::info;

use crate::error::Result;

const CREATE_MONITORS: &str = r#"
CREATE TABLE IF NOT EXISTS server_monitors (
    id BIGSERIAL PRIMARY KEY,
    guild_id TEXT NOT NULL,
    channel_id TEXT NOT NULL,
    message_id TEXT,
    game_type TEXT NOT NULL,
    server_host TEXT NOT NULL,
    server_port INTEGER,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_HISTORY: &str = r#"
CREATE TABLE IF NOT EXISTS server_player_history (
    id BIGSERIAL PRIMARY KEY,
    server_monitor_id BIGINT REFERENCES server_monitors(id) ON DELETE CASCADE,
    player_count INTEGER NOT NULL,
    max_players INTEGER NOT NULL,
    recorded_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    map_name TEXT,
    server_name TEXT,
    ping_ms INTEGER
)
"#;

const CREATE_HISTORY_INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_player_history_recorded_at
    ON server_player_history(recorded_at);
CREATE INDEX IF NOT EXISTS idx_player_history_monitor
    ON server_player_history(server_monitor_id)
"#;

/// Create both tables and their indexes if they do not exist.
pub async fn initialize_schema(pool: &PgPool) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::raw_sql(CREATE_MONITORS).execute(&mut *tx).await?;
    sqlx::raw_sql(CREATE_HISTORY).execute(&mut *tx).await?;
    sqlx::raw_sql(CREATE_HISTORY_INDEXES).execute(&mut *tx).await?;

    tx.commit().await?;
    info!("database schema initialized");
    Ok(())
}
