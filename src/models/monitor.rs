//! # Monitor Model
//!
//! A durable monitored target: one (protocol, host, port, channel) tuple plus
//! the handle of its status message on the notification surface. The handle
//! is absent until the first successful post and is rewritten whenever the
//! referenced message has to be recreated.
//!
//! Maps to the `server_monitors` table. Identity is a BIGSERIAL key; the
//! tuple itself need not be unique.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// A monitored target as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Monitor {
    pub id: i64,
    pub guild_id: String,
    pub channel_id: String,
    /// Notification-message handle; `None` until the first successful post.
    pub message_id: Option<String>,
    pub game_type: String,
    pub server_host: String,
    pub server_port: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Monitor fields for creation (without generated columns).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMonitor {
    pub guild_id: String,
    pub channel_id: String,
    pub message_id: Option<String>,
    pub game_type: String,
    pub server_host: String,
    pub server_port: Option<i32>,
}

impl Monitor {
    /// Insert a new monitor and return the stored row.
    pub async fn create(pool: &PgPool, new_monitor: NewMonitor) -> Result<Monitor, sqlx::Error> {
        sqlx::query_as::<_, Monitor>(
            r#"
            INSERT INTO server_monitors
                (guild_id, channel_id, message_id, game_type, server_host, server_port)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, guild_id, channel_id, message_id, game_type,
                      server_host, server_port, created_at
            "#,
        )
        .bind(new_monitor.guild_id)
        .bind(new_monitor.channel_id)
        .bind(new_monitor.message_id)
        .bind(new_monitor.game_type)
        .bind(new_monitor.server_host)
        .bind(new_monitor.server_port)
        .fetch_one(pool)
        .await
    }

    /// All monitors, oldest first. The ordering is a fairness policy:
    /// long-registered targets are consistently processed before newer ones.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Monitor>, sqlx::Error> {
        sqlx::query_as::<_, Monitor>(
            r#"
            SELECT id, guild_id, channel_id, message_id, game_type,
                   server_host, server_port, created_at
            FROM server_monitors
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Monitor>, sqlx::Error> {
        sqlx::query_as::<_, Monitor>(
            r#"
            SELECT id, guild_id, channel_id, message_id, game_type,
                   server_host, server_port, created_at
            FROM server_monitors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Idempotent upsert of the status-message handle. Called after every
    /// successful create/recreate, never after an edit-in-place.
    pub async fn update_message_handle(
        pool: &PgPool,
        id: i64,
        message_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE server_monitors SET message_id = $1 WHERE id = $2")
            .bind(message_id)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// The address rendered in presentations and connect fields.
    pub fn address(&self, default_port: u16) -> String {
        let port = self
            .server_port
            .map(|p| p as u16)
            .unwrap_or(default_port);
        format!("{}:{}", self.server_host, port)
    }
}
