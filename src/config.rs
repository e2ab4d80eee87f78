//! # Configuration
//!
//! Explicit configuration object passed into the scheduler, reconciler, and
//! handlers at construction. Nothing reads ambient environment at call
//! sites; the support link in particular lives here.

use crate::error::{Result, WatchError};
use std::time::Duration;

/// Top-level configuration for the monitoring core.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// PostgreSQL connection string for the monitor/history store.
    pub database_url: String,
    /// Fixed polling period; ticks are phase-aligned to multiples of this.
    pub poll_period: Duration,
    /// Days of player history kept by the daily retention sweep.
    pub retention_days: u32,
    /// Lookback window for on-demand history charts.
    pub history_window_hours: u32,
    /// How many recent channel messages one reconciliation pass may fetch.
    pub message_fetch_limit: u32,
    /// Query budget for the periodic sweep (background work, laxer).
    pub periodic_budget: QueryBudget,
    /// Query budget for on-demand handlers (a user is waiting).
    pub on_demand_budget: QueryBudget,
    /// Query budget for the initial setup probe.
    pub setup_budget: QueryBudget,
    /// Optional support/donation link rendered as a link button.
    pub support_link: Option<String>,
}

/// Bounds one logical query: total attempts and per-attempt wall-clock cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryBudget {
    /// Total attempts, including the first (never zero).
    pub attempts: u32,
    /// Wall-clock cap per attempt; the engine stops waiting when it fires.
    pub attempt_timeout: Duration,
}

impl QueryBudget {
    pub const fn new(attempts: u32, attempt_timeout: Duration) -> Self {
        Self {
            attempts: if attempts == 0 { 1 } else { attempts },
            attempt_timeout,
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            database_url: "postgresql://localhost/gamewatch_development".to_string(),
            poll_period: Duration::from_secs(300),
            retention_days: 30,
            history_window_hours: 24,
            message_fetch_limit: 50,
            // Background work tolerates a slower answer than a waiting user.
            periodic_budget: QueryBudget::new(2, Duration::from_secs(10)),
            on_demand_budget: QueryBudget::new(2, Duration::from_secs(5)),
            setup_budget: QueryBudget::new(3, Duration::from_secs(10)),
            support_link: None,
        }
    }
}

impl WatchConfig {
    /// Build a configuration from environment variables, falling back to
    /// defaults. Invalid numeric values are rejected rather than ignored.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(db_url) = std::env::var("DATABASE_URL") {
            config.database_url = db_url;
        }

        if let Ok(period) = std::env::var("GAMEWATCH_POLL_PERIOD_SECS") {
            let secs: u64 = period.parse().map_err(|e| {
                WatchError::Configuration(format!("invalid poll period: {e}"))
            })?;
            if secs == 0 {
                return Err(WatchError::Configuration(
                    "poll period must be at least one second".to_string(),
                ));
            }
            config.poll_period = Duration::from_secs(secs);
        }

        if let Ok(days) = std::env::var("GAMEWATCH_RETENTION_DAYS") {
            config.retention_days = days.parse().map_err(|e| {
                WatchError::Configuration(format!("invalid retention days: {e}"))
            })?;
        }

        if let Ok(limit) = std::env::var("GAMEWATCH_MESSAGE_FETCH_LIMIT") {
            config.message_fetch_limit = limit.parse().map_err(|e| {
                WatchError::Configuration(format!("invalid message fetch limit: {e}"))
            })?;
        }

        if let Ok(link) = std::env::var("GAMEWATCH_SUPPORT_LINK") {
            if !link.is_empty() {
                config.support_link = Some(link);
            }
        }

        Ok(config)
    }
}
