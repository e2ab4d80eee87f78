//! # Registry Seams
//!
//! The durable-store contracts the scheduler, reconciler, and handlers
//! consume. The PostgreSQL implementations delegate to the model layer;
//! tests substitute in-memory fakes. Both stores must tolerate concurrent
//! callers from different channel groups within one tick.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{Result, WatchError};
use crate::models::{HistoryPoint, Monitor, NewHistoryPoint, NewMonitor};

/// Durable list of monitored targets and their message handles.
#[async_trait]
pub trait MonitorRegistry: Send + Sync {
    /// All monitors ordered by creation time ascending.
    async fn list_all(&self) -> Result<Vec<Monitor>>;

    async fn find(&self, monitor_id: i64) -> Result<Option<Monitor>>;

    async fn insert(&self, new_monitor: NewMonitor) -> Result<Monitor>;

    /// Persist the handle after a successful create/recreate of the status
    /// message. Never called after an edit-in-place.
    async fn set_message_handle(&self, monitor_id: i64, handle: &str) -> Result<()>;
}

/// Time-series store for player-count samples.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn record(&self, point: NewHistoryPoint) -> Result<()>;

    /// Delete points older than the retention window; returns rows removed.
    async fn purge_older_than_days(&self, days: u32) -> Result<u64>;

    /// Ascending samples for one monitor inside the lookback window.
    async fn recent_points(&self, monitor_id: i64, window_hours: u32) -> Result<Vec<HistoryPoint>>;
}

/// PostgreSQL-backed monitor registry.
#[derive(Clone)]
pub struct PgMonitorRegistry {
    pool: PgPool,
}

impl PgMonitorRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MonitorRegistry for PgMonitorRegistry {
    async fn list_all(&self) -> Result<Vec<Monitor>> {
        Monitor::list_all(&self.pool).await.map_err(WatchError::from)
    }

    async fn find(&self, monitor_id: i64) -> Result<Option<Monitor>> {
        Monitor::find_by_id(&self.pool, monitor_id)
            .await
            .map_err(WatchError::from)
    }

    async fn insert(&self, new_monitor: NewMonitor) -> Result<Monitor> {
        Monitor::create(&self.pool, new_monitor)
            .await
            .map_err(WatchError::from)
    }

    async fn set_message_handle(&self, monitor_id: i64, handle: &str) -> Result<()> {
        Monitor::update_message_handle(&self.pool, monitor_id, handle)
            .await
            .map_err(WatchError::from)
    }
}

/// PostgreSQL-backed history store.
#[derive(Clone)]
pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn record(&self, point: NewHistoryPoint) -> Result<()> {
        HistoryPoint::create(&self.pool, point)
            .await
            .map_err(WatchError::from)
    }

    async fn purge_older_than_days(&self, days: u32) -> Result<u64> {
        HistoryPoint::delete_older_than_days(&self.pool, days)
            .await
            .map_err(WatchError::from)
    }

    async fn recent_points(&self, monitor_id: i64, window_hours: u32) -> Result<Vec<HistoryPoint>> {
        HistoryPoint::recent_for_monitor(&self.pool, monitor_id, window_hours)
            .await
            .map_err(WatchError::from)
    }
}
