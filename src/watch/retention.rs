//! # Retention Sweep
//!
//! Deletes history points older than the retention window on a fixed daily
//! cadence. The sweep runs on its own timer, decoupled from the polling
//! tick: a slow tick never skips retention and a slow sweep never blocks a
//! tick. Sweep failures are logged and the cadence continues.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::error::Result;
use crate::registry::HistoryStore;

const SWEEP_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// Daily history pruner.
pub struct RetentionSweeper {
    history: Arc<dyn HistoryStore>,
    retention_days: u32,
}

impl RetentionSweeper {
    pub fn new(history: Arc<dyn HistoryStore>, retention_days: u32) -> Self {
        Self {
            history,
            retention_days,
        }
    }

    /// Run forever, sweeping once per day starting one period from now.
    pub async fn run(&self) {
        let mut timer = interval_at(Instant::now() + SWEEP_PERIOD, SWEEP_PERIOD);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            timer.tick().await;
            match self.sweep_once().await {
                Ok(removed) => {
                    info!(removed, retention_days = self.retention_days, "history retention sweep complete");
                }
                Err(e) => {
                    warn!(error = %e, "history retention sweep failed");
                }
            }
        }
    }

    /// One sweep: delete everything older than the retention window.
    pub async fn sweep_once(&self) -> Result<u64> {
        self.history.purge_older_than_days(self.retention_days).await
    }
}
