//! # Scheduler
//!
//! Drives the periodic sweep on a fixed wall-clock grid. The first aligned
//! tick fires at the next multiple of the period (14:02 start, 5-minute
//! period ⇒ 14:05), so restarts do not drift the schedule; an immediate
//! tick also runs once at startup so a restart never leaves stale state
//! visible for a full period.
//!
//! A compare-and-swap guard owned by this type enforces the no-overlap
//! invariant: a tick that would overlap a still-running one is skipped
//! entirely (not queued, not merged) and counted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{info, warn};

use crate::models::Monitor;
use crate::registry::MonitorRegistry;
use crate::watch::reconciler::Reconciler;
use crate::watch::report::TickReport;

/// Periodic driver for the full monitoring sweep.
pub struct MonitorScheduler {
    reconciler: Arc<Reconciler>,
    registry: Arc<dyn MonitorRegistry>,
    period: Duration,
    in_progress: AtomicBool,
    ticks_run: AtomicU64,
    ticks_skipped: AtomicU64,
}

impl MonitorScheduler {
    pub fn new(
        reconciler: Arc<Reconciler>,
        registry: Arc<dyn MonitorRegistry>,
        period: Duration,
    ) -> Self {
        Self {
            reconciler,
            registry,
            period,
            in_progress: AtomicBool::new(false),
            ticks_run: AtomicU64::new(0),
            ticks_skipped: AtomicU64::new(0),
        }
    }

    /// Delay from `now` to the next wall-clock multiple of `period`.
    pub fn aligned_delay(now: DateTime<Utc>, period: Duration) -> Duration {
        let period_ms = period.as_millis() as u64;
        let now_ms = now.timestamp_millis().max(0) as u64;
        Duration::from_millis(period_ms - (now_ms % period_ms))
    }

    /// Run forever: one immediate tick, then ticks on the aligned grid.
    pub async fn run(self: Arc<Self>) {
        info!(period_secs = self.period.as_secs(), "monitor scheduler starting");
        self.tick().await;

        loop {
            let delay = Self::aligned_delay(Utc::now(), self.period);
            tokio::time::sleep(delay).await;
            self.tick().await;
        }
    }

    /// Execute one sweep. Returns `None` when skipped because a previous
    /// tick is still in progress.
    pub async fn tick(&self) -> Option<TickReport> {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            self.ticks_skipped.fetch_add(1, Ordering::Relaxed);
            warn!("previous monitoring run still in progress, skipping tick");
            return None;
        }

        let report = self.sweep().await;
        self.in_progress.store(false, Ordering::Release);
        self.ticks_run.fetch_add(1, Ordering::Relaxed);

        info!(
            monitors = report.monitors,
            online = report.online,
            offline = report.offline,
            errors = report.errors,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "monitoring tick complete"
        );
        Some(report)
    }

    async fn sweep(&self) -> TickReport {
        let started = Instant::now();
        let mut report = TickReport::default();

        let monitors = match self.registry.list_all().await {
            Ok(monitors) => monitors,
            Err(e) => {
                warn!(error = %e, "could not list monitors; tick aborted");
                report.elapsed = started.elapsed();
                return report;
            }
        };

        // Channel groups run concurrently; targets within a channel stay
        // sequential so one message-list fetch serves the whole group.
        let groups = group_by_channel(monitors);
        let sweeps = groups.iter().map(|(channel_id, group)| {
            self.reconciler.reconcile_channel(channel_id, group)
        });

        for outcomes in join_all(sweeps).await {
            report.absorb(&outcomes);
        }

        report.elapsed = started.elapsed();
        report
    }

    pub fn ticks_run(&self) -> u64 {
        self.ticks_run.load(Ordering::Relaxed)
    }

    pub fn ticks_skipped(&self) -> u64 {
        self.ticks_skipped.load(Ordering::Relaxed)
    }
}

/// Group monitors by owning channel, preserving per-channel relative order
/// (and therefore the registry's creation-time fairness ordering).
pub fn group_by_channel(monitors: Vec<Monitor>) -> Vec<(String, Vec<Monitor>)> {
    let mut groups: Vec<(String, Vec<Monitor>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for monitor in monitors {
        match index.get(&monitor.channel_id) {
            Some(&i) => groups[i].1.push(monitor),
            None => {
                index.insert(monitor.channel_id.clone(), groups.len());
                groups.push((monitor.channel_id.clone(), vec![monitor]));
            }
        }
    }
    groups
}
