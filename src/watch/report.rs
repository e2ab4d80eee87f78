//! Per-tick observability types.
//!
//! Each target's fate is threaded through the reconciler as an explicit
//! outcome value and aggregated here, instead of vanishing into nested
//! error handlers.

use std::time::Duration;

/// How one target fared within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetStatus {
    /// Query succeeded; online message created or edited.
    Online,
    /// Query failed; offline message created or edited.
    Offline,
    /// Reconciliation itself failed (surface or store error); the target
    /// will be retried next tick.
    Error,
}

/// One target's outcome.
#[derive(Debug, Clone)]
pub struct TargetOutcome {
    pub monitor_id: i64,
    pub status: TargetStatus,
    /// Present only for `Error`.
    pub detail: Option<String>,
}

/// Aggregated result of one full sweep.
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub monitors: usize,
    pub online: usize,
    pub offline: usize,
    pub errors: usize,
    pub elapsed: Duration,
}

impl TickReport {
    pub fn absorb(&mut self, outcomes: &[TargetOutcome]) {
        for outcome in outcomes {
            self.monitors += 1;
            match outcome.status {
                TargetStatus::Online => self.online += 1,
                TargetStatus::Offline => self.offline += 1,
                TargetStatus::Error => self.errors += 1,
            }
        }
    }
}
