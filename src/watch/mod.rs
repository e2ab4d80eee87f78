//! # Watch Engine
//!
//! The scheduling-and-reconciliation core: fixed-period ticks aligned to the
//! wall clock, per-target reconciliation against the notification surface,
//! the daily retention sweep, and the setup operation that registers a new
//! target.

pub mod reconciler;
pub mod report;
pub mod retention;
pub mod scheduler;
pub mod setup;

pub use reconciler::Reconciler;
pub use report::{TargetOutcome, TargetStatus, TickReport};
pub use retention::RetentionSweeper;
pub use scheduler::MonitorScheduler;
pub use setup::{setup_monitor, SetupRequest};
