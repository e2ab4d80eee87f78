//! # GameWatch Core
//!
//! Scheduling and reconciliation core for game-server status monitoring.
//!
//! ## Overview
//!
//! The engine polls remote game servers on a fixed wall-clock grid,
//! reconciles one durable status message per monitored target against an
//! external notification surface, and records time-series player-count
//! history for later charting. Partial network failures are isolated per
//! target, overlapping sweeps are skipped rather than queued, and every
//! query is bounded by an explicit budget.
//!
//! ## Module Organization
//!
//! - [`config`] - explicit configuration object and query budgets
//! - [`error`] - structured error taxonomy
//! - [`protocols`] - static registry of supported game protocols
//! - [`query`] - budgeted query engine over a pluggable wire client
//! - [`models`] - monitor and history row types with runtime-checked queries
//! - [`database`] - pool construction and schema setup
//! - [`registry`] - durable-store seams consumed by the engine
//! - [`notify`] - notification-surface contract and presentation builders
//! - [`watch`] - scheduler, reconciler, retention sweep, setup operation
//! - [`handlers`] - on-demand roster and history-chart handlers
//!
//! ## Collaborators
//!
//! The notification-platform client, the interactive command surface, and
//! the chart renderer are external: this crate defines the traits it
//! consumes ([`notify::NotificationSurface`], [`query::RawQueryClient`],
//! [`handlers::ChartRenderer`]) and leaves the transports to the embedding
//! process.

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod notify;
pub mod protocols;
pub mod query;
pub mod registry;
pub mod watch;

pub use config::{QueryBudget, WatchConfig};
pub use error::{Result, WatchError};
pub use query::{QueryEngine, QueryOutcome, RawQueryClient};
pub use watch::{MonitorScheduler, Reconciler, RetentionSweeper, TickReport};
