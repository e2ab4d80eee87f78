//! # Data Models
//!
//! Row types and runtime-checked queries for the two tables the core owns:
//! `server_monitors` (durable targets) and `server_player_history`
//! (time-series samples, cascade-deleted with their monitor).

pub mod history;
pub mod monitor;

pub use history::{HistoryPoint, NewHistoryPoint};
pub use monitor::{Monitor, NewMonitor};
