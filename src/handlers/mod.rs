//! # On-Demand Handlers
//!
//! Ad-hoc requests answered outside the periodic tick: the live player
//! roster and the player-history chart. Handlers run fully independently of
//! the scheduler and always return a classified response.

pub mod history;
pub mod roster;

pub use history::{ChartRenderer, ChartResponse, HistoryChartHandler};
pub use roster::{format_roster, RosterHandler, RosterResponse};
