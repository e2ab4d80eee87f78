//! # Query Engine
//!
//! Issues a single bounded-time status query against one target and returns a
//! normalized result or a typed failure. The underlying wire protocol lives
//! behind the [`RawQueryClient`] trait; this module owns retry/timeout policy
//! and player-count extraction.

pub mod engine;
pub mod outcome;

pub use engine::{QueryEngine, QueryTarget, RawQueryClient};
pub use outcome::{PlayerEntry, QueryFailure, QueryOutcome, RawResponse, ServerSnapshot};
