//! # Database Layer
//!
//! Pool construction and idempotent schema setup for the two owned tables.

pub mod connection;
pub mod schema;

pub use connection::connect_pool;
pub use schema::initialize_schema;
