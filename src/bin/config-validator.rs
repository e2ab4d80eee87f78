//! # Configuration Validator
//!
//! Small operational tool: loads the watch configuration from the
//! environment, checks the protocol registry for internal consistency, and
//! prints the effective settings. Exits non-zero on any problem so it can
//! gate deploys.

use anyhow::{bail, Context};
use gamewatch_core::config::WatchConfig;
use gamewatch_core::logging::init_logging;
use gamewatch_core::protocols::PROTOCOLS;
use std::collections::HashSet;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = WatchConfig::from_env().context("loading configuration from environment")?;

    let mut seen = HashSet::new();
    for protocol in PROTOCOLS {
        if !seen.insert(protocol.id) {
            bail!("duplicate protocol id in registry: {}", protocol.id);
        }
        if protocol.default_port == 0 {
            bail!("protocol {} has no default port", protocol.id);
        }
    }

    info!(
        poll_period_secs = config.poll_period.as_secs(),
        retention_days = config.retention_days,
        history_window_hours = config.history_window_hours,
        message_fetch_limit = config.message_fetch_limit,
        protocols = PROTOCOLS.len(),
        support_link = config.support_link.is_some(),
        "configuration OK"
    );

    println!("configuration OK ({} protocols registered)", PROTOCOLS.len());
    Ok(())
}
