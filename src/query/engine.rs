//! Budgeted query execution.
//!
//! Each attempt races the underlying client against an independent timer; a
//! fired timer means the engine stops waiting, whatever the client would
//! eventually have returned. Retries stay inside the caller's budget.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::QueryBudget;
use crate::query::outcome::{QueryFailure, QueryOutcome, RawResponse, ServerSnapshot};

/// One (protocol, host, port) tuple to query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTarget {
    pub query_tag: String,
    pub host: String,
    pub port: u16,
}

impl QueryTarget {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Pluggable wire-protocol client. Implementations perform exactly one query
/// attempt; retry and timeout policy belong to the engine.
#[async_trait]
pub trait RawQueryClient: Send + Sync {
    async fn query(&self, target: &QueryTarget) -> Result<RawResponse, QueryFailure>;
}

/// Executes bounded queries against one target at a time. Pure with respect
/// to everything but the network target.
#[derive(Clone)]
pub struct QueryEngine {
    client: Arc<dyn RawQueryClient>,
}

impl QueryEngine {
    pub fn new(client: Arc<dyn RawQueryClient>) -> Self {
        Self { client }
    }

    /// Query one target within the given budget. Never returns an error:
    /// every failure mode collapses into a classified offline outcome.
    pub async fn query(&self, target: &QueryTarget, budget: QueryBudget) -> QueryOutcome {
        let mut last_failure = QueryFailure::Unknown("no attempts made".to_string());

        for attempt in 1..=budget.attempts {
            match tokio::time::timeout(budget.attempt_timeout, self.client.query(target)).await {
                Ok(Ok(raw)) => {
                    return QueryOutcome::Online(ServerSnapshot::from_raw(raw, &target.query_tag));
                }
                Ok(Err(failure)) => {
                    debug!(
                        target = %target.address(),
                        attempt,
                        failure = %failure,
                        "query attempt failed"
                    );
                    last_failure = failure;
                }
                Err(_elapsed) => {
                    debug!(
                        target = %target.address(),
                        attempt,
                        timeout_ms = budget.attempt_timeout.as_millis() as u64,
                        "query attempt timed out"
                    );
                    last_failure = QueryFailure::Timeout;
                }
            }
        }

        QueryOutcome::Offline(last_failure)
    }
}
