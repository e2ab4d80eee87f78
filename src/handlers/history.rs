//! # Player-History Chart
//!
//! Reads the persisted samples for one monitor over the lookback window and
//! hands them to the rendering collaborator. No pixels are computed here.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;
use crate::models::HistoryPoint;
use crate::registry::{HistoryStore, MonitorRegistry};

/// External chart renderer; turns samples into image bytes.
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    async fn render(&self, points: &[HistoryPoint]) -> Result<Vec<u8>>;
}

/// Classified chart answer; the caller always gets one of these.
#[derive(Debug, Clone)]
pub enum ChartResponse {
    Chart {
        image: Vec<u8>,
        caption: String,
    },
    UnknownMonitor,
    /// Store or renderer failure, already reduced to a displayable message.
    Failed { message: String },
}

/// Answers on-demand history-chart requests.
pub struct HistoryChartHandler {
    registry: Arc<dyn MonitorRegistry>,
    history: Arc<dyn HistoryStore>,
    renderer: Arc<dyn ChartRenderer>,
    window_hours: u32,
}

impl HistoryChartHandler {
    pub fn new(
        registry: Arc<dyn MonitorRegistry>,
        history: Arc<dyn HistoryStore>,
        renderer: Arc<dyn ChartRenderer>,
        window_hours: u32,
    ) -> Self {
        Self {
            registry,
            history,
            renderer,
            window_hours,
        }
    }

    pub async fn respond(&self, monitor_id: i64) -> ChartResponse {
        match self.chart_for(monitor_id).await {
            Ok(Some(response)) => response,
            Ok(None) => ChartResponse::UnknownMonitor,
            Err(e) => {
                warn!(monitor_id, error = %e, "history chart request failed");
                ChartResponse::Failed {
                    message: "Failed to generate player history".to_string(),
                }
            }
        }
    }

    async fn chart_for(&self, monitor_id: i64) -> Result<Option<ChartResponse>> {
        let Some(monitor) = self.registry.find(monitor_id).await? else {
            return Ok(None);
        };

        let points = self
            .history
            .recent_points(monitor_id, self.window_hours)
            .await?;
        let image = self.renderer.render(&points).await?;

        let address = match monitor.server_port {
            Some(port) => format!("{}:{}", monitor.server_host, port),
            None => monitor.server_host.clone(),
        };
        Ok(Some(ChartResponse::Chart {
            image,
            caption: format!(
                "Player history for {address} (last {} hours)",
                self.window_hours
            ),
        }))
    }
}
