//! Fixed-interval polling loop for unattended operation.
//!
//! Repeats a single pipeline invocation on a timer; the pipeline itself
//! stays a pure per-call entry point. Cancellation and process supervision
//! belong to whatever runs the service, not to this loop.

use chrono::{DateTime, Utc};
use pulse_common::config::SchedulerConfig;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::Duration;

use crate::aggregate::{BatchAggregator, PassReport};
use crate::source::ArticleSource;

/// Snapshot of poller progress for the status endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct PollerStatus {
    /// When the last pass finished
    pub last_run: Option<DateTime<Utc>>,
    /// Signal produced by the last pass
    pub last_signal: Option<f64>,
    /// Whether the last pass retrieved articles successfully
    pub last_retrieval_ok: bool,
    /// Completed passes since startup
    pub passes: u64,
}

/// Runs aggregation passes on a fixed interval with error backoff.
pub struct NewsPoller {
    config: SchedulerConfig,
    status: Arc<RwLock<PollerStatus>>,
}

impl NewsPoller {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            status: Arc::new(RwLock::new(PollerStatus::default())),
        }
    }

    /// Shared handle to the poller status, for the HTTP surface.
    pub fn status_handle(&self) -> Arc<RwLock<PollerStatus>> {
        Arc::clone(&self.status)
    }

    /// Record the outcome of one pass, regardless of who triggered it.
    pub async fn record(&self, report: &PassReport) {
        let mut status = self.status.write().await;
        status.last_run = Some(Utc::now());
        status.last_signal = Some(report.signal);
        status.last_retrieval_ok = report.retrieval_ok;
        status.passes += 1;
    }

    /// Run the polling loop forever.
    ///
    /// A pass whose retrieval failed sleeps for the (shorter) backoff
    /// interval before retrying; successful passes wait the full interval.
    pub async fn run(&self, aggregator: Arc<BatchAggregator>, source: Arc<dyn ArticleSource>) {
        if !self.config.enabled {
            tracing::info!("Polling scheduler disabled, passes run only via HTTP trigger");
            return;
        }

        tracing::info!(
            interval_secs = self.config.interval_secs,
            "Starting news polling loop"
        );

        loop {
            let report = aggregator.run_pass(source.as_ref()).await;
            self.record(&report).await;

            tracing::info!(
                signal = report.signal,
                articles = report.articles,
                retrieval_ok = report.retrieval_ok,
                "Aggregation pass complete"
            );

            let sleep_secs = if report.retrieval_ok {
                self.config.interval_secs
            } else {
                self.config.error_backoff_secs
            };
            tokio::time::sleep(Duration::from_secs(sleep_secs)).await;
        }
    }
}
