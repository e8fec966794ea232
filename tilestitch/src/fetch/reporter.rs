//! Periodic throughput reporting while tiles download.
//!
//! The reporter samples [`DownloadStats`] on a fixed interval and logs the
//! average speed and progress. It runs as a background task and stops when
//! its shutdown token is cancelled.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::stats::{DownloadStats, DownloadStatsSnapshot};

/// Default interval between reports.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Background task that logs download throughput.
pub struct ThroughputReporter {
    stats: Arc<DownloadStats>,
    interval: Duration,
}

impl ThroughputReporter {
    /// Creates a reporter with the default interval.
    pub fn new(stats: Arc<DownloadStats>) -> Self {
        Self {
            stats,
            interval: DEFAULT_REPORT_INTERVAL,
        }
    }

    /// Sets a custom report interval. Zero is raised to one millisecond.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Runs until `shutdown` is cancelled, logging once per interval.
    pub async fn run(self, shutdown: CancellationToken) {
        debug!(
            interval_ms = self.interval.as_millis() as u64,
            "Throughput reporter starting"
        );

        let mut interval = tokio::time::interval(self.interval);
        // Skip the first immediate tick
        interval.tick().await;

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    debug!("Throughput reporter stopping");
                    break;
                }

                _ = interval.tick() => {
                    report(&self.stats.snapshot());
                }
            }
        }
    }

    /// Spawns the reporter and returns a handle that stops it.
    pub fn spawn(self) -> ReporterHandle {
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(self.run(shutdown.clone()));
        ReporterHandle { shutdown, task }
    }
}

/// Handle to a running [`ThroughputReporter`].
pub struct ReporterHandle {
    shutdown: CancellationToken,
    task: tokio::task::JoinHandle<()>,
}

impl ReporterHandle {
    /// Cancels the reporter and waits for it to exit.
    pub async fn stop(self) {
        self.shutdown.cancel();
        if let Err(e) = self.task.await {
            debug!(error = %e, "Throughput reporter task ended abnormally");
        }
    }
}

fn report(snapshot: &DownloadStatsSnapshot) {
    info!(
        completed = snapshot.completed(),
        total = snapshot.total_tiles,
        downloaded_kb = snapshot.bytes_downloaded / 1024,
        avg_kbps = format!("{:.2}", snapshot.avg_bytes_per_sec() / 1024.0),
        "Downloading tiles"
    );
}
