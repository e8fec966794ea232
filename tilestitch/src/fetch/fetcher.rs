//! Concurrent tile fetcher.
//!
//! Fetching happens in two phases per coordinate, mirroring a resumable
//! download:
//!
//! 1. **Cache check:** a coordinate whose tile file exists is skipped
//!    without touching the network.
//! 2. **Download:** misses are spawned into a [`JoinSet`] one at a time as
//!    limiter permits become available, so at most `concurrency` requests
//!    are ever in flight and no waiting tasks pile up.
//!
//! Failed tiles are logged and left uncached. The call returns once every
//! spawned task has finished.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, trace, warn};

use super::error::{FetchError, TileError};
use super::limiter::FetchLimiter;
use super::reporter::ThroughputReporter;
use super::stats::{DownloadStats, DownloadStatsSnapshot};
use crate::cache::TileCache;
use crate::config::DownloadConfig;
use crate::grid::{GridSpec, TileCoordinate};
use crate::job::JobDescriptor;
use crate::provider::AsyncHttpClient;

/// Summary of one fetch run.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchReport {
    /// Tiles in the grid
    pub total: u64,
    /// Tiles already present in the cache
    pub cached: u64,
    /// Tiles downloaded during this run
    pub downloaded: u64,
    /// Tiles that could not be fetched
    pub failed: u64,
    /// Bytes downloaded during this run
    pub bytes: u64,
    /// Highest number of concurrent downloads observed
    pub peak_in_flight: usize,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl FetchReport {
    fn from_snapshot(snapshot: &DownloadStatsSnapshot, peak_in_flight: usize) -> Self {
        Self {
            total: snapshot.total_tiles,
            cached: snapshot.tiles_cached,
            downloaded: snapshot.tiles_downloaded,
            failed: snapshot.tiles_failed,
            bytes: snapshot.bytes_downloaded,
            peak_in_flight,
            elapsed: snapshot.elapsed,
        }
    }

    /// True when every tile of the grid is now cached.
    pub fn is_complete(&self) -> bool {
        self.failed == 0 && self.cached + self.downloaded == self.total
    }
}

/// Downloads every tile of a grid into a [`TileCache`].
pub struct TileFetcher<C> {
    client: Arc<C>,
    config: DownloadConfig,
}

impl<C: AsyncHttpClient + 'static> TileFetcher<C> {
    /// Creates a fetcher sharing `client` across download tasks.
    pub fn new(client: Arc<C>, config: DownloadConfig) -> Self {
        Self { client, config }
    }

    /// Ensures every coordinate of `grid` is cached.
    ///
    /// Individual tile failures never fail the call; they are counted in
    /// the returned report. Two concurrent calls for the same cache may
    /// download a tile twice.
    pub async fn fetch_all(
        &self,
        job: &JobDescriptor,
        grid: &GridSpec,
        cache: &TileCache,
    ) -> Result<FetchReport, FetchError> {
        cache
            .ensure_directory()
            .await
            .map_err(|source| FetchError::CacheDirectory {
                path: cache.directory().to_path_buf(),
                source,
            })?;

        info!(
            job_id = %job.id,
            level = grid.max_level,
            tiles_x = grid.tile_counts_x,
            tiles_y = grid.tile_counts_y,
            concurrency = self.config.concurrency(),
            "Fetching tiles"
        );

        let stats = Arc::new(DownloadStats::new(grid.tile_count()));
        let limiter = FetchLimiter::new(self.config.concurrency());
        let reporter = ThroughputReporter::new(Arc::clone(&stats))
            .with_interval(self.config.report_interval())
            .spawn();

        self.dispatch(job, grid, cache, &stats, &limiter).await;

        reporter.stop().await;

        let report = FetchReport::from_snapshot(&stats.snapshot(), limiter.peak_in_flight());
        info!(
            job_id = %job.id,
            total = report.total,
            cached = report.cached,
            downloaded = report.downloaded,
            failed = report.failed,
            bytes = report.bytes,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Tile fetch complete"
        );
        Ok(report)
    }

    async fn dispatch(
        &self,
        job: &JobDescriptor,
        grid: &GridSpec,
        cache: &TileCache,
        stats: &Arc<DownloadStats>,
        limiter: &FetchLimiter,
    ) {
        let cache = Arc::new(cache.clone());
        let mut downloads: JoinSet<()> = JoinSet::new();

        for coord in grid.cells() {
            if cache.contains(coord).await {
                trace!(row = coord.row, col = coord.col, "Tile already cached");
                stats.record_cache_hit();
                continue;
            }

            let permit = match limiter.acquire().await {
                Ok(permit) => permit,
                Err(e) => {
                    warn!(row = coord.row, col = coord.col, error = %e, "Download limiter closed");
                    stats.record_failure();
                    continue;
                }
            };

            let url = job.endpoint.tile_url(job.id, grid.max_level, coord);
            let client = Arc::clone(&self.client);
            let task_cache = Arc::clone(&cache);
            let task_stats = Arc::clone(stats);

            downloads.spawn(async move {
                let _permit = permit;
                match fetch_tile(client.as_ref(), &url, &task_cache, coord).await {
                    Ok(bytes) => {
                        trace!(row = coord.row, col = coord.col, bytes = bytes, "Tile cached");
                        task_stats.record_download(bytes);
                    }
                    Err(e) => {
                        warn!(row = coord.row, col = coord.col, url = %url, error = %e, "Tile download failed");
                        task_stats.record_failure();
                    }
                }
            });

            // Reap finished tasks so the set does not grow with the grid
            while let Some(result) = downloads.try_join_next() {
                handle_join_result(result, stats);
            }
        }

        debug!(remaining = downloads.len(), "All tiles dispatched, waiting for downloads");

        while let Some(result) = downloads.join_next().await {
            handle_join_result(result, stats);
        }
    }
}

async fn fetch_tile<C: AsyncHttpClient>(
    client: &C,
    url: &str,
    cache: &TileCache,
    coord: TileCoordinate,
) -> Result<usize, TileError> {
    let body = client.get(url).await.map_err(|source| TileError::Download {
        row: coord.row,
        col: coord.col,
        source,
    })?;

    cache
        .store(coord, &body)
        .await
        .map_err(|source| TileError::Write {
            row: coord.row,
            col: coord.col,
            path: cache.tile_path(coord),
            source,
        })?;

    Ok(body.len())
}

fn handle_join_result(result: Result<(), JoinError>, stats: &DownloadStats) {
    if let Err(join_err) = result {
        warn!(error = %join_err, "Tile download task panicked");
        stats.record_failure();
    }
}
