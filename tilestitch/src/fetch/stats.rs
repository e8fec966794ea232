//! Download statistics for one fetch run.
//!
//! Provides thread-safe accumulation of download metrics that tile tasks
//! update concurrently and the throughput reporter samples periodically.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Thread-safe counters for one fetch run.
///
/// # Example
///
/// ```
/// use tilestitch::fetch::DownloadStats;
///
/// let stats = DownloadStats::new(4);
/// stats.record_cache_hit();
/// stats.record_download(1024);
/// stats.record_failure();
///
/// let snapshot = stats.snapshot();
/// assert_eq!(snapshot.bytes_downloaded, 1024);
/// assert_eq!(snapshot.completed(), 3);
/// ```
#[derive(Debug)]
pub struct DownloadStats {
    /// Tiles in the grid
    total_tiles: u64,
    /// Total bytes written to the cache
    bytes_downloaded: AtomicU64,
    /// Tiles downloaded during this run
    tiles_downloaded: AtomicU64,
    /// Tiles skipped because they were already cached
    tiles_cached: AtomicU64,
    /// Tiles that could not be downloaded or written
    tiles_failed: AtomicU64,
    /// When the run started
    started: Instant,
}

/// Snapshot of [`DownloadStats`] at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadStatsSnapshot {
    /// Tiles in the grid
    pub total_tiles: u64,
    /// Total bytes written to the cache
    pub bytes_downloaded: u64,
    /// Tiles downloaded during this run
    pub tiles_downloaded: u64,
    /// Tiles skipped because they were already cached
    pub tiles_cached: u64,
    /// Tiles that failed
    pub tiles_failed: u64,
    /// Time since the run started
    pub elapsed: Duration,
}

impl DownloadStatsSnapshot {
    /// Tiles resolved so far, whatever the outcome.
    pub fn completed(&self) -> u64 {
        self.tiles_downloaded + self.tiles_cached + self.tiles_failed
    }

    /// Average throughput since the start of the run.
    pub fn avg_bytes_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.bytes_downloaded as f64 / secs
        } else {
            0.0
        }
    }
}

impl DownloadStats {
    /// Creates zeroed counters for a grid of `total_tiles` tiles.
    pub fn new(total_tiles: u64) -> Self {
        Self {
            total_tiles,
            bytes_downloaded: AtomicU64::new(0),
            tiles_downloaded: AtomicU64::new(0),
            tiles_cached: AtomicU64::new(0),
            tiles_failed: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    /// Records a tile that was downloaded and cached.
    pub fn record_download(&self, bytes: usize) {
        self.bytes_downloaded
            .fetch_add(bytes as u64, Ordering::Relaxed);
        self.tiles_downloaded.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a tile that was already cached.
    pub fn record_cache_hit(&self) {
        self.tiles_cached.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a tile that failed.
    pub fn record_failure(&self) {
        self.tiles_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> DownloadStatsSnapshot {
        DownloadStatsSnapshot {
            total_tiles: self.total_tiles,
            bytes_downloaded: self.bytes_downloaded.load(Ordering::Relaxed),
            tiles_downloaded: self.tiles_downloaded.load(Ordering::Relaxed),
            tiles_cached: self.tiles_cached.load(Ordering::Relaxed),
            tiles_failed: self.tiles_failed.load(Ordering::Relaxed),
            elapsed: self.started.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new_stats_are_zero() {
        let snapshot = DownloadStats::new(10).snapshot();

        assert_eq!(snapshot.total_tiles, 10);
        assert_eq!(snapshot.bytes_downloaded, 0);
        assert_eq!(snapshot.completed(), 0);
    }

    #[test]
    fn test_record_download() {
        let stats = DownloadStats::new(2);

        stats.record_download(1024);
        stats.record_download(2048);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.bytes_downloaded, 3072);
        assert_eq!(snapshot.tiles_downloaded, 2);
    }

    #[test]
    fn test_average_speed_uses_elapsed_time() {
        let stats = DownloadStats::new(1);
        stats.record_download(1_000_000);
        thread::sleep(Duration::from_millis(20));

        let snapshot = stats.snapshot();
        assert!(snapshot.avg_bytes_per_sec() > 0.0);
        assert!(snapshot.avg_bytes_per_sec() < 1_000_000.0 / 0.02 + 1.0);
    }

    #[test]
    fn test_thread_safety() {
        let stats = Arc::new(DownloadStats::new(1000));
        let mut handles = vec![];

        for _ in 0..10 {
            let stats_clone = Arc::clone(&stats);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    stats_clone.record_download(100);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.tiles_downloaded, 1000);
        assert_eq!(snapshot.bytes_downloaded, 100_000);
    }

    #[test]
    fn test_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DownloadStats>();
    }
}
