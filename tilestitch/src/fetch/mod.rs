//! Concurrent tile fetching with a resumable cache.
//!
//! [`TileFetcher`] drives the downloads, [`FetchLimiter`] bounds them,
//! [`DownloadStats`] counts them and [`ThroughputReporter`] logs progress.

mod error;
mod fetcher;
mod limiter;
mod reporter;
mod stats;

pub use error::{FetchError, TileError};
pub use fetcher::{FetchReport, TileFetcher};
pub use limiter::{FetchLimiter, FetchPermit};
pub use reporter::{ReporterHandle, ThroughputReporter, DEFAULT_REPORT_INTERVAL};
pub use stats::{DownloadStats, DownloadStatsSnapshot};
