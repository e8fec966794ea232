//! Download configuration.

use std::time::Duration;

use super::defaults::{
    DEFAULT_CONCURRENCY, DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_REPORT_INTERVAL_MS,
    MIN_CONCURRENCY,
};

/// Configuration for tile downloading.
///
/// # Example
///
/// ```
/// use tilestitch::config::DownloadConfig;
///
/// let config = DownloadConfig::default();
/// assert_eq!(config.concurrency(), 20);
/// assert_eq!(config.timeout_secs(), 30);
///
/// let config = DownloadConfig::new()
///     .with_concurrency(4)
///     .with_report_interval_ms(250);
/// assert_eq!(config.concurrency(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadConfig {
    /// Maximum number of concurrent tile downloads
    concurrency: usize,
    /// HTTP request timeout (in seconds)
    timeout_secs: u64,
    /// Interval between throughput reports (in milliseconds)
    report_interval_ms: u64,
}

impl DownloadConfig {
    /// Create a new download configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of concurrent downloads.
    ///
    /// Values below one are raised to one. Default: 20.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(MIN_CONCURRENCY);
        self
    }

    /// Set the HTTP request timeout in seconds. Default: 30 seconds.
    pub fn with_timeout_secs(mut self, timeout: u64) -> Self {
        self.timeout_secs = timeout;
        self
    }

    /// Set the interval between throughput reports. Default: 1000 ms.
    pub fn with_report_interval_ms(mut self, interval_ms: u64) -> Self {
        self.report_interval_ms = interval_ms;
        self
    }

    /// Get the maximum number of concurrent downloads.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Get the HTTP request timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Get the interval between throughput reports.
    pub fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            report_interval_ms: DEFAULT_REPORT_INTERVAL_MS,
        }
    }
}
