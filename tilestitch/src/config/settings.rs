//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use super::download::DownloadConfig;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Image server settings
    pub server: ServerSettings,
    /// Download settings
    pub download: DownloadSettings,
    /// Output settings
    pub output: OutputSettings,
    /// Queue settings
    pub queue: QueueSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Image server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    /// Base URL for metadata and tile requests
    pub base_url: String,
}

/// Download configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    /// Maximum concurrent tile downloads (at least 1)
    pub concurrency: usize,
    /// HTTP request timeout in seconds
    pub timeout: u64,
    /// Interval between throughput reports in milliseconds
    pub report_interval_ms: u64,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    /// Root directory for per-job tile caches and assembled images
    pub directory: PathBuf,
}

/// Queue configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueSettings {
    /// Queue store file
    pub file: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file, truncated on each start
    pub file: PathBuf,
}

impl DownloadSettings {
    /// Converts the file settings into a fetcher configuration.
    pub fn to_download_config(&self) -> DownloadConfig {
        DownloadConfig::new()
            .with_concurrency(self.concurrency)
            .with_timeout_secs(self.timeout)
            .with_report_interval_ms(self.report_interval_ms)
    }
}
