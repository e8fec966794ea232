//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use std::path::PathBuf;

use super::settings::*;

/// Default image server.
pub const DEFAULT_BASE_URL: &str = "http://www.gigapan.org";

/// Default number of concurrent tile downloads.
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Minimum number of concurrent tile downloads.
pub const MIN_CONCURRENCY: usize = 1;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Default interval between throughput reports.
pub const DEFAULT_REPORT_INTERVAL_MS: u64 = 1000;

/// Default output directory.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = ".";

/// Default queue store file.
pub const DEFAULT_QUEUE_FILE: &str = "queue.txt";

/// Default log file.
pub const DEFAULT_LOG_FILE: &str = "logs/tilestitch.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                base_url: DEFAULT_BASE_URL.to_string(),
            },
            download: DownloadSettings {
                concurrency: DEFAULT_CONCURRENCY,
                timeout: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
                report_interval_ms: DEFAULT_REPORT_INTERVAL_MS,
            },
            output: OutputSettings {
                directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            },
            queue: QueueSettings {
                file: PathBuf::from(DEFAULT_QUEUE_FILE),
            },
            logging: LoggingSettings {
                file: PathBuf::from(DEFAULT_LOG_FILE),
            },
        }
    }
}
