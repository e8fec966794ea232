//! Configuration for tilestitch.
//!
//! The user-facing INI file is modelled by [`ConfigFile`]; components take
//! narrower structs such as [`DownloadConfig`].
//!
//! # Example
//!
//! ```
//! use tilestitch::config::{ConfigFile, DownloadConfig};
//!
//! let config = ConfigFile::default();
//! let download: DownloadConfig = config.download.to_download_config();
//! assert_eq!(download.concurrency(), 20);
//! ```

mod defaults;
mod download;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use download::DownloadConfig;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, DownloadSettings, LoggingSettings, OutputSettings, QueueSettings, ServerSettings,
};
