//! Common types and utilities shared across CLI commands.

use std::path::PathBuf;

use clap::Args;
use tilestitch::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Options accepted by every subcommand. Each one overrides config.ini.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Configuration file (default: ~/.tilestitch/config.ini)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Image server base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Root directory for tiles and assembled images
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Maximum concurrent tile downloads
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    /// Queue file
    #[arg(long, global = true)]
    pub queue_file: Option<PathBuf>,

    /// Enable debug logging regardless of RUST_LOG
    #[arg(long, global = true)]
    pub debug: bool,
}

impl GlobalArgs {
    /// Path of the configuration file in use.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_file_path)
    }

    /// Loads the configuration file and applies command-line overrides.
    pub fn load_config(&self) -> Result<ConfigFile, CliError> {
        let config = ConfigFile::load_from(&self.config_path())?;
        self.apply(config)
    }

    /// Applies command-line overrides on top of `config`.
    pub fn apply(&self, mut config: ConfigFile) -> Result<ConfigFile, CliError> {
        if let Some(base_url) = &self.base_url {
            config.server.base_url = base_url.trim().to_string();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output.directory = output_dir.clone();
        }
        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(CliError::InvalidArgument(
                    "--concurrency must be at least 1".to_string(),
                ));
            }
            config.download.concurrency = concurrency;
        }
        if let Some(queue_file) = &self.queue_file {
            config.queue.file = queue_file.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides_keeps_config() {
        let config = GlobalArgs::default().apply(ConfigFile::default()).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_overrides_win() {
        let args = GlobalArgs {
            base_url: Some("http://mirror.test".to_string()),
            output_dir: Some(PathBuf::from("/tmp/out")),
            concurrency: Some(5),
            queue_file: Some(PathBuf::from("jobs.txt")),
            ..GlobalArgs::default()
        };

        let config = args.apply(ConfigFile::default()).unwrap();

        assert_eq!(config.server.base_url, "http://mirror.test");
        assert_eq!(config.output.directory, PathBuf::from("/tmp/out"));
        assert_eq!(config.download.concurrency, 5);
        assert_eq!(config.queue.file, PathBuf::from("jobs.txt"));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let args = GlobalArgs {
            concurrency: Some(0),
            ..GlobalArgs::default()
        };
        assert!(matches!(
            args.apply(ConfigFile::default()),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let args = GlobalArgs {
            config: Some(temp_dir.path().join("absent.ini")),
            ..GlobalArgs::default()
        };
        assert_eq!(args.load_config().unwrap(), ConfigFile::default());
    }
}
