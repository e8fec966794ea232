//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and the async
//! runtime to reduce duplication across command handlers.

use std::future::Future;

use tilestitch::config::ConfigFile;
use tilestitch::logging::{init_logging, LoggingGuard};
use tilestitch::pipeline::{Pipeline, PipelineConfig};
use tilestitch::provider::AsyncReqwestClient;
use tilestitch::queue::QueueStore;
use tokio::runtime::Runtime;
use tracing::info;

use crate::commands::common::GlobalArgs;
use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    _logging_guard: Option<LoggingGuard>,
    /// Loaded configuration with command-line overrides applied
    config: ConfigFile,
    runtime: Runtime,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    pub fn new(args: &GlobalArgs) -> Result<Self, CliError> {
        let config = args.load_config()?;

        let logging_guard = init_logging(&config.logging.file, args.debug)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let runtime = Runtime::new().map_err(CliError::Runtime)?;

        Ok(Self {
            _logging_guard: Some(logging_guard),
            config,
            runtime,
        })
    }

    /// Create a runner for read-only commands that leaves the log file alone.
    pub fn without_logging(args: &GlobalArgs) -> Result<Self, CliError> {
        let config = args.load_config()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)?;

        Ok(Self {
            _logging_guard: None,
            config,
            runtime,
        })
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("tilestitch v{}", tilestitch::VERSION);
        info!(
            command = command,
            server = %self.config.server.base_url,
            output = %self.config.output.directory.display(),
            "tilestitch CLI starting"
        );
    }

    /// Create a pipeline for the configured server and output directory.
    pub fn pipeline(&self) -> Result<Pipeline<AsyncReqwestClient>, CliError> {
        Pipeline::with_reqwest(PipelineConfig::from_config_file(&self.config))
            .map_err(CliError::from)
    }

    /// The configured queue store.
    pub fn queue(&self) -> QueueStore {
        QueueStore::new(self.config.queue.file.clone())
    }

    /// Run a future to completion on the runner's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
