//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;
use tilestitch::config::ConfigFileError;
use tilestitch::metadata::MetadataError;
use tilestitch::pipeline::PipelineError;
use tilestitch::queue::QueueError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file error
    Config(ConfigFileError),
    /// Invalid command-line argument
    InvalidArgument(String),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// A job failed
    Pipeline(PipelineError),
    /// The queue file could not be used
    Queue(QueueError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Pipeline(PipelineError::Metadata(MetadataError::Fetch { .. })) => {
                eprintln!();
                eprintln!("Check that the image id exists and that --base-url (or");
                eprintln!("[server] base_url in config.ini) points at the image server.");
            }
            CliError::Config(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Fix the value in config.ini, or run 'tilestitch init' with");
                eprintln!("--config pointing at a new file to see the defaults.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Pipeline(e) => write!(f, "Job failed: {}", e),
            CliError::Queue(e) => write!(f, "Queue error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Pipeline(e) => Some(e),
            CliError::Queue(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<PipelineError> for CliError {
    fn from(e: PipelineError) -> Self {
        CliError::Pipeline(e)
    }
}

impl From<QueueError> for CliError {
    fn from(e: QueueError) -> Self {
        CliError::Queue(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = CliError::InvalidArgument("--concurrency must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid argument: --concurrency must be at least 1"
        );
    }

    #[test]
    fn test_config_error_has_source() {
        let err = CliError::from(ConfigFileError::WriteError("disk full".to_string()));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
