//! Provider error types

use std::fmt;

/// Errors that can occur while talking to the image server.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Request could not be sent or the body could not be read
    HttpError(String),
    /// Server answered with a non-success status
    HttpStatus { status: u16, url: String },
    /// HTTP client could not be constructed
    ClientBuild(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::HttpStatus { status, url } => {
                write!(f, "HTTP {} from {}", status, url)
            }
            ProviderError::ClientBuild(msg) => {
                write!(f, "Failed to create HTTP client: {}", msg)
            }
        }
    }
}

impl std::error::Error for ProviderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = ProviderError::HttpStatus {
            status: 404,
            url: "http://host/tiles/1/0/0/0".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404 from http://host/tiles/1/0/0/0");
    }

    #[test]
    fn test_http_error_display() {
        let err = ProviderError::HttpError("connection reset".to_string());
        assert_eq!(err.to_string(), "HTTP error: connection reset");
    }
}
