//! Metadata resolution errors.

use thiserror::Error;

use crate::grid::GridError;
use crate::provider::ProviderError;

/// Errors raised while turning a job id into image geometry.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Descriptor could not be downloaded
    #[error("failed to fetch descriptor from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: ProviderError,
    },

    /// Descriptor body is not UTF-8
    #[error("descriptor is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Descriptor is not a well-formed document
    #[error("failed to parse descriptor: {0}")]
    Parse(#[from] roxmltree::Error),

    /// A required field does not occur anywhere in the document
    #[error("descriptor has no '{0}' field")]
    MissingField(&'static str),

    /// A required field is not a positive integer
    #[error("descriptor field '{field}' is not a positive integer: '{value}'")]
    InvalidField { field: &'static str, value: String },

    /// Fields parsed but describe impossible geometry
    #[error(transparent)]
    Geometry(#[from] GridError),
}
