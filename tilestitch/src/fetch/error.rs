//! Fetch error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::provider::ProviderError;

/// Failure of a single tile download.
///
/// Absorbed by the fetcher: the tile stays uncached and the rest of the
/// grid carries on.
#[derive(Debug, Error)]
pub enum TileError {
    /// The server request failed
    #[error("tile ({row}, {col}) download failed: {source}")]
    Download {
        row: u32,
        col: u32,
        #[source]
        source: ProviderError,
    },

    /// The downloaded bytes could not be written to the cache
    #[error("tile ({row}, {col}) could not be written to {}: {source}", path.display())]
    Write {
        row: u32,
        col: u32,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that stop a fetch run before any tile is dispatched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The tile cache directory could not be created
    #[error("failed to create tile cache {}: {source}", path.display())]
    CacheDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
