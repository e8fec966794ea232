//! Assembly error types

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort an assembly.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// Canvas byte size does not fit in memory addressing
    #[error("canvas of {width}x{height} pixels is too large to address")]
    CanvasTooLarge { width: u32, height: u32 },

    /// Canvas memory could not be reserved
    #[error("failed to allocate a {width}x{height} canvas: {source}")]
    Allocation {
        width: u32,
        height: u32,
        #[source]
        source: TryReserveError,
    },

    /// Output directory could not be created
    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Assembled image could not be encoded or written
    #[error("failed to write assembled image {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A cached tile that could not be decoded. Logged and skipped.
#[derive(Debug, Error)]
#[error("tile ({row}, {col}) at {} could not be decoded: {source}", path.display())]
pub struct TileDecodeError {
    pub row: u32,
    pub col: u32,
    pub path: PathBuf,
    #[source]
    pub source: image::ImageError,
}
