//! Error types for the job pipeline.

use thiserror::Error;

use crate::assemble::AssembleError;
use crate::fetch::FetchError;
use crate::grid::GridError;
use crate::metadata::MetadataError;
use crate::provider::ProviderError;
use crate::queue::QueueError;

/// Errors that fail a whole job.
///
/// Individual tile failures never appear here: the fetcher counts them and
/// the assembler leaves their regions empty.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The descriptor could not be fetched or parsed
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// The geometry cannot be tiled
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The tile cache could not be prepared
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The canvas could not be built or written
    #[error(transparent)]
    Assemble(#[from] AssembleError),

    /// The queue store failed
    #[error(transparent)]
    Queue(#[from] QueueError),

    /// The HTTP client could not be created
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The blocking assembly task panicked or was cancelled
    #[error("assembly task failed: {0}")]
    AssemblyTask(#[from] tokio::task::JoinError),
}
