//! Queue error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::job::JobIdError;

/// Errors from the queue store.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The queue file could not be read
    #[error("failed to read queue file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The queue file could not be rewritten
    #[error("failed to write queue file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The entry at the head of the queue is not a job id
    #[error("queue entry '{entry}' is not a valid job id")]
    InvalidEntry {
        entry: String,
        #[source]
        source: JobIdError,
    },
}
