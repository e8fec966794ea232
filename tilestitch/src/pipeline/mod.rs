//! Job pipeline: metadata → grid → fetch → assemble.

mod error;
mod runner;

pub use error::PipelineError;
pub use runner::{DownloadOutcome, JobOutcome, Pipeline, PipelineConfig};
