//! Durable job queue
//!
//! [`QueueStore`] persists job ids in a text file and [`process_queue`]
//! drains it through a [`JobRunner`].

mod error;
mod processor;
mod store;

pub use error::QueueError;
pub use processor::{process_queue, JobRunner, ProcessSummary};
pub use store::{QueueEntry, QueueStore};
