//! Sequential processing of the job queue.
//!
//! Jobs run one at a time from the head of the queue. An entry is removed
//! only after its job succeeds, so an interrupted or failed run leaves it
//! queued and the next run retries it (at-least-once).
//!
//! On a job failure processing stops and the error is returned with the
//! failed entry still at the head.

use std::future::Future;

use tracing::{info, warn};

use super::error::QueueError;
use super::store::QueueStore;
use crate::job::JobId;

/// Runs one queued job.
pub trait JobRunner: Send + Sync {
    /// Value produced by a successful job
    type Outcome: Send;
    /// Job failure; queue errors convert into it
    type Error: std::error::Error + From<QueueError> + Send;

    /// Runs the full job for `id`.
    fn run_job(&self, id: JobId) -> impl Future<Output = Result<Self::Outcome, Self::Error>> + Send;
}

/// Jobs completed by one processing run.
#[derive(Debug)]
pub struct ProcessSummary<T> {
    /// Completed jobs in the order they ran
    pub completed: Vec<(JobId, T)>,
    /// True when processing stopped at a blank entry
    pub stopped_at_blank: bool,
}

impl<T> ProcessSummary<T> {
    /// Ids of the completed jobs.
    pub fn completed_ids(&self) -> Vec<JobId> {
        self.completed.iter().map(|(id, _)| *id).collect()
    }
}

/// Processes `store` until it is empty, a blank entry is reached or a job fails.
pub async fn process_queue<R: JobRunner>(
    store: &QueueStore,
    runner: &R,
) -> Result<ProcessSummary<R::Outcome>, R::Error> {
    let mut summary = ProcessSummary {
        completed: Vec::new(),
        stopped_at_blank: false,
    };

    while let Some(head) = store.peek().await? {
        if head.is_empty() {
            warn!(queue = %store.path().display(), "Blank entry at the head of the queue, stopping");
            summary.stopped_at_blank = true;
            break;
        }

        let id: JobId = head
            .parse()
            .map_err(|source| QueueError::InvalidEntry {
                entry: head.clone(),
                source,
            })?;

        info!(job_id = %id, "Processing queued job");
        match runner.run_job(id).await {
            Ok(outcome) => {
                store.pop_front().await?;
                info!(job_id = %id, "Job complete, removed from the queue");
                summary.completed.push((id, outcome));
            }
            Err(e) => {
                warn!(job_id = %id, error = %e, "Job failed, leaving it at the head of the queue");
                return Err(e);
            }
        }
    }

    Ok(summary)
}
