//! Bound on concurrent tile downloads.
//!
//! Permits are owned so they move into the spawned download task and are
//! released when the task ends, however it ends.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

/// Semaphore with in-flight accounting.
#[derive(Debug)]
pub struct FetchLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    gauge: Arc<InFlight>,
}

#[derive(Debug, Default)]
struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl FetchLimiter {
    /// Creates a limiter allowing `max_concurrent` downloads; zero is raised to one.
    pub fn new(max_concurrent: usize) -> Self {
        let capacity = max_concurrent.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            gauge: Arc::default(),
        }
    }

    /// Waits for a free slot. Fails only once the semaphore is closed.
    pub async fn acquire(&self) -> Result<FetchPermit, AcquireError> {
        let permit = Arc::clone(&self.semaphore).acquire_owned().await?;
        let now = self.gauge.current.fetch_add(1, Ordering::Relaxed) + 1;
        self.gauge.peak.fetch_max(now, Ordering::Relaxed);

        Ok(FetchPermit {
            _permit: permit,
            gauge: Arc::clone(&self.gauge),
        })
    }

    pub fn max_concurrent(&self) -> usize {
        self.capacity
    }

    pub fn in_flight(&self) -> usize {
        self.gauge.current.load(Ordering::Relaxed)
    }

    /// Highest in-flight count seen since creation.
    pub fn peak_in_flight(&self) -> usize {
        self.gauge.peak.load(Ordering::Relaxed)
    }

    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }
}

/// Slot held by one tile download.
pub struct FetchPermit {
    _permit: OwnedSemaphorePermit,
    gauge: Arc<InFlight>,
}

impl Drop for FetchPermit {
    fn drop(&mut self) {
        self.gauge.current.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::task::JoinSet;

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let limiter = FetchLimiter::new(0);
        assert_eq!(limiter.max_concurrent(), 1);
        assert_eq!(limiter.available_permits(), 1);
    }

    #[tokio::test]
    async fn test_permit_drop_frees_slot() {
        let limiter = FetchLimiter::new(2);

        let first = limiter.acquire().await.unwrap();
        let second = limiter.acquire().await.unwrap();
        assert_eq!(limiter.available_permits(), 0);
        assert_eq!(limiter.in_flight(), 2);

        drop(first);
        assert_eq!(limiter.in_flight(), 1);
        drop(second);

        assert_eq!(limiter.available_permits(), 2);
        assert_eq!(limiter.in_flight(), 0);
        assert_eq!(limiter.peak_in_flight(), 2);
    }

    #[tokio::test]
    async fn test_permit_moves_into_task() {
        let limiter = FetchLimiter::new(1);
        let permit = limiter.acquire().await.unwrap();

        let task = tokio::spawn(async move {
            let _permit = permit;
            tokio::time::sleep(Duration::from_millis(5)).await;
        });
        assert_eq!(limiter.available_permits(), 0);

        task.await.unwrap();
        assert_eq!(limiter.available_permits(), 1);
        assert_eq!(limiter.in_flight(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_peak_never_exceeds_capacity() {
        let limiter = FetchLimiter::new(3);
        let mut tasks = JoinSet::new();

        for _ in 0..12 {
            let permit = limiter.acquire().await.unwrap();
            tasks.spawn(async move {
                let _permit = permit;
                tokio::time::sleep(Duration::from_millis(5)).await;
            });
        }
        while tasks.join_next().await.is_some() {}

        assert_eq!(limiter.in_flight(), 0);
        assert!((1..=3).contains(&limiter.peak_in_flight()));
    }
}
