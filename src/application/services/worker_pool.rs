use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

/// Bounded pool for blocking work (audio decoding, model inference).
///
/// Jobs run on tokio's blocking threads; the semaphore caps how many run at
/// once. A job keeps its permit until it returns, even if the caller stopped
/// waiting after a timeout.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    size: usize,
    job_timeout: Option<Duration>,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerPoolError {
    #[error("job timed out after {0:?}")]
    Timeout(Duration),
    #[error("job panicked: {0}")]
    Panicked(String),
    #[error("job was cancelled")]
    Cancelled,
    #[error("worker pool is closed")]
    Closed,
}

impl WorkerPool {
    pub fn new(size: usize, job_timeout: Option<Duration>) -> Self {
        let size = size.max(1);
        Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
            job_timeout,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Runs `job` on a blocking thread and waits for its result.
    ///
    /// The timeout, when configured, covers both queueing for a permit and
    /// the job itself.
    pub async fn run<F, R>(&self, job: F) -> Result<R, WorkerPoolError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        let execute = async move {
            let permit = permits
                .acquire_owned()
                .await
                .map_err(|_| WorkerPoolError::Closed)?;

            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                job()
            })
            .await
            .map_err(|e| {
                if e.is_panic() {
                    WorkerPoolError::Panicked(e.to_string())
                } else {
                    WorkerPoolError::Cancelled
                }
            })
        };

        match self.job_timeout {
            Some(limit) => tokio::time::timeout(limit, execute)
                .await
                .map_err(|_| WorkerPoolError::Timeout(limit))?,
            None => execute.await,
        }
    }
}
