use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use zipformer_asr_api::application::services::{WorkerPool, WorkerPoolError};

#[tokio::test]
async fn given_job_when_running_then_returns_its_result() {
    let pool = WorkerPool::new(2, None);

    let result = pool.run(|| 21 * 2).await.unwrap();

    assert_eq!(result, 42);
    assert_eq!(pool.available(), 2);
}

#[tokio::test]
async fn given_zero_size_when_creating_then_keeps_one_worker() {
    let pool = WorkerPool::new(0, None);

    assert_eq!(pool.size(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_more_jobs_than_workers_when_running_then_concurrency_is_capped() {
    let pool = WorkerPool::new(2, None);
    let running = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let jobs = (0..6).map(|_| {
        let pool = pool.clone();
        let running = Arc::clone(&running);
        let peak = Arc::clone(&peak);
        tokio::spawn(async move {
            pool.run(move || {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(30));
                running.fetch_sub(1, Ordering::SeqCst);
            })
            .await
        })
    });
    let handles: Vec<_> = jobs.collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert!(peak.load(Ordering::SeqCst) <= 2);
    assert_eq!(pool.available(), 2);
}

#[tokio::test]
async fn given_slow_job_when_timeout_elapses_then_returns_timeout() {
    let pool = WorkerPool::new(1, Some(Duration::from_millis(20)));

    let result = pool
        .run(|| std::thread::sleep(Duration::from_millis(300)))
        .await;

    assert!(matches!(result, Err(WorkerPoolError::Timeout(_))));
}

#[tokio::test]
async fn given_panicking_job_when_running_then_returns_panicked_and_pool_survives() {
    let pool = WorkerPool::new(1, None);

    let result: Result<(), _> = pool.run(|| panic!("boom")).await;
    assert!(matches!(result, Err(WorkerPoolError::Panicked(_))));

    let next = pool.run(|| "still alive").await.unwrap();
    assert_eq!(next, "still alive");
}
