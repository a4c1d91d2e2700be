mod transcription_service;
mod worker_pool;

pub use transcription_service::{TranscriptionError, TranscriptionService};
pub use worker_pool::{WorkerPool, WorkerPoolError};
