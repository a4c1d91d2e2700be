use std::sync::Arc;

use crate::application::services::TranscriptionService;
use crate::domain::ApiKeyRegistry;

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub transcription_service: Arc<TranscriptionService>,
    pub api_keys: Arc<ApiKeyRegistry>,
    pub max_upload_bytes: usize,
}
