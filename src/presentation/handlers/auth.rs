use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::infrastructure::observability::mask_secret;
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

pub const API_KEY_HEADER: &str = "api-key";

/// Checks the `API-Key` header against the configured registry. With no
/// keys configured every request passes, header or not.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.api_keys.is_enabled() {
        return Ok(next.run(request).await);
    }

    let Some(value) = request.headers().get(API_KEY_HEADER) else {
        return Err(ApiError::MissingApiKey);
    };

    match value.to_str().map(str::trim) {
        Ok("") => Err(ApiError::MissingApiKey),
        Ok(key) if state.api_keys.contains(key) => Ok(next.run(request).await),
        Ok(key) => {
            tracing::warn!(api_key = %mask_secret(key), "Rejected unknown API key");
            Err(ApiError::InvalidApiKey)
        }
        Err(_) => {
            tracing::warn!("Rejected non-ASCII API key header");
            Err(ApiError::InvalidApiKey)
        }
    }
}
