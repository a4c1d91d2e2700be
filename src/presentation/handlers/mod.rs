mod auth;
mod health;
mod transcriptions;

pub use auth::{API_KEY_HEADER, api_key_middleware};
pub use health::health_handler;
pub use transcriptions::{TranscriptionResponse, transcription_handler};
