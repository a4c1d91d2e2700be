mod api_key_registry;
mod audio_format;
mod sample_buffer;
mod uploaded_audio;

pub use api_key_registry::{ApiKeyParseError, ApiKeyRegistry};
pub use audio_format::{AudioFormat, CompressedCodec};
pub use sample_buffer::{SampleBuffer, SampleBufferError};
pub use uploaded_audio::UploadedAudio;
