pub mod audio_decoder;
mod ffmpeg_decoder;
pub mod resampler;
mod wav_decoder;

pub use audio_decoder::{DEFAULT_MAX_UPLOAD_BYTES, UploadAudioDecoder, check_ffmpeg_binary};
pub use ffmpeg_decoder::{FFMPEG_OUTPUT_SAMPLE_RATE, FfmpegAudioDecoder};
pub use resampler::{ResampleError, resample};
pub use wav_decoder::{decode_wav, downmix_into};
