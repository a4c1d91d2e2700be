mod audio_decoder;
mod transcriber;

pub use audio_decoder::{AudioDecoder, AudioDecoderError};
pub use transcriber::{Transcriber, TranscriberError};
