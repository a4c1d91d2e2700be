use std::io::Cursor;

use symphonia::core::audio::SampleBuffer as PcmBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::default::formats::WavReader;

use crate::application::ports::AudioDecoderError;
use crate::domain::{SampleBuffer, SampleBufferError};

/// Parses a RIFF/WAVE container and returns mono f32 samples at the file's
/// native rate. Only the WAV reader is consulted; other containers are
/// rejected as malformed rather than sniffed.
pub fn decode_wav(data: &[u8]) -> Result<SampleBuffer, AudioDecoderError> {
    let cursor = Cursor::new(data.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let mut format = WavReader::try_new(mss, &FormatOptions::default())
        .map_err(|e| AudioDecoderError::DecodingFailed(format!("wav container: {}", e)))?;

    let track = format
        .default_track()
        .ok_or_else(|| AudioDecoderError::DecodingFailed("no audio track found".to_string()))?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let source_rate = codec_params
        .sample_rate
        .ok_or_else(|| AudioDecoderError::DecodingFailed("unknown sample rate".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| AudioDecoderError::DecodingFailed(format!("codec: {}", e)))?;

    let mut mono: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(e) => {
                return Err(AudioDecoderError::DecodingFailed(format!("packet: {}", e)));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphoniaError::DecodeError(e)) => {
                tracing::warn!(error = %e, "Skipping corrupt audio frame");
                continue;
            }
            Err(e) => {
                return Err(AudioDecoderError::DecodingFailed(format!("decode: {}", e)));
            }
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();
        if num_frames == 0 {
            continue;
        }

        let mut pcm = PcmBuffer::<f32>::new(num_frames as u64, spec);
        pcm.copy_interleaved_ref(decoded);
        downmix_into(pcm.samples(), spec.channels.count(), &mut mono);
    }

    let buffer = SampleBuffer::new(mono, source_rate).map_err(|e| match e {
        SampleBufferError::Empty => AudioDecoderError::EmptyDecodedAudio,
        SampleBufferError::InvalidSampleRate(rate) => {
            AudioDecoderError::DecodingFailed(format!("invalid sample rate: {}", rate))
        }
    })?;

    tracing::debug!(
        samples = buffer.len(),
        sample_rate = buffer.sample_rate(),
        duration_secs = buffer.duration_secs(),
        "WAV decoded to mono PCM"
    );

    Ok(buffer)
}

/// Averages each interleaved frame into one sample.
pub fn downmix_into(interleaved: &[f32], channels: usize, out: &mut Vec<f32>) {
    if channels <= 1 {
        out.extend_from_slice(interleaved);
        return;
    }
    out.extend(
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32),
    );
}
