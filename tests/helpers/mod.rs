#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use zipformer_asr_api::application::ports::TranscriberError;
use zipformer_asr_api::infrastructure::recognizer::SpeechModel;

pub const BOUNDARY: &str = "----zipformer-test-boundary";

/// 16-bit PCM WAV with interleaved samples.
pub fn build_wav(sample_rate: u32, channels: u16, samples: &[i16]) -> Vec<u8> {
    let block_align = channels * 2;
    let byte_rate = sample_rate * block_align as u32;
    let data_size = (samples.len() * 2) as u32;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}

pub fn silence_wav(sample_rate: u32, num_samples: usize) -> Vec<u8> {
    build_wav(sample_rate, 1, &vec![0i16; num_samples])
}

pub fn multipart_body(
    field: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> (String, Vec<u8>) {
    let mut body = Vec::with_capacity(data.len() + 256);
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

pub fn ffmpeg_available() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Answers with the number of samples it was given.
pub struct SampleCountModel {
    rate: u32,
    pub calls: AtomicUsize,
}

impl SampleCountModel {
    pub fn new(rate: u32) -> Self {
        Self {
            rate,
            calls: AtomicUsize::new(0),
        }
    }
}

impl SpeechModel for SampleCountModel {
    fn sample_rate(&self) -> u32 {
        self.rate
    }

    fn recognize(&self, samples: &[f32]) -> Result<String, TranscriberError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{} samples", samples.len()))
    }
}

/// Returns a fixed transcript.
pub struct FixedTextModel(pub &'static str);

impl SpeechModel for FixedTextModel {
    fn sample_rate(&self) -> u32 {
        16_000
    }

    fn recognize(&self, _samples: &[f32]) -> Result<String, TranscriberError> {
        Ok(self.0.to_string())
    }
}

pub struct FailingModel;

impl SpeechModel for FailingModel {
    fn sample_rate(&self) -> u32 {
        16_000
    }

    fn recognize(&self, _samples: &[f32]) -> Result<String, TranscriberError> {
        Err(TranscriberError::RecognitionFailed(
            "onnx runtime exploded".to_string(),
        ))
    }
}

pub struct SlowModel(pub Duration);

impl SpeechModel for SlowModel {
    fn sample_rate(&self) -> u32 {
        16_000
    }

    fn recognize(&self, _samples: &[f32]) -> Result<String, TranscriberError> {
        std::thread::sleep(self.0);
        Ok("late".to_string())
    }
}
