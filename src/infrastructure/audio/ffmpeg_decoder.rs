use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Output, Stdio};

use crate::application::ports::AudioDecoderError;
use crate::domain::SampleBuffer;

/// Rate ffmpeg is asked to emit; compressed uploads need no further resampling.
pub const FFMPEG_OUTPUT_SAMPLE_RATE: u32 = 16_000;

const DEFAULT_FFMPEG_BINARY: &str = "ffmpeg";

/// Decodes compressed containers (MP3, OGG, Opus, WebM) by piping them
/// through an `ffmpeg` subprocess that emits raw little-endian f32 mono.
#[derive(Debug, Clone)]
pub struct FfmpegAudioDecoder {
    binary: PathBuf,
}

impl Default for FfmpegAudioDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_FFMPEG_BINARY)
    }
}

impl FfmpegAudioDecoder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn decode(&self, data: &[u8]) -> Result<SampleBuffer, AudioDecoderError> {
        if data.is_empty() {
            return Err(AudioDecoderError::EmptyInput);
        }

        let child = Command::new(&self.binary)
            .args(["-v", "error", "-i", "pipe:0", "-f", "f32le", "-ac", "1", "-ar"])
            .arg(FFMPEG_OUTPUT_SAMPLE_RATE.to_string())
            .arg("pipe:1")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let mut process = ScopedChild::new(child);
        let stdin = process.take_stdin().ok_or_else(|| {
            AudioDecoderError::DecoderUnavailable("ffmpeg stdin was not captured".to_string())
        })?;

        let (output, write_result) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || write_all_and_close(stdin, data));
            let output = process.wait_with_output();
            let write_result = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (output, write_result)
        });

        let output = output
            .map_err(|e| AudioDecoderError::DecodingFailed(format!("ffmpeg io: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason = if stderr.is_empty() {
                format!("ffmpeg exited with {}", output.status)
            } else {
                stderr
            };
            return Err(AudioDecoderError::DecodingFailed(reason));
        }

        if let Err(e) = write_result {
            tracing::debug!(error = %e, "ffmpeg stopped reading input before end of upload");
        }

        let samples = f32le_to_samples(&output.stdout);
        let buffer = SampleBuffer::new(samples, FFMPEG_OUTPUT_SAMPLE_RATE)
            .map_err(|_| AudioDecoderError::EmptyDecodedAudio)?;

        tracing::debug!(
            input_bytes = data.len(),
            samples = buffer.len(),
            duration_secs = buffer.duration_secs(),
            "ffmpeg decoded audio to 16kHz mono PCM"
        );

        Ok(buffer)
    }

    /// Runs `ffmpeg -version` and returns its first output line.
    pub fn check_binary(&self) -> Result<String, AudioDecoderError> {
        let output = Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(AudioDecoderError::DecoderUnavailable(format!(
                "{} -version exited with {}",
                self.binary.display(),
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string())
    }

    fn spawn_error(&self, e: io::Error) -> AudioDecoderError {
        if e.kind() == io::ErrorKind::NotFound {
            AudioDecoderError::DecoderUnavailable(format!("{} not found", self.binary.display()))
        } else {
            AudioDecoderError::DecoderUnavailable(format!(
                "failed to start {}: {}",
                self.binary.display(),
                e
            ))
        }
    }
}

/// Probes the default `ffmpeg` on PATH.
pub fn check_ffmpeg_binary() -> Result<String, AudioDecoderError> {
    FfmpegAudioDecoder::default().check_binary()
}

fn write_all_and_close(mut stdin: ChildStdin, data: &[u8]) -> io::Result<()> {
    let result = stdin.write_all(data);
    drop(stdin);
    result
}

fn f32le_to_samples(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Owns a child process until it has been reaped; dropping it early kills
/// and waits on the process so no zombie is left behind.
struct ScopedChild {
    child: Option<Child>,
}

impl ScopedChild {
    fn new(child: Child) -> Self {
        Self { child: Some(child) }
    }

    fn take_stdin(&mut self) -> Option<ChildStdin> {
        self.child.as_mut().and_then(|c| c.stdin.take())
    }

    fn wait_with_output(mut self) -> io::Result<Output> {
        match self.child.take() {
            Some(child) => child.wait_with_output(),
            None => Err(io::Error::other("process already reaped")),
        }
    }
}

impl Drop for ScopedChild {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
