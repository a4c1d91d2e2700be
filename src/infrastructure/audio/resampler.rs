use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, PoisonError};

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::domain::SampleBuffer;

const CHUNK_SIZE: usize = 1024;
const SINC_LEN: usize = 256;
const IMPULSE_POSITION: usize = CHUNK_SIZE / 2;

static DELAY_CACHE: LazyLock<Mutex<HashMap<(u32, u32), usize>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

#[derive(Debug, thiserror::Error)]
pub enum ResampleError {
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(u32),
    #[error("resampler: {0}")]
    Failed(String),
}

/// Converts a mono buffer to `target_rate`. A buffer already at the target
/// rate is returned untouched.
pub fn resample(buffer: SampleBuffer, target_rate: u32) -> Result<SampleBuffer, ResampleError> {
    if target_rate == 0 {
        return Err(ResampleError::InvalidSampleRate(target_rate));
    }
    if buffer.sample_rate() == target_rate {
        return Ok(buffer);
    }

    let from_rate = buffer.sample_rate();
    let samples = resample_samples(buffer.samples(), from_rate, target_rate)?;

    tracing::debug!(
        from_rate,
        to_rate = target_rate,
        input_samples = buffer.len(),
        output_samples = samples.len(),
        "Audio resampled"
    );

    SampleBuffer::new(samples, target_rate).map_err(|e| ResampleError::Failed(e.to_string()))
}

fn resample_samples(
    samples: &[f32],
    from_rate: u32,
    to_rate: u32,
) -> Result<Vec<f32>, ResampleError> {
    let ratio = to_rate as f64 / from_rate as f64;
    let expected_len = ((samples.len() as f64 * ratio).round() as usize).max(1);
    let delay = measured_delay(from_rate, to_rate)?;

    let mut resampler = new_resampler(ratio)?;
    let mut output = run_resampler(&mut resampler, samples, expected_len + delay)?;

    output.drain(..delay.min(output.len()));
    output.resize(expected_len, 0.0);

    Ok(output)
}

fn new_resampler(ratio: f64) -> Result<SincFixedIn<f32>, ResampleError> {
    let params = SincInterpolationParameters {
        sinc_len: SINC_LEN,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    SincFixedIn::<f32>::new(ratio, 1.0, params, CHUNK_SIZE, 1)
        .map_err(|e| ResampleError::Failed(format!("init: {}", e)))
}

/// Feeds `samples` through in fixed chunks, then flushes with silence until
/// at least `min_len` output samples exist.
fn run_resampler(
    resampler: &mut SincFixedIn<f32>,
    samples: &[f32],
    min_len: usize,
) -> Result<Vec<f32>, ResampleError> {
    let mut output = Vec::with_capacity(min_len + CHUNK_SIZE);

    let mut chunks = samples.chunks_exact(CHUNK_SIZE);
    for chunk in &mut chunks {
        let result = resampler
            .process(&[chunk], None)
            .map_err(|e| ResampleError::Failed(format!("process: {}", e)))?;
        if let Some(channel) = result.first() {
            output.extend_from_slice(channel);
        }
    }

    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        let result = resampler
            .process_partial(Some(&[remainder]), None)
            .map_err(|e| ResampleError::Failed(format!("process tail: {}", e)))?;
        if let Some(channel) = result.first() {
            output.extend_from_slice(channel);
        }
    }

    while output.len() < min_len {
        let result = resampler
            .process_partial(None::<&[&[f32]]>, None)
            .map_err(|e| ResampleError::Failed(format!("flush: {}", e)))?;
        match result.first() {
            Some(channel) if !channel.is_empty() => output.extend_from_slice(channel),
            _ => break,
        }
    }

    Ok(output)
}

/// Offset between an input sample and its image in the output, found by
/// resampling a unit impulse. `output_delay` only bounds it from above.
fn measured_delay(from_rate: u32, to_rate: u32) -> Result<usize, ResampleError> {
    let key = (from_rate, to_rate);
    if let Some(&delay) = DELAY_CACHE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        return Ok(delay);
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let mut resampler = new_resampler(ratio)?;
    let upper_bound = resampler.output_delay();

    let mut impulse = vec![0.0f32; CHUNK_SIZE];
    impulse[IMPULSE_POSITION] = 1.0;
    let output = run_resampler(
        &mut resampler,
        &impulse,
        (CHUNK_SIZE as f64 * ratio).ceil() as usize + 2 * upper_bound,
    )?;

    let peak = output
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
        .map(|(i, _)| i)
        .unwrap_or_default();
    let expected = (IMPULSE_POSITION as f64 * ratio).round() as usize;
    let delay = peak.saturating_sub(expected);

    tracing::debug!(from_rate, to_rate, delay, "Measured resampler delay");

    DELAY_CACHE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key, delay);
    Ok(delay)
}
