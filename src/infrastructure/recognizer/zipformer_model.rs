use std::path::Path;
use std::sync::Mutex;

use sherpa_rs::transducer::{TransducerConfig, TransducerRecognizer};

use crate::application::ports::TranscriberError;

use super::model_downloader::ModelArtifacts;
use super::speech_model::SpeechModel;

const FEATURE_DIM: i32 = 80;
const DECODING_METHOD: &str = "greedy_search";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeDevice {
    Cpu,
    Cuda,
}

impl ComputeDevice {
    pub fn from_flag(use_cuda: bool) -> Self {
        if use_cuda { Self::Cuda } else { Self::Cpu }
    }

    pub fn provider(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Cuda => "cuda",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ZipformerConfig {
    pub sample_rate: u32,
    pub num_threads: usize,
    pub device: ComputeDevice,
}

/// Offline Zipformer transducer run through sherpa-onnx.
///
/// The underlying recognizer needs `&mut` access and is not documented as
/// safe for concurrent use, so calls are serialized behind a mutex. Every
/// call decodes on its own fresh stream.
pub struct ZipformerModel {
    recognizer: Mutex<TransducerRecognizer>,
    sample_rate: u32,
}

impl ZipformerModel {
    pub fn load(
        artifacts: &ModelArtifacts,
        config: &ZipformerConfig,
    ) -> Result<Self, TranscriberError> {
        let missing = artifacts.missing();
        if !missing.is_empty() {
            return Err(TranscriberError::ModelLoadFailed(format!(
                "missing model files: {:?}",
                missing
            )));
        }

        tracing::info!(
            dir = %artifacts.dir.display(),
            device = config.device.provider(),
            num_threads = config.num_threads,
            sample_rate = config.sample_rate,
            "Initializing Zipformer transducer"
        );

        let transducer_config = TransducerConfig {
            encoder: path_string(&artifacts.encoder)?,
            decoder: path_string(&artifacts.decoder)?,
            joiner: path_string(&artifacts.joiner)?,
            tokens: path_string(&artifacts.tokens)?,
            num_threads: config.num_threads as i32,
            sample_rate: config.sample_rate as i32,
            feature_dim: FEATURE_DIM,
            decoding_method: DECODING_METHOD.to_string(),
            provider: Some(config.device.provider().to_string()),
            debug: false,
            ..Default::default()
        };

        let recognizer = TransducerRecognizer::new(transducer_config)
            .map_err(|e| TranscriberError::ModelLoadFailed(format!("transducer: {}", e)))?;

        tracing::info!("Zipformer transducer loaded successfully");

        Ok(Self {
            recognizer: Mutex::new(recognizer),
            sample_rate: config.sample_rate,
        })
    }
}

impl SpeechModel for ZipformerModel {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn recognize(&self, samples: &[f32]) -> Result<String, TranscriberError> {
        let mut recognizer = self.recognizer.lock().map_err(|_| {
            TranscriberError::RecognitionFailed("recognizer lock poisoned".to_string())
        })?;
        Ok(recognizer.transcribe(self.sample_rate, samples))
    }
}

fn path_string(path: &Path) -> Result<String, TranscriberError> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        TranscriberError::ModelLoadFailed(format!("non UTF-8 model path: {}", path.display()))
    })
}
