use std::path::PathBuf;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File};
use serde::Deserialize;

use crate::domain::{ApiKeyParseError, ApiKeyRegistry};
use crate::infrastructure::observability::TracingConfig;
use crate::infrastructure::recognizer::{
    ComputeDevice, ModelFiles, ModelSource, RecognizerConfig, ZipformerConfig,
};

use super::Environment;

/// Local time with milliseconds and UTC offset, e.g. `2024-05-01 09:30:12.345+07:00`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f%:z";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid environment: {0}")]
    Environment(String),
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    ApiKeys(#[from] ApiKeyParseError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Filled from `APP_ENVIRONMENT` by the environment source.
    #[serde(default)]
    pub environment: Environment,
    pub application: ApplicationSettings,
    pub logging: LoggingSettings,
    pub auth: AuthSettings,
    pub audio: AudioSettings,
    pub model: ModelSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
    pub timestamp_format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// JSON array or comma separated list; empty disables auth.
    pub api_keys: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioSettings {
    pub max_upload_bytes: usize,
    pub ffmpeg_binary: String,
    pub blocking_workers: usize,
    /// Zero disables the per-job timeout.
    pub job_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    pub repo_id: String,
    pub revision: Option<String>,
    pub encoder: String,
    pub decoder: String,
    pub joiner: String,
    pub tokens: String,
    pub num_threads: usize,
    pub use_cuda: bool,
    pub hf_token: Option<String>,
    pub hf_endpoint: Option<String>,
    pub weights_dir: String,
    pub force_download: bool,
    pub sample_rate: u32,
    pub normalize_text: bool,
}

impl Settings {
    /// Loads `.env`, then layers defaults, `appsettings.<env>` and
    /// `APP_`-prefixed variables (`__` separates sections, e.g.
    /// `APP_MODEL__REPO_ID`).
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env().map_err(SettingsError::Environment)?;
        Self::from_builder(Self::builder(environment)?)
    }

    pub fn builder(
        environment: Environment,
    ) -> Result<ConfigBuilder<DefaultState>, SettingsError> {
        let builder = Config::builder()
            .set_default("environment", environment.as_str())?
            .set_default("application.name", "zipformer-asr-api")?
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 8000)?
            .set_default("application.workers", 4)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .set_default("logging.timestamp_format", DEFAULT_TIMESTAMP_FORMAT)?
            .set_default("auth.api_keys", "")?
            .set_default("audio.max_upload_bytes", 1024 * 1024)?
            .set_default("audio.ffmpeg_binary", "ffmpeg")?
            .set_default("audio.blocking_workers", 2)?
            .set_default("audio.job_timeout_secs", 0)?
            .set_default("model.repo_id", "zipformer/zipformer-asr-base")?
            .set_default("model.encoder", "encoder.onnx")?
            .set_default("model.decoder", "decoder.onnx")?
            .set_default("model.joiner", "joiner.onnx")?
            .set_default("model.tokens", "tokens.txt")?
            .set_default("model.num_threads", 2)?
            .set_default("model.use_cuda", false)?
            .set_default("model.weights_dir", "weights")?
            .set_default("model.force_download", false)?
            .set_default("model.sample_rate", 16_000)?
            .set_default("model.normalize_text", true)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );
        Ok(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn api_key_registry(&self) -> Result<ApiKeyRegistry, SettingsError> {
        Ok(ApiKeyRegistry::parse(&self.auth.api_keys)?)
    }

    pub fn job_timeout(&self) -> Option<Duration> {
        (self.audio.job_timeout_secs > 0).then(|| Duration::from_secs(self.audio.job_timeout_secs))
    }

    pub fn tracing_config(&self) -> TracingConfig {
        TracingConfig {
            app_name: self.application.name.clone(),
            environment: self.environment.to_string(),
            level: self.logging.level.clone(),
            json_format: self.logging.json,
            timestamp_format: self.logging.timestamp_format.clone(),
        }
    }

    pub fn recognizer_config(&self) -> RecognizerConfig {
        let model = &self.model;
        RecognizerConfig {
            source: ModelSource {
                repo_id: model.repo_id.clone(),
                revision: non_blank(model.revision.as_deref()),
                files: ModelFiles {
                    encoder: model.encoder.clone(),
                    decoder: model.decoder.clone(),
                    joiner: model.joiner.clone(),
                    tokens: model.tokens.clone(),
                },
                token: non_blank(model.hf_token.as_deref())
                    .or_else(|| non_blank(std::env::var("HF_TOKEN").ok().as_deref())),
                endpoint: non_blank(model.hf_endpoint.as_deref())
                    .or_else(|| non_blank(std::env::var("HF_ENDPOINT").ok().as_deref())),
                weights_dir: PathBuf::from(&model.weights_dir),
                force_download: model.force_download,
            },
            model: ZipformerConfig {
                sample_rate: model.sample_rate,
                num_threads: model.num_threads.max(1),
                device: ComputeDevice::from_flag(model.use_cuda),
            },
            normalize_text: model.normalize_text,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
