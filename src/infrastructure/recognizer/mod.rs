mod gateway;
mod gateway_cell;
pub mod model_downloader;
mod speech_model;
mod text_normalizer;
mod zipformer_model;

pub use gateway::{GatewayLoadError, RecognizerConfig, RecognizerGateway};
pub use gateway_cell::GatewayCell;
pub use model_downloader::{
    ModelArtifacts, ModelDownloadError, ModelFiles, ModelSource, resolve_model_dir, safe_dir_name,
};
pub use speech_model::SpeechModel;
pub use text_normalizer::normalize_transcript;
pub use zipformer_model::{ComputeDevice, ZipformerConfig, ZipformerModel};
