use std::fs;
use std::path::{Path, PathBuf};

use hf_hub::api::sync::ApiBuilder;
use hf_hub::{Repo, RepoType};

/// Hub cache kept next to the flattened model directories.
const HUB_CACHE_DIR: &str = ".hub-cache";

#[derive(Debug, thiserror::Error)]
pub enum ModelDownloadError {
    #[error("failed to prepare {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model hub client: {0}")]
    Hub(String),
    #[error("download failed for {file}: {reason}")]
    Download { file: String, reason: String },
}

/// File names of the four transducer components inside a model repo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    pub encoder: String,
    pub decoder: String,
    pub joiner: String,
    pub tokens: String,
}

impl ModelFiles {
    pub fn names(&self) -> [&str; 4] {
        [&self.encoder, &self.decoder, &self.joiner, &self.tokens]
    }
}

/// Where the model comes from and where it is cached locally.
#[derive(Debug, Clone)]
pub struct ModelSource {
    pub repo_id: String,
    pub revision: Option<String>,
    pub files: ModelFiles,
    pub token: Option<String>,
    /// Hub base URL; `None` means huggingface.co.
    pub endpoint: Option<String>,
    pub weights_dir: PathBuf,
    pub force_download: bool,
}

impl ModelSource {
    pub fn local_dir(&self) -> PathBuf {
        self.weights_dir.join(safe_dir_name(&self.repo_id))
    }
}

/// Resolved on-disk locations of the model components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelArtifacts {
    pub dir: PathBuf,
    pub encoder: PathBuf,
    pub decoder: PathBuf,
    pub joiner: PathBuf,
    pub tokens: PathBuf,
}

impl ModelArtifacts {
    pub fn in_dir(dir: &Path, files: &ModelFiles) -> Self {
        Self {
            dir: dir.to_path_buf(),
            encoder: dir.join(&files.encoder),
            decoder: dir.join(&files.decoder),
            joiner: dir.join(&files.joiner),
            tokens: dir.join(&files.tokens),
        }
    }

    pub fn paths(&self) -> [&Path; 4] {
        [&self.encoder, &self.decoder, &self.joiner, &self.tokens]
    }

    pub fn missing(&self) -> Vec<PathBuf> {
        self.paths()
            .into_iter()
            .filter(|p| !p.is_file())
            .map(Path::to_path_buf)
            .collect()
    }
}

/// `org/model-name` -> `org--model-name`
pub fn safe_dir_name(repo_id: &str) -> String {
    repo_id.trim().replace('/', "--")
}

/// Makes sure every model component is present locally, downloading only
/// what is missing. A complete cache is used without touching the network
/// unless a forced refresh is requested.
pub fn resolve_model_dir(source: &ModelSource) -> Result<ModelArtifacts, ModelDownloadError> {
    let local_dir = source.local_dir();

    if source.force_download && local_dir.exists() {
        tracing::info!(dir = %local_dir.display(), "Forced refresh, removing cached model");
        fs::remove_dir_all(&local_dir).map_err(|e| ModelDownloadError::Filesystem {
            path: local_dir.clone(),
            source: e,
        })?;
    }

    let artifacts = ModelArtifacts::in_dir(&local_dir, &source.files);

    if !source.force_download && artifacts.missing().is_empty() {
        tracing::info!(dir = %local_dir.display(), "Model already cached, skipping download");
        return Ok(artifacts);
    }

    fs::create_dir_all(&local_dir).map_err(|e| ModelDownloadError::Filesystem {
        path: local_dir.clone(),
        source: e,
    })?;

    tracing::info!(
        repo_id = %source.repo_id,
        revision = source.revision.as_deref().unwrap_or("default"),
        dir = %local_dir.display(),
        force_download = source.force_download,
        "Downloading model artifacts"
    );

    download_artifacts(source, &artifacts)?;

    tracing::info!(dir = %local_dir.display(), "Model available");
    Ok(artifacts)
}

fn download_artifacts(
    source: &ModelSource,
    artifacts: &ModelArtifacts,
) -> Result<(), ModelDownloadError> {
    let mut builder = ApiBuilder::new()
        .with_token(source.token.clone())
        .with_cache_dir(source.weights_dir.join(HUB_CACHE_DIR))
        .with_progress(false);
    if let Some(endpoint) = &source.endpoint {
        builder = builder.with_endpoint(endpoint.clone());
    }
    let api = builder
        .build()
        .map_err(|e| ModelDownloadError::Hub(e.to_string()))?;

    let repo = match &source.revision {
        Some(revision) => Repo::with_revision(
            source.repo_id.trim().to_string(),
            RepoType::Model,
            revision.clone(),
        ),
        None => Repo::new(source.repo_id.trim().to_string(), RepoType::Model),
    };
    let repo = api.repo(repo);

    for (name, target) in source.files.names().into_iter().zip(artifacts.paths()) {
        if target.is_file() {
            continue;
        }

        let fetched = if source.force_download {
            repo.download(name)
        } else {
            repo.get(name)
        }
        .map_err(|e| ModelDownloadError::Download {
            file: name.to_string(),
            reason: e.to_string(),
        })?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| ModelDownloadError::Filesystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::copy(&fetched, target).map_err(|e| ModelDownloadError::Filesystem {
            path: target.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(file = name, path = %target.display(), "Model file ready");
    }

    Ok(())
}
