use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::boosting::GradientBoostedRegressor;
use super::features::SkillVocabulary;

/// Bumped whenever the serialized layout of the model or vocabulary changes.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Persisted unit binding a trained model to the vocabulary it was trained with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub saved_at: DateTime<Utc>,
    pub vocabulary: SkillVocabulary,
    pub model: GradientBoostedRegressor,
}

impl ModelArtifact {
    pub fn new(model: GradientBoostedRegressor, vocabulary: SkillVocabulary) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            saved_at: Utc::now(),
            vocabulary,
            model,
        }
    }
}

/// Error raised while reading or writing a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("no trained model to save")]
    NoModel,
    #[error("model artifact not found at {0}")]
    Missing(PathBuf),
    #[error("failed to access model artifact at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("model artifact at {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("model artifact format v{found} is not supported (expected v{expected})")]
    IncompatibleVersion { found: u32, expected: u32 },
    #[error("model expects {model} features but vocabulary encodes {vocabulary}")]
    VocabularyMismatch { model: usize, vocabulary: usize },
}

/// Write the artifact through a sibling temp file so readers never observe a partial write.
pub fn write(path: &Path, artifact: &ModelArtifact) -> Result<(), ArtifactError> {
    let io_error = |source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let payload = serde_json::to_vec(artifact).map_err(|source| ArtifactError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    let staging = staging_path(path);
    let mut file = fs::File::create(&staging).map_err(io_error)?;
    file.write_all(&payload).map_err(io_error)?;
    file.sync_all().map_err(io_error)?;
    drop(file);
    fs::rename(&staging, path).map_err(io_error)?;

    Ok(())
}

/// Read and validate an artifact.
pub fn read(path: &Path) -> Result<ModelArtifact, ArtifactError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ArtifactError::Missing(path.to_path_buf()))
        }
        Err(source) => {
            return Err(ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let header: ArtifactHeader =
        serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    if header.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(ArtifactError::IncompatibleVersion {
            found: header.format_version,
            expected: ARTIFACT_FORMAT_VERSION,
        });
    }

    let artifact: ModelArtifact =
        serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    if artifact.model.feature_count() != artifact.vocabulary.feature_len() {
        return Err(ArtifactError::VocabularyMismatch {
            model: artifact.model.feature_count(),
            vocabulary: artifact.vocabulary.feature_len(),
        });
    }

    Ok(artifact)
}

#[derive(Deserialize)]
struct ArtifactHeader {
    format_version: u32,
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
