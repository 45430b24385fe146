use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the model lifecycle (training, inference, persistence)
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model must be trained before making predictions")]
    NotTrained,

    #[error("Corrupt model artifact at {path:?}: {reason}")]
    CorruptArtifact { path: PathBuf, reason: String },

    #[error("I/O failure on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Training failed: {reason}")]
    Training { reason: String },

    #[error("Invalid sensor input: {reason}")]
    InvalidInput { reason: String },
}

impl ModelError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ModelError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn training(reason: impl ToString) -> Self {
        ModelError::Training {
            reason: reason.to_string(),
        }
    }
}
