use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum ScoringError {
    /// A model input was never computed. The hadronic adapter turns this into sentinel scores.
    #[error("required input feature '{name}' is missing")]
    MissingFeature { name: String },

    /// The model did not produce a requested output class; model and configuration disagree.
    #[error("model produced no output class '{name}'")]
    UnknownOutputClass { name: String },

    #[error("failed to load scoring model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("scoring model inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("invalid model configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<candle_core::Error> for ScoringError {
    fn from(err: candle_core::Error) -> Self {
        ScoringError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ScoringError {
    fn from(err: std::io::Error) -> Self {
        ScoringError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
