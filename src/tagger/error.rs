//! Per-event tagging errors.

use thiserror::Error;

use crate::config::ConfigError;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum TaggerError {
    /// A candidate points at a jet collection the event does not carry.
    #[error("jet collection {index} requested, event has {available}")]
    MissingJetCollection { index: usize, available: usize },

    #[error("scoring error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
