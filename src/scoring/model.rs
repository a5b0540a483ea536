use super::error::ScoringError;
use super::types::ScoreMap;
use crate::features::FeatureMap;

/// A trained function from named inputs to named class scores.
///
/// Implementations are built once and then evaluated read-only, possibly from several threads.
pub trait ScoringModel: Send + Sync {
    /// Evaluates the model. A required input absent from `inputs` is a
    /// [`ScoringError::MissingFeature`]; the model must not run on partial inputs.
    fn evaluate(&self, inputs: &FeatureMap) -> Result<ScoreMap, ScoringError>;
}

impl<T: ScoringModel + ?Sized> ScoringModel for Box<T> {
    fn evaluate(&self, inputs: &FeatureMap) -> Result<ScoreMap, ScoringError> {
        (**self).evaluate(inputs)
    }
}

impl<T: ScoringModel + ?Sized> ScoringModel for std::sync::Arc<T> {
    fn evaluate(&self, inputs: &FeatureMap) -> Result<ScoreMap, ScoringError> {
        (**self).evaluate(inputs)
    }
}
