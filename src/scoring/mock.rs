use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::ScoringError;
use super::model::ScoringModel;
use super::types::ScoreMap;
use crate::constants::VH_HAD_DNN_CLASSES;
use crate::features::FeatureMap;

/// Fixed-output model that counts its invocations.
///
/// Clones share the counter, so a test can keep one handle and give the other to a tagger.
#[derive(Debug, Clone, Default)]
pub struct MockScoringModel {
    outputs: ScoreMap,
    required_inputs: Vec<String>,
    calls: Arc<AtomicUsize>,
}

impl MockScoringModel {
    pub fn new<I, S>(outputs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            outputs: outputs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            required_inputs: Vec::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Background 0.2, SM 0.5, anomalous 0.3 under the default class names.
    pub fn vh_had() -> Self {
        Self::new(VH_HAD_DNN_CLASSES.into_iter().zip([0.2, 0.5, 0.3]))
    }

    /// Inputs whose absence makes [`ScoringModel::evaluate`] fail with `MissingFeature`.
    pub fn with_required_inputs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_inputs = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ScoringModel for MockScoringModel {
    fn evaluate(&self, inputs: &FeatureMap) -> Result<ScoreMap, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(name) = self
            .required_inputs
            .iter()
            .find(|n| !inputs.contains_key(n.as_str()))
        {
            return Err(ScoringError::MissingFeature { name: name.clone() });
        }

        Ok(self.outputs.clone())
    }
}
