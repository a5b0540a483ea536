use candle_core::{Device, Tensor};
use tracing::{debug, info, warn};

use super::config::{DnnConfig, MODEL_SPEC_FILE, MODEL_WEIGHTS_FILE};
use super::error::ScoringError;
use super::model::ScoringModel;
use super::network::FeedForwardNet;
use super::types::ScoreMap;
use crate::config::ConfigError;
use crate::features::FeatureMap;

/// [`ScoringModel`] backed by a candle feed-forward network.
///
/// Without a model directory it runs as a stub: inputs are still gathered and normalized, and a
/// deterministic softmax over placeholder logits stands in for the network.
pub struct DnnScorer {
    device: Device,
    config: DnnConfig,
    model: Option<FeedForwardNet>,
}

impl std::fmt::Debug for DnnScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnnScorer")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("model_loaded", &self.model.is_some())
            .finish()
    }
}

impl DnnScorer {
    pub fn load(config: DnnConfig) -> Result<Self, ScoringError> {
        config.validate()?;

        let device = config.device.open()?;

        let Some(ref model_dir) = config.model_dir else {
            warn!(
                inputs = config.input_names.len(),
                outputs = config.output_classes.len(),
                "No model directory configured, scores are placeholders"
            );
            return Ok(Self::create_stub(device, config));
        };

        if !model_dir.exists() {
            return Err(ConfigError::PathNotFound {
                path: model_dir.clone(),
            }
            .into());
        }
        if !model_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: model_dir.clone(),
            }
            .into());
        }

        for file in [MODEL_SPEC_FILE, MODEL_WEIGHTS_FILE] {
            if !model_dir.join(file).is_file() {
                return Err(ScoringError::ModelLoadFailed {
                    reason: format!("Missing {file} in {}", model_dir.display()),
                });
            }
        }

        info!(
            model_dir = %model_dir.display(),
            inputs = config.input_names.len(),
            outputs = config.output_classes.len(),
            "Loading scoring model"
        );

        let model = FeedForwardNet::load(
            model_dir,
            config.input_names.len(),
            config.output_classes.len(),
            &device,
        )
        .map_err(|e| ScoringError::ModelLoadFailed {
            reason: format!("Failed to load network from {}: {e}", model_dir.display()),
        })?;

        info!(hidden_layers = model.depth(), "Scoring model loaded");

        Ok(Self {
            device,
            config,
            model: Some(model),
        })
    }

    pub fn stub() -> Result<Self, ScoringError> {
        Self::load(DnnConfig::stub())
    }

    fn create_stub(device: Device, config: DnnConfig) -> Self {
        Self {
            device,
            config,
            model: None,
        }
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &DnnConfig {
        &self.config
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Inputs in model order, normalized when shift/scale are configured.
    fn gather_inputs(&self, inputs: &FeatureMap) -> Result<Vec<f64>, ScoringError> {
        let config = &self.config;
        let normalize = !config.input_shift.is_empty();

        config
            .input_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = inputs
                    .get(name)
                    .copied()
                    .ok_or_else(|| ScoringError::MissingFeature { name: name.clone() })?;
                Ok(if normalize {
                    (value - config.input_shift[i]) / config.input_scale[i]
                } else {
                    value
                })
            })
            .collect()
    }

    fn placeholder_probabilities(&self, values: &[f64]) -> Vec<f64> {
        let mean = values.iter().sum::<f64>() / values.len().max(1) as f64;
        let anchor = mean.tanh();
        let logits: Vec<f64> = (0..self.config.output_classes.len())
            .map(|k| anchor * (k as f64 + 1.0) / 2.0)
            .collect();
        softmax(&logits)
    }
}

impl ScoringModel for DnnScorer {
    fn evaluate(&self, inputs: &FeatureMap) -> Result<ScoreMap, ScoringError> {
        let values = self.gather_inputs(inputs)?;

        let probabilities: Vec<f64> = match &self.model {
            Some(model) => {
                let data: Vec<f32> = values.iter().map(|&v| v as f32).collect();
                let xs = Tensor::from_vec(data, (1, values.len()), &self.device)?;
                model
                    .forward(&xs)?
                    .flatten_all()?
                    .to_vec1::<f32>()?
                    .into_iter()
                    .map(f64::from)
                    .collect()
            }
            None => self.placeholder_probabilities(&values),
        };

        if probabilities.len() != self.config.output_classes.len() {
            return Err(ScoringError::InferenceFailed {
                reason: format!(
                    "model produced {} outputs, {} classes configured",
                    probabilities.len(),
                    self.config.output_classes.len()
                ),
            });
        }

        debug!(
            outputs = probabilities.len(),
            model_loaded = self.model.is_some(),
            "Evaluated scoring model"
        );

        Ok(self
            .config
            .output_classes
            .iter()
            .cloned()
            .zip(probabilities)
            .collect())
    }
}

fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&l| (l - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
