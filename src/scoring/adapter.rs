use tracing::debug;

use super::config::DnnConfig;
use super::dnn::DnnScorer;
use super::error::ScoringError;
use super::model::ScoringModel;
use super::types::ClassScores;
use crate::config::ConfigError;
use crate::features::FeatureMap;

/// Number of output classes the hadronic adapter reads.
pub const VH_HAD_CLASS_COUNT: usize = 3;

/// Packs the hadronic DNN inputs, invokes the model and unpacks background, SM and anomalous
/// scores by name.
pub struct VhHadScorer {
    model: Box<dyn ScoringModel>,
    input_names: Vec<String>,
    classes: [String; VH_HAD_CLASS_COUNT],
}

impl std::fmt::Debug for VhHadScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VhHadScorer")
            .field("input_names", &self.input_names)
            .field("classes", &self.classes)
            .finish_non_exhaustive()
    }
}

impl VhHadScorer {
    /// Reads the first three of `output_classes` as (background, SM, anomalous).
    pub fn new(
        model: Box<dyn ScoringModel>,
        input_names: Vec<String>,
        output_classes: &[String],
    ) -> Result<Self, ScoringError> {
        let [bkg, sm, bsm, ..] = output_classes else {
            return Err(ConfigError::TooFewOutputClasses {
                expected: VH_HAD_CLASS_COUNT,
                actual: output_classes.len(),
            }
            .into());
        };

        Ok(Self {
            model,
            input_names,
            classes: [bkg.clone(), sm.clone(), bsm.clone()],
        })
    }

    /// Loads a [`DnnScorer`] for `config` and wraps it.
    pub fn from_config(config: &DnnConfig) -> Result<Self, ScoringError> {
        if config.output_classes.len() < VH_HAD_CLASS_COUNT {
            return Err(ConfigError::TooFewOutputClasses {
                expected: VH_HAD_CLASS_COUNT,
                actual: config.output_classes.len(),
            }
            .into());
        }

        let model = DnnScorer::load(config.clone())?;
        Self::new(
            Box::new(model),
            config.input_names.clone(),
            &config.output_classes,
        )
    }

    pub fn input_names(&self) -> &[String] {
        &self.input_names
    }

    /// Scores one candidate.
    ///
    /// `None` (no dijet) and any missing input yield sentinel scores without running the model.
    /// An output class absent from the model result is an error.
    pub fn score(&self, inputs: Option<&FeatureMap>) -> Result<ClassScores, ScoringError> {
        let Some(inputs) = inputs else {
            return Ok(ClassScores::sentinel());
        };

        if let Some(missing) = self.input_names.iter().find(|n| !inputs.contains_key(*n)) {
            debug!(feature = %missing, "Input feature missing, scores left unset");
            return Ok(ClassScores::sentinel());
        }

        let outputs = match self.model.evaluate(inputs) {
            Ok(outputs) => outputs,
            Err(ScoringError::MissingFeature { name }) => {
                debug!(feature = %name, "Model reported missing input, scores left unset");
                return Ok(ClassScores::sentinel());
            }
            Err(e) => return Err(e),
        };

        let [bkg, sm, bsm] = &self.classes;
        let class = |name: &String| {
            outputs
                .get(name)
                .copied()
                .ok_or_else(|| ScoringError::UnknownOutputClass { name: name.clone() })
        };

        Ok(ClassScores {
            bkg: class(bkg)?,
            sm: class(sm)?,
            bsm: class(bsm)?,
        })
    }
}
