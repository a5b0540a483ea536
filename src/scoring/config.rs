use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::device::ComputeDevice;
use crate::config::{ConfigError, parse_optional_path_from_env};
use crate::constants::{VH_HAD_DNN_CLASSES, VH_HAD_DNN_INPUTS};

/// Architecture file expected inside a model directory.
pub const MODEL_SPEC_FILE: &str = "model.json";

/// Weights file expected inside a model directory.
pub const MODEL_WEIGHTS_FILE: &str = "model.safetensors";

/// Settings of one feed-forward scoring model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnnConfig {
    /// Directory holding `model.json` and `model.safetensors`; stub mode when unset.
    pub model_dir: Option<PathBuf>,

    /// Input feature names, in the order the model was trained with.
    pub input_names: Vec<String>,

    /// Output class names, in the order of the model's output nodes.
    pub output_classes: Vec<String>,

    /// Per-input shift; inputs are fed as `(x - shift) / scale`. Empty disables normalization.
    pub input_shift: Vec<f64>,

    pub input_scale: Vec<f64>,

    pub device: ComputeDevice,
}

impl Default for DnnConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            input_names: VH_HAD_DNN_INPUTS.iter().map(|s| s.to_string()).collect(),
            output_classes: VH_HAD_DNN_CLASSES.iter().map(|s| s.to_string()).collect(),
            input_shift: Vec::new(),
            input_scale: Vec::new(),
            device: ComputeDevice::Cpu,
        }
    }
}

impl DnnConfig {
    const ENV_MODEL_DIR: &'static str = "VHTAG_DNN_MODEL_DIR";
    const ENV_DEVICE: &'static str = "VHTAG_DNN_DEVICE";

    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
            ..Self::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    /// Model with arbitrary named inputs and outputs.
    pub fn with_io<I, O, S, T>(mut self, input_names: I, output_classes: O) -> Self
    where
        I: IntoIterator<Item = S>,
        O: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        self.input_names = input_names.into_iter().map(Into::into).collect();
        self.output_classes = output_classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_normalization(mut self, shift: Vec<f64>, scale: Vec<f64>) -> Self {
        self.input_shift = shift;
        self.input_scale = scale;
        self
    }

    pub fn with_device(mut self, device: ComputeDevice) -> Self {
        self.device = device;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let device = match std::env::var(Self::ENV_DEVICE) {
            Ok(value) => value.parse()?,
            Err(_) => ComputeDevice::default(),
        };

        Ok(Self {
            model_dir: parse_optional_path_from_env(Self::ENV_MODEL_DIR),
            device,
            ..Self::default()
        })
    }

    pub fn is_stub(&self) -> bool {
        self.model_dir.is_none()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.model_dir
            && dir.as_os_str().is_empty()
        {
            return Err(ConfigError::InvalidValue {
                name: "model_dir",
                reason: "cannot be empty when provided".to_string(),
            });
        }

        if !self.device.is_compiled() {
            return Err(ConfigError::InvalidValue {
                name: "device",
                reason: format!("{} support is not compiled into this build", self.device),
            });
        }

        if self.input_names.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "input_names",
                reason: "at least one input is required".to_string(),
            });
        }

        if self.output_classes.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "output_classes",
                reason: "at least one output class is required".to_string(),
            });
        }

        let expected = self.input_names.len();
        for (name, values) in [
            ("input_shift", &self.input_shift),
            ("input_scale", &self.input_scale),
        ] {
            if !values.is_empty() && values.len() != expected {
                return Err(ConfigError::NormalizationLength {
                    name,
                    expected,
                    actual: values.len(),
                });
            }
        }

        if self.input_shift.is_empty() != self.input_scale.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "input_scale",
                reason: "shift and scale must be given together".to_string(),
            });
        }

        if let Some(bad) = self
            .input_scale
            .iter()
            .find(|s| **s == 0.0 || !s.is_finite())
        {
            return Err(ConfigError::InvalidValue {
                name: "input_scale",
                reason: format!("entries must be finite and non-zero, got {bad}"),
            });
        }

        Ok(())
    }
}
