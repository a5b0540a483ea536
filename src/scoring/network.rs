use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_nn::{Linear, Module, VarBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::config::{MODEL_SPEC_FILE, MODEL_WEIGHTS_FILE};

/// Hidden-layer nonlinearity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Relu,
    Tanh,
    Elu,
}

impl Activation {
    fn apply(self, xs: &Tensor) -> Result<Tensor> {
        match self {
            Activation::Relu => xs.relu(),
            Activation::Tanh => xs.tanh(),
            Activation::Elu => xs.elu(1.0),
        }
    }
}

/// Contents of `model.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub hidden_sizes: Vec<usize>,
    #[serde(default)]
    pub activation: Activation,
}

struct FeedForwardImpl {
    hidden: Vec<Linear>,
    output: Linear,
    activation: Activation,
}

impl FeedForwardImpl {
    fn load(vb: VarBuilder, spec: &NetworkSpec, n_inputs: usize, n_outputs: usize) -> Result<Self> {
        let mut hidden = Vec::with_capacity(spec.hidden_sizes.len());
        let mut width = n_inputs;
        for (i, &size) in spec.hidden_sizes.iter().enumerate() {
            hidden.push(candle_nn::linear(width, size, vb.pp(format!("layers.{i}")))?);
            width = size;
        }
        let output = candle_nn::linear(width, n_outputs, vb.pp("output"))?;

        Ok(Self {
            hidden,
            output,
            activation: spec.activation,
        })
    }

    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        let mut xs = xs.clone();
        for layer in &self.hidden {
            xs = self.activation.apply(&layer.forward(&xs)?)?;
        }
        let logits = self.output.forward(&xs)?;
        candle_nn::ops::softmax_last_dim(&logits)
    }
}

/// Dense network with a softmax head, shared cheaply between scorers.
#[derive(Clone)]
pub struct FeedForwardNet(std::sync::Arc<FeedForwardImpl>);

impl FeedForwardNet {
    pub fn load<P: AsRef<Path>>(
        model_dir: P,
        n_inputs: usize,
        n_outputs: usize,
        device: &Device,
    ) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let spec_path = model_dir.join(MODEL_SPEC_FILE);
        let weights_path = model_dir.join(MODEL_WEIGHTS_FILE);

        let spec_content = std::fs::read_to_string(spec_path)?;
        let spec: NetworkSpec = serde_json::from_str(&spec_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse {MODEL_SPEC_FILE}: {e}")))?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let model = FeedForwardImpl::load(vb, &spec, n_inputs, n_outputs)?;

        Ok(Self(std::sync::Arc::new(model)))
    }

    /// Class probabilities for a `(batch, n_inputs)` tensor.
    pub fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        self.0.forward(xs)
    }

    pub fn depth(&self) -> usize {
        self.0.hidden.len()
    }
}
