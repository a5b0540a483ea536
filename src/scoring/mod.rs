//! Scoring-model seam and the hadronic DNN adapter.
//!
//! [`ScoringModel`] is the only thing the taggers know about a trained model: named inputs in,
//! named class scores out. [`DnnScorer`] implements it with a candle feed-forward network loaded
//! from a model directory:
//!
//! ```text
//! model_dir/
//!   model.json          {"hidden_sizes": [64, 32], "activation": "relu"}
//!   model.safetensors   layers.{i}.weight|bias, output.weight|bias
//! ```
//!
//! [`VhHadScorer`] sits between the hadronic tagger and the model. It never calls the model when
//! the candidate has no dijet or an input is missing; the scores then stay at the sentinel.

pub mod adapter;
pub mod config;
pub mod device;
pub mod dnn;
pub mod error;
pub mod model;
pub mod network;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use adapter::{VH_HAD_CLASS_COUNT, VhHadScorer};
pub use config::{DnnConfig, MODEL_SPEC_FILE, MODEL_WEIGHTS_FILE};
pub use device::ComputeDevice;
pub use dnn::DnnScorer;
pub use error::ScoringError;
pub use model::ScoringModel;
pub use network::{Activation, FeedForwardNet, NetworkSpec};
pub use types::{ClassScores, ScoreMap};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockScoringModel;
