//! vhtag library crate (used by the batch binary and integration tests).
//!
//! Tags photon-pair candidates against a hadronically or leptonically decaying vector boson.
//!
//! # Public API Surface
//!
//! ## Hadronic channel
//! - [`VhHadTagger`], [`VhHadResult`] - Per-event driver and its result record
//! - [`JetSelector`], [`JetFilter`], [`GreedyRanker`] - Filter, rank and merge stages
//! - [`DijetFeatures`] - Derived kinematics of the leading jet pair
//! - [`VhHadScorer`] - Packs model inputs and unpacks the three class scores
//!
//! ## Lepton-pair channel
//! - [`ZhLeptonicTagger`], [`ZhLeptonicTag`], [`RecoTag`]
//!
//! ## Scoring
//! - [`ScoringModel`] - Named inputs to named class scores
//! - [`DnnScorer`] - candle feed-forward backend with a stub mode
//! - [`CategoryBoundaries`] - Ordered two-score bracket lookup shared by the channels
//!
//! ## Configuration
//! - [`Config`] - Batch binary I/O from `VHTAG_*` environment variables
//! - [`TaggerConfig`] - Every tagger section, loadable from JSON
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod categorize;
pub mod config;
pub mod constants;
pub mod event;
pub mod features;
pub mod kinematics;
pub mod leptonic;
pub mod scoring;
pub mod selection;
pub mod tagger;

pub use categorize::{Bracket, CategoryBoundaries};
pub use config::{Config, ConfigError, TaggerConfig};
pub use constants::{MISSING_OBJECT_DEFAULT, SENTINEL, VH_HAD_DNN_CLASSES, VH_HAD_DNN_INPUTS};
pub use event::{DiPhotonCandidate, Event, Flavor, Jet, JetIdFlags, Lepton, Photon};
pub use features::{DIJET_FEATURE_COUNT, DijetFeatures, FeatureMap, vh_had_dnn_inputs};
pub use kinematics::{LorentzVector, delta_phi, delta_r};
pub use leptonic::{RecoTag, ZhLeptonicConfig, ZhLeptonicTag, ZhLeptonicTagger};
pub use scoring::{
    ClassScores, ComputeDevice, DnnConfig, DnnScorer, ScoreMap, ScoringError, ScoringModel,
    VhHadScorer,
};
pub use selection::{
    GreedyRanker, JetFilter, JetIdLevel, JetSelectionConfig, JetSelector, MergeOutcome,
    MergeSide, RankedJets, Rejection, Selection, SelectionStage, Slot,
};
pub use tagger::{EventRecord, TaggerError, VhHadResult, VhHadTagger};

#[cfg(any(test, feature = "mock"))]
pub use scoring::MockScoringModel;
