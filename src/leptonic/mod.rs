//! Lepton-pair channel: photon-pair candidates recoiling against a same-flavour lepton pair.
//!
//! Per candidate the tagger runs photon preselection, picks a dilepton, cleans the jets against
//! photons and leptons, scores the STXS and anomalous-coupling classifiers, and places the
//! candidate into the first matching `(STXS, 0M)` bracket of [`ZhLeptonicConfig::ac_boundaries`].
//! Candidates without a bracket produce no tag.

pub mod config;
pub mod features;
pub mod selection;

#[cfg(test)]
mod tests;

pub use config::{
    DEFAULT_AC_BOUNDARIES, ZH_AC_INPUTS, ZH_OUTPUT_CLASSES, ZH_STXS_INPUTS, ZhLeptonicConfig,
};
pub use selection::{CleanedJets, DileptonSelection, LeptonPair};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::event::{Event, Flavor};
use crate::features::FeatureMap;
use crate::scoring::{DnnConfig, DnnScorer, ScoringError, ScoringModel};
use crate::tagger::TaggerError;

/// Reconstructed tag assigned to a categorized candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoTag {
    #[serde(rename = "RECO_ZH_LEP_Tag0")]
    ZhLepTag0,
    #[serde(rename = "RECO_ZH_LEP_Tag1")]
    ZhLepTag1,
    /// Category beyond the two defined tags.
    LogicError,
}

impl RecoTag {
    pub fn from_category(category: usize) -> Self {
        match category {
            0 => RecoTag::ZhLepTag0,
            1 => RecoTag::ZhLepTag1,
            _ => RecoTag::LogicError,
        }
    }
}

/// One tagged photon-pair candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZhLeptonicTag {
    pub diphoton_index: usize,
    pub category: usize,
    pub reco_tag: RecoTag,

    pub stxs_score: f64,
    /// Pure anomalous 0M score; also the second categorization axis.
    pub ac_0m_score: f64,
    pub ac_0ph_score: f64,
    pub ac_0l1_score: f64,

    /// Flavour of the pair that drove the kinematics.
    pub lepton_type: Flavor,
    pub dileptons: DileptonSelection,
    pub jets: CleanedJets,
}

/// A classifier whose score is one named output.
struct ChannelModel {
    model: Box<dyn ScoringModel>,
    class: String,
}

impl ChannelModel {
    fn new(model: Box<dyn ScoringModel>, config: &DnnConfig) -> Result<Self, ScoringError> {
        let class = config
            .output_classes
            .first()
            .cloned()
            .ok_or_else(|| ScoringError::InvalidConfig {
                reason: "lepton-channel model names no output class".to_string(),
            })?;
        Ok(Self { model, class })
    }

    fn load(config: &DnnConfig) -> Result<Self, ScoringError> {
        let model = DnnScorer::load(config.clone())?;
        Self::new(Box::new(model), config)
    }

    fn score(&self, inputs: &FeatureMap) -> Result<f64, ScoringError> {
        let outputs = self.model.evaluate(inputs)?;
        outputs
            .get(&self.class)
            .copied()
            .ok_or_else(|| ScoringError::UnknownOutputClass {
                name: self.class.clone(),
            })
    }
}

/// Tagger of the lepton-pair channel.
pub struct ZhLeptonicTagger {
    config: ZhLeptonicConfig,
    stxs: ChannelModel,
    ac_0m: ChannelModel,
    ac_0ph: ChannelModel,
    ac_0l1: ChannelModel,
}

impl std::fmt::Debug for ZhLeptonicTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZhLeptonicTagger")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ZhLeptonicTagger {
    /// Validates `config` and loads the four classifiers it names.
    pub fn new(config: ZhLeptonicConfig) -> Result<Self, ScoringError> {
        config.validate()?;

        let stxs = ChannelModel::load(&config.stxs_model)?;
        let ac_0m = ChannelModel::load(&config.ac_model_0m)?;
        let ac_0ph = ChannelModel::load(&config.ac_model_0ph)?;
        let ac_0l1 = ChannelModel::load(&config.ac_model_0l1)?;

        info!(
            stxs_loaded = !config.stxs_model.is_stub(),
            ac_loaded = !config.ac_model_0m.is_stub(),
            categories = config.ac_boundaries.len(),
            "Lepton-pair tagger ready"
        );

        Ok(Self {
            config,
            stxs,
            ac_0m,
            ac_0ph,
            ac_0l1,
        })
    }

    /// Uses caller-provided models; each is read at the first output class its config names.
    pub fn with_models(
        config: ZhLeptonicConfig,
        stxs: Box<dyn ScoringModel>,
        ac_0m: Box<dyn ScoringModel>,
        ac_0ph: Box<dyn ScoringModel>,
        ac_0l1: Box<dyn ScoringModel>,
    ) -> Result<Self, ScoringError> {
        config.validate()?;

        Ok(Self {
            stxs: ChannelModel::new(stxs, &config.stxs_model)?,
            ac_0m: ChannelModel::new(ac_0m, &config.ac_model_0m)?,
            ac_0ph: ChannelModel::new(ac_0ph, &config.ac_model_0ph)?,
            ac_0l1: ChannelModel::new(ac_0l1, &config.ac_model_0l1)?,
            config,
        })
    }

    pub fn config(&self) -> &ZhLeptonicConfig {
        &self.config
    }

    /// Tags one candidate; `Ok(None)` when it fails a requirement or lands in no category.
    pub fn tag(
        &self,
        event: &Event,
        diphoton_index: usize,
    ) -> Result<Option<ZhLeptonicTag>, TaggerError> {
        let Some(diphoton) = event.diphotons.get(diphoton_index) else {
            return Ok(None);
        };

        if !selection::passes_photon_preselection(&self.config, diphoton) {
            debug!(diphoton_index, "photon preselection failed");
            return Ok(None);
        }

        let dileptons =
            selection::select_dileptons(&self.config, &event.muons, &event.electrons, diphoton);
        let Some(pair) = dileptons.primary() else {
            debug!(diphoton_index, "no dilepton in mass window");
            return Ok(None);
        };

        let jets =
            event
                .jets_for(diphoton)
                .ok_or_else(|| TaggerError::MissingJetCollection {
                    index: diphoton.jet_collection_index,
                    available: event.jet_collections.len(),
                })?;
        let cleaned = selection::clean_jets(&self.config, jets, diphoton, pair);

        let stxs_inputs = features::stxs_inputs(diphoton, pair, &cleaned);
        let ac_inputs = features::ac_inputs(diphoton, &dileptons);

        let stxs_score = self.stxs.score(&stxs_inputs)?;
        let ac_0m_score = self.ac_0m.score(&ac_inputs)?;
        let ac_0ph_score = self.ac_0ph.score(&ac_inputs)?;
        let ac_0l1_score = self.ac_0l1.score(&ac_inputs)?;

        let Some(category) = self.config.ac_boundaries.choose(stxs_score, ac_0m_score) else {
            debug!(diphoton_index, stxs_score, ac_0m_score, "no category");
            return Ok(None);
        };

        let reco_tag = RecoTag::from_category(category);
        debug!(diphoton_index, category, ?reco_tag, "candidate tagged");

        Ok(Some(ZhLeptonicTag {
            diphoton_index,
            category,
            reco_tag,
            stxs_score,
            ac_0m_score,
            ac_0ph_score,
            ac_0l1_score,
            lepton_type: pair.flavor(),
            jets: cleaned,
            dileptons: dileptons.clone(),
        }))
    }

    /// Tags every candidate of `event`, in candidate order.
    pub fn tag_event(&self, event: &Event) -> Result<Vec<ZhLeptonicTag>, TaggerError> {
        let mut tags = Vec::new();
        for index in 0..event.diphotons.len() {
            if let Some(tag) = self.tag(event, index)? {
                tags.push(tag);
            }
        }
        Ok(tags)
    }
}
