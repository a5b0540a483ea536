//! Hadronic jet selection for one photon pair.
//!
//! Three stages run in order over the candidate's jet collection:
//!
//! 1. [`JetFilter`] admits or rejects each jet against the photon pair.
//! 2. [`GreedyRanker`] fills four rank slots by pt in one pass and counts jets above 30 GeV.
//! 3. [`merge::resolve`] evaluates the third jet and possibly folds it into the leading pair.
//!
//! [`JetSelector`] bundles the three and returns a [`Selection`].

pub mod config;
pub mod filter;
pub mod merge;
pub mod ranker;


pub use config::{JetIdLevel, JetSelectionConfig};
pub use filter::{JetFilter, Rejection};
pub use merge::{MergeOutcome, MergeSide, ThirdJetDecision};
pub use ranker::{GreedyRanker, RankedJets, Slot};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ConfigError;
use crate::event::{DiPhotonCandidate, Jet};

/// Furthest selection state reached by a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionStage {
    NoDijet,
    Dijet,
    /// A third jet was found but lay outside the merge cone of both leading jets.
    TrijetRetracted,
    Trijet,
    Tetrajet,
}

impl SelectionStage {
    /// Whether features and scores are computed for this stage.
    #[inline]
    pub fn has_dijet(self) -> bool {
        self != SelectionStage::NoDijet
    }
}

/// Ranked slots plus the resolved leading pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub ranked: RankedJets,
    pub resolved: Option<MergeOutcome>,
    pub stage: SelectionStage,
}

impl Selection {
    #[inline]
    pub fn has_dijet(&self) -> bool {
        self.resolved.is_some()
    }

    #[inline]
    pub fn has_trijet(&self) -> bool {
        self.resolved.as_ref().is_some_and(|r| r.has_trijet)
    }

    #[inline]
    pub fn has_tetrajet(&self) -> bool {
        self.resolved.as_ref().is_some_and(|r| r.has_tetrajet)
    }
}

/// Filter, rank and merge with one validated configuration.
#[derive(Debug, Clone)]
pub struct JetSelector {
    filter: JetFilter,
}

impl JetSelector {
    pub fn new(config: JetSelectionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            filter: JetFilter::new(config)?,
        })
    }

    pub fn config(&self) -> &JetSelectionConfig {
        self.filter.config()
    }

    pub fn filter(&self) -> &JetFilter {
        &self.filter
    }

    pub fn select(&self, jets: &[Jet], diphoton: &DiPhotonCandidate) -> Selection {
        let mut ranker = GreedyRanker::new();

        for (index, jet) in jets.iter().enumerate() {
            match self.filter.check(jet, diphoton) {
                Ok(()) => ranker.push(index, jet.pt()),
                Err(rejection) => {
                    debug!(index, pt = jet.pt(), reason = %rejection, "jet rejected");
                }
            }
        }

        let ranked = ranker.finish();
        let config = self.filter.config();
        let resolved = merge::resolve(
            &ranked,
            jets,
            config.third_jet_dr_cut,
            config.merge_third_jet,
        );

        let stage = match &resolved {
            None => SelectionStage::NoDijet,
            Some(r) if r.has_tetrajet => SelectionStage::Tetrajet,
            Some(r) if r.has_trijet => SelectionStage::Trijet,
            Some(r) if r.third_jet.is_some_and(|d| d.retracted) => {
                SelectionStage::TrijetRetracted
            }
            Some(_) => SelectionStage::Dijet,
        };

        debug!(
            ?stage,
            lead = ?ranked.lead.map(|s| s.index),
            sublead = ?ranked.sublead.map(|s| s.index),
            n_jets = ranked.n_jets,
            "jet selection complete"
        );

        Selection {
            ranked,
            resolved,
            stage,
        }
    }
}
