//! Per-event driver of the hadronic channel.
//!
//! [`VhHadTagger`] owns a validated [`JetSelector`] and one [`VhHadScorer`]; both are built once
//! and reused read-only for every candidate of every event.

pub mod error;
pub mod types;


pub use error::TaggerError;
pub use types::{EventRecord, VhHadResult};

use tracing::{debug, info};

use crate::config::TaggerConfig;
use crate::event::{DiPhotonCandidate, Event, Jet};
use crate::features::{DijetFeatures, vh_had_dnn_inputs};
use crate::scoring::VhHadScorer;
use crate::selection::{JetSelectionConfig, JetSelector, Slot};

fn slot_jet(jets: &[Jet], slot: Option<Slot>) -> Option<&Jet> {
    slot.and_then(|s| jets.get(s.index))
}

#[derive(Debug)]
pub struct VhHadTagger {
    selector: JetSelector,
    scorer: VhHadScorer,
}

impl VhHadTagger {
    /// Validates the selection settings and loads the scoring model once.
    pub fn new(config: &TaggerConfig) -> Result<Self, TaggerError> {
        let selector = JetSelector::new(config.selection.clone())?;
        let scorer = VhHadScorer::from_config(&config.dnn)?;

        info!(
            merge_third_jet = config.selection.merge_third_jet,
            pu_mva = config.selection.pu_mva_enabled(),
            model_dir = ?config.dnn.model_dir,
            "Hadronic tagger ready"
        );

        Ok(Self { selector, scorer })
    }

    pub fn with_scorer(
        selection: JetSelectionConfig,
        scorer: VhHadScorer,
    ) -> Result<Self, TaggerError> {
        Ok(Self {
            selector: JetSelector::new(selection)?,
            scorer,
        })
    }

    pub fn selector(&self) -> &JetSelector {
        &self.selector
    }

    pub fn scorer(&self) -> &VhHadScorer {
        &self.scorer
    }

    /// Runs filter, rank, merge, features and scoring for one candidate.
    pub fn process_candidate(
        &self,
        jets: &[Jet],
        diphoton: &DiPhotonCandidate,
        diphoton_index: usize,
    ) -> Result<VhHadResult, TaggerError> {
        let selection = self.selector.select(jets, diphoton);
        let ranked = selection.ranked;

        let derived = selection.resolved.as_ref().and_then(|resolved| {
            let lead_jet = slot_jet(jets, ranked.lead)?;
            let sublead_jet = slot_jet(jets, ranked.sublead)?;
            let features = DijetFeatures::derive(&resolved.lead, &resolved.sublead, diphoton);
            let inputs = vh_had_dnn_inputs(
                &features,
                &resolved.lead,
                &resolved.sublead,
                diphoton,
                lead_jet,
                sublead_jet,
            );
            Some((features, inputs))
        });

        let scores = self
            .scorer
            .score(derived.as_ref().map(|(_, inputs)| inputs))?;
        let features = derived.map(|(features, _)| features).unwrap_or_default();

        let has_dijet = selection.has_dijet();
        let has_trijet = selection.has_trijet();
        let has_tetrajet = selection.has_tetrajet();
        let resolved = selection.resolved.as_ref();

        debug!(
            diphoton_index,
            stage = ?selection.stage,
            bkg = scores.bkg,
            sm = scores.sm,
            bsm = scores.bsm,
            "candidate processed"
        );

        Ok(VhHadResult {
            diphoton_index,
            lead_jet: ranked.lead.map(|s| s.index),
            sublead_jet: ranked.sublead.map(|s| s.index),
            third_jet: ranked.third.filter(|_| has_trijet).map(|s| s.index),
            fourth_jet: ranked.fourth.filter(|_| has_tetrajet).map(|s| s.index),
            lead_p4: resolved.map(|r| r.lead),
            sublead_p4: resolved.map(|r| r.sublead),
            third_p4: slot_jet(jets, ranked.third)
                .filter(|_| has_trijet)
                .map(|j| j.p4),
            fourth_p4: slot_jet(jets, ranked.fourth)
                .filter(|_| has_tetrajet)
                .map(|j| j.p4),
            has_dijet,
            has_trijet,
            has_tetrajet,
            stage: selection.stage,
            merged_into: resolved.and_then(|r| r.merged_into),
            n_rec_jets: ranked.n_jets,
            features,
            scores,
        })
    }

    /// One result per candidate, in candidate order.
    pub fn process_event(&self, event: &Event) -> Result<Vec<VhHadResult>, TaggerError> {
        let mut results = Vec::with_capacity(event.diphotons.len());

        for (index, diphoton) in event.diphotons.iter().enumerate() {
            let jets = event
                .jets_for(diphoton)
                .ok_or(TaggerError::MissingJetCollection {
                    index: diphoton.jet_collection_index,
                    available: event.jet_collections.len(),
                })?;
            results.push(self.process_candidate(jets, diphoton, index)?);
        }

        debug!(
            event_id = event.id,
            candidates = results.len(),
            with_dijet = results.iter().filter(|r| r.has_dijet).count(),
            "event processed"
        );

        Ok(results)
    }
}
