use serde::{Deserialize, Serialize};

use crate::features::DijetFeatures;
use crate::kinematics::LorentzVector;
use crate::leptonic::ZhLeptonicTag;
use crate::scoring::ClassScores;
use crate::selection::{MergeSide, SelectionStage};

/// Hadronic record of one photon-pair candidate.
///
/// Built fresh per candidate and never mutated afterwards. Without a dijet every feature and
/// score holds the sentinel value, though the lead slot may still be filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VhHadResult {
    pub diphoton_index: usize,

    /// Indices into the candidate's jet collection, one per rank slot.
    pub lead_jet: Option<usize>,
    pub sublead_jet: Option<usize>,
    pub third_jet: Option<usize>,
    pub fourth_jet: Option<usize>,

    /// Leading pair after merge resolution.
    pub lead_p4: Option<LorentzVector>,
    pub sublead_p4: Option<LorentzVector>,
    /// Present only while the trijet flag holds.
    pub third_p4: Option<LorentzVector>,
    /// Present only while the tetrajet flag holds.
    pub fourth_p4: Option<LorentzVector>,

    pub has_dijet: bool,
    pub has_trijet: bool,
    pub has_tetrajet: bool,
    pub stage: SelectionStage,
    pub merged_into: Option<MergeSide>,

    /// Admitted jets above 30 GeV.
    pub n_rec_jets: usize,

    pub features: DijetFeatures,
    pub scores: ClassScores,
}

/// Everything the taggers produced for one event, candidates in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_id: u64,
    pub hadronic: Vec<VhHadResult>,
    pub leptonic: Vec<ZhLeptonicTag>,
}
