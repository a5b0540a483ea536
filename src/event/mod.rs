//! Input objects consumed by the taggers.
//!
//! Everything here is already reconstructed and identified upstream; the taggers only borrow
//! these values and never mutate them.

use serde::{Deserialize, Serialize};

use crate::kinematics::LorentzVector;

/// Jet quality tiers evaluated upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JetIdFlags {
    #[serde(default)]
    pub tight: bool,
    #[serde(default)]
    pub tight2017: bool,
    #[serde(default)]
    pub tight2018: bool,
}

/// A reconstructed jet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jet {
    pub p4: LorentzVector,

    /// RMS of the jet constituent shape, used to reject forward noise.
    #[serde(default)]
    pub rms: f64,

    /// Pile-up identification MVA output.
    #[serde(default)]
    pub pu_jet_id_mva: f64,

    /// Pile-up identification decision per primary vertex index.
    #[serde(default)]
    pub pu_jet_id_by_vertex: Vec<bool>,

    #[serde(default)]
    pub jet_id: JetIdFlags,

    /// DeepCSV `probb` output.
    #[serde(default)]
    pub btag_probb: f64,

    /// DeepCSV `probbb` output.
    #[serde(default)]
    pub btag_probbb: f64,
}

impl Jet {
    pub fn new(p4: LorentzVector) -> Self {
        Self {
            p4,
            rms: 0.0,
            pu_jet_id_mva: 0.0,
            pu_jet_id_by_vertex: Vec::new(),
            jet_id: JetIdFlags::default(),
            btag_probb: 0.0,
            btag_probbb: 0.0,
        }
    }

    #[inline]
    pub fn pt(&self) -> f64 {
        self.p4.pt()
    }

    #[inline]
    pub fn eta(&self) -> f64 {
        self.p4.eta()
    }

    #[inline]
    pub fn phi(&self) -> f64 {
        self.p4.phi()
    }

    /// Pile-up ID decision with respect to the given vertex; unknown vertices fail.
    pub fn passes_pu_jet_id(&self, vertex_index: usize) -> bool {
        self.pu_jet_id_by_vertex
            .get(vertex_index)
            .copied()
            .unwrap_or(false)
    }

    /// Sum of the two b-quark probabilities.
    #[inline]
    pub fn btag(&self) -> f64 {
        self.btag_probb + self.btag_probbb
    }
}

/// A reconstructed photon with its identification score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photon {
    pub p4: LorentzVector,
    pub id_mva: f64,
}

impl Photon {
    pub fn new(p4: LorentzVector, id_mva: f64) -> Self {
        Self { p4, id_mva }
    }

    #[inline]
    pub fn pt(&self) -> f64 {
        self.p4.pt()
    }

    #[inline]
    pub fn eta(&self) -> f64 {
        self.p4.eta()
    }

    #[inline]
    pub fn phi(&self) -> f64 {
        self.p4.phi()
    }
}

/// Two-photon candidate being tagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiPhotonCandidate {
    pub leading: Photon,
    pub subleading: Photon,

    /// Which jet collection of the event belongs to this candidate's vertex.
    #[serde(default)]
    pub jet_collection_index: usize,

    /// Primary vertex the pair was reconstructed against.
    #[serde(default)]
    pub vertex_index: usize,

    /// Photon-pair classifier output, used by the lepton channel preselection.
    #[serde(default)]
    pub mva_result: f64,
}

impl DiPhotonCandidate {
    pub fn new(leading: Photon, subleading: Photon) -> Self {
        Self {
            leading,
            subleading,
            jet_collection_index: 0,
            vertex_index: 0,
            mva_result: 0.0,
        }
    }

    #[inline]
    pub fn p4(&self) -> LorentzVector {
        self.leading.p4 + self.subleading.p4
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.p4().mass()
    }

    /// Scalar pt sum of the two photons.
    #[inline]
    pub fn sum_pt(&self) -> f64 {
        self.leading.pt() + self.subleading.pt()
    }

    /// Both photons, leading first.
    #[inline]
    pub fn photons(&self) -> [&Photon; 2] {
        [&self.leading, &self.subleading]
    }
}

/// Lepton flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    Electron,
    Muon,
}

impl Flavor {
    /// PDG identifier magnitude, used as the lepton-type spectator.
    pub fn pdg_id(self) -> u32 {
        match self {
            Flavor::Electron => 11,
            Flavor::Muon => 13,
        }
    }
}

/// An identified lepton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lepton {
    pub p4: LorentzVector,
    pub flavor: Flavor,
}

impl Lepton {
    pub fn new(p4: LorentzVector, flavor: Flavor) -> Self {
        Self { p4, flavor }
    }

    #[inline]
    pub fn pt(&self) -> f64 {
        self.p4.pt()
    }

    #[inline]
    pub fn eta(&self) -> f64 {
        self.p4.eta()
    }

    #[inline]
    pub fn phi(&self) -> f64 {
        self.p4.phi()
    }
}

/// All objects of one collision event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: u64,

    /// Jet collections, one per vertex hypothesis.
    #[serde(default)]
    pub jet_collections: Vec<Vec<Jet>>,

    #[serde(default)]
    pub diphotons: Vec<DiPhotonCandidate>,

    #[serde(default)]
    pub muons: Vec<Lepton>,

    #[serde(default)]
    pub electrons: Vec<Lepton>,
}

impl Event {
    /// Jet collection for a candidate, if the event carries it.
    pub fn jets_for(&self, candidate: &DiPhotonCandidate) -> Option<&[Jet]> {
        self.jet_collections
            .get(candidate.jet_collection_index)
            .map(Vec::as_slice)
    }
}
