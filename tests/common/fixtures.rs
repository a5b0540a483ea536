//! Test fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;

use candle_core::{DType, Device, Tensor};
use vhtag::event::{DiPhotonCandidate, Event, Flavor, Jet, JetIdFlags, Lepton, Photon};
use vhtag::kinematics::LorentzVector;
use vhtag::scoring::{MODEL_SPEC_FILE, MODEL_WEIGHTS_FILE};

pub const LEAD_PHOTON: (f64, f64, f64) = (70.0, -2.0, -1.5);

pub const SUBLEAD_PHOTON: (f64, f64, f64) = (40.0, -2.2, -1.0);

pub fn p4(pt: f64, eta: f64, phi: f64) -> LorentzVector {
    LorentzVector::from_pt_eta_phi_m(pt, eta, phi, 0.0)
}

pub fn jet(pt: f64, eta: f64, phi: f64) -> Jet {
    let mut jet = Jet::new(p4(pt, eta, phi));
    jet.jet_id = JetIdFlags {
        tight: true,
        tight2017: true,
        tight2018: true,
    };
    jet.pu_jet_id_by_vertex = vec![true];
    jet
}

pub fn diphoton() -> DiPhotonCandidate {
    let (pt1, eta1, phi1) = LEAD_PHOTON;
    let (pt2, eta2, phi2) = SUBLEAD_PHOTON;
    DiPhotonCandidate::new(
        Photon::new(p4(pt1, eta1, phi1), 0.9),
        Photon::new(p4(pt2, eta2, phi2), 0.8),
    )
}

/// Photon pair central enough for the lepton-pair channel, mass about 116 GeV.
pub fn central_diphoton() -> DiPhotonCandidate {
    let mut dipho = DiPhotonCandidate::new(
        Photon::new(p4(70.0, 0.0, 0.0), 0.5),
        Photon::new(p4(50.0, 0.5, 2.5), 0.3),
    );
    dipho.mva_result = 0.2;
    dipho
}

/// Two isolated same-flavour leptons with a mass near 90 GeV.
pub fn z_leptons(flavor: Flavor) -> Vec<Lepton> {
    vec![
        Lepton::new(p4(45.0, 0.3, -1.0), flavor),
        Lepton::new(p4(40.0, -0.4, 2.0), flavor),
    ]
}

#[derive(Default)]
pub struct EventBuilder {
    id: u64,
    jet_collections: Vec<Vec<Jet>>,
    diphotons: Vec<DiPhotonCandidate>,
    muons: Vec<Lepton>,
    electrons: Vec<Lepton>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    /// Adds a jet collection built from `(pt, eta, phi)` triples.
    pub fn jets(mut self, jets: &[(f64, f64, f64)]) -> Self {
        self.jet_collections
            .push(jets.iter().map(|&(pt, eta, phi)| jet(pt, eta, phi)).collect());
        self
    }

    pub fn jet_collection(mut self, jets: Vec<Jet>) -> Self {
        self.jet_collections.push(jets);
        self
    }

    pub fn diphoton(mut self, diphoton: DiPhotonCandidate) -> Self {
        self.diphotons.push(diphoton);
        self
    }

    pub fn muons(mut self, muons: Vec<Lepton>) -> Self {
        self.muons = muons;
        self
    }

    pub fn electrons(mut self, electrons: Vec<Lepton>) -> Self {
        self.electrons = electrons;
        self
    }

    pub fn build(self) -> Event {
        Event {
            id: self.id,
            jet_collections: self.jet_collections,
            diphotons: self.diphotons,
            muons: self.muons,
            electrons: self.electrons,
        }
    }
}

/// Four admitted jets `[60, 55, 35, 20]`; the 35 GeV jet sits 0.64 from the lead and 1.5 from
/// the sublead.
pub fn four_jet_event() -> Event {
    EventBuilder::new()
        .id(7)
        .jets(&[
            (60.0, 0.5, 0.5),
            (55.0, 1.0, 2.5),
            (35.0, 0.9, 1.0),
            (20.0, -0.5, 2.9),
        ])
        .diphoton(diphoton())
        .build()
}

/// Writes a single-hidden-layer network whose output depends only on `output_bias`.
pub fn write_model_dir(dir: &Path, n_inputs: usize, hidden: usize, output_bias: &[f32]) {
    std::fs::write(
        dir.join(MODEL_SPEC_FILE),
        format!(r#"{{"hidden_sizes": [{hidden}], "activation": "relu"}}"#),
    )
    .unwrap();

    let device = Device::Cpu;
    let n_outputs = output_bias.len();
    let mut tensors = HashMap::new();
    tensors.insert(
        "layers.0.weight".to_string(),
        Tensor::zeros((hidden, n_inputs), DType::F32, &device).unwrap(),
    );
    tensors.insert(
        "layers.0.bias".to_string(),
        Tensor::zeros(hidden, DType::F32, &device).unwrap(),
    );
    tensors.insert(
        "output.weight".to_string(),
        Tensor::zeros((n_outputs, hidden), DType::F32, &device).unwrap(),
    );
    tensors.insert(
        "output.bias".to_string(),
        Tensor::new(output_bias, &device).unwrap(),
    );
    candle_core::safetensors::save(&tensors, dir.join(MODEL_WEIGHTS_FILE)).unwrap();
}
