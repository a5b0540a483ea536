//! Object selection of the lepton-pair channel.

use serde::{Deserialize, Serialize};

use super::config::ZhLeptonicConfig;
use crate::event::{DiPhotonCandidate, Flavor, Jet, Lepton};
use crate::kinematics::{LorentzVector, delta_r};

/// Photon kinematics, photon ID and photon-pair classifier requirements.
pub fn passes_photon_preselection(config: &ZhLeptonicConfig, diphoton: &DiPhotonCandidate) -> bool {
    let mass = diphoton.mass();

    if diphoton.leading.pt() < mass * config.lead_pho_over_mass {
        return false;
    }
    if diphoton.subleading.pt() < mass * config.sublead_pho_over_mass {
        return false;
    }
    if diphoton.leading.id_mva <= config.pho_mva_threshold
        || diphoton.subleading.id_mva <= config.pho_mva_threshold
    {
        return false;
    }
    diphoton.mva_result >= config.mva_threshold
}

/// Leptons of one flavour passing pt, `|eta|` and photon-isolation requirements, in input order.
pub fn select_leptons<'a>(
    config: &ZhLeptonicConfig,
    leptons: &'a [Lepton],
    flavor: Flavor,
    diphoton: &DiPhotonCandidate,
) -> Vec<&'a Lepton> {
    let (pt_min, eta_max, dr_min) = match flavor {
        Flavor::Muon => (
            config.muon_pt_threshold,
            config.muon_eta_threshold,
            config.dr_muon_pho_threshold,
        ),
        Flavor::Electron => (
            config.electron_pt_threshold,
            config.electron_eta_threshold,
            config.dr_electron_pho_threshold,
        ),
    };

    leptons
        .iter()
        .filter(|l| l.flavor == flavor)
        .filter(|l| l.pt() >= pt_min && l.eta().abs() <= eta_max)
        .filter(|l| {
            diphoton
                .photons()
                .iter()
                .all(|pho| l.p4.delta_r(&pho.p4) >= dr_min)
        })
        .collect()
}

/// Exactly two leptons of one flavour whose mass falls inside the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeptonPair {
    pub first: Lepton,
    pub second: Lepton,
}

impl LeptonPair {
    pub fn p4(&self) -> LorentzVector {
        self.first.p4 + self.second.p4
    }

    pub fn flavor(&self) -> Flavor {
        self.first.flavor
    }

    pub fn leptons(&self) -> [&Lepton; 2] {
        [&self.first, &self.second]
    }
}

/// Pairs found per flavour; both can be present in one event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DileptonSelection {
    pub muons: Option<LeptonPair>,
    pub electrons: Option<LeptonPair>,
}

impl DileptonSelection {
    /// The pair that drives the kinematics; muons take precedence.
    pub fn primary(&self) -> Option<&LeptonPair> {
        self.muons.as_ref().or(self.electrons.as_ref())
    }
}

fn pair_in_window(config: &ZhLeptonicConfig, selected: &[&Lepton]) -> Option<LeptonPair> {
    let [first, second] = selected else {
        return None;
    };
    let mass = (first.p4 + second.p4).mass();
    (mass > config.inv_mass_lep_low && mass < config.inv_mass_lep_high).then(|| LeptonPair {
        first: (*first).clone(),
        second: (*second).clone(),
    })
}

pub fn select_dileptons(
    config: &ZhLeptonicConfig,
    muons: &[Lepton],
    electrons: &[Lepton],
    diphoton: &DiPhotonCandidate,
) -> DileptonSelection {
    let muons = select_leptons(config, muons, Flavor::Muon, diphoton);
    let electrons = select_leptons(config, electrons, Flavor::Electron, diphoton);

    DileptonSelection {
        muons: pair_in_window(config, &muons),
        electrons: pair_in_window(config, &electrons),
    }
}

/// Jets surviving the photon and lepton cleaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanedJets {
    /// Indices into the candidate's jet collection, in collection order.
    pub indices: Vec<usize>,
    pub max_pt: f64,
    /// Largest `probb + probbb` among the kept jets.
    pub max_btag: f64,
}

pub fn clean_jets(
    config: &ZhLeptonicConfig,
    jets: &[Jet],
    diphoton: &DiPhotonCandidate,
    leptons: &LeptonPair,
) -> CleanedJets {
    let mut cleaned = CleanedJets::default();

    for (index, jet) in jets.iter().enumerate() {
        if !jet.jet_id.tight2017 {
            continue;
        }
        if jet.eta().abs() > config.jet_eta_threshold || jet.pt() < config.jet_pt_threshold {
            continue;
        }

        let near = |eta: f64, phi: f64, threshold: f64| {
            delta_r(jet.eta(), jet.phi(), eta, phi) < threshold
        };
        if diphoton
            .photons()
            .iter()
            .any(|pho| near(pho.eta(), pho.phi(), config.dr_jet_pho_threshold))
        {
            continue;
        }
        if leptons
            .leptons()
            .iter()
            .any(|lep| near(lep.eta(), lep.phi(), config.dr_jet_lep_threshold))
        {
            continue;
        }

        cleaned.max_pt = cleaned.max_pt.max(jet.pt());
        cleaned.max_btag = cleaned.max_btag.max(jet.btag());
        cleaned.indices.push(index);
    }

    cleaned
}
