//! Classifier inputs of the lepton-pair channel.

use super::selection::{CleanedJets, DileptonSelection, LeptonPair};
use crate::constants::MISSING_OBJECT_DEFAULT;
use crate::event::{DiPhotonCandidate, Lepton};
use crate::features::FeatureMap;
use crate::kinematics::{delta_phi, delta_r};

fn into_map<const N: usize>(entries: [(&str, f64); N]) -> FeatureMap {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn or_missing(lep: Option<&Lepton>, f: impl Fn(&Lepton) -> f64) -> f64 {
    lep.map_or(MISSING_OBJECT_DEFAULT, f)
}

/// STXS classifier inputs plus the `leptonType` spectator (11 or 13).
pub fn stxs_inputs(
    diphoton: &DiPhotonCandidate,
    pair: &LeptonPair,
    jets: &CleanedJets,
) -> FeatureMap {
    let pho1 = &diphoton.leading;
    let pho2 = &diphoton.subleading;
    let mass = diphoton.mass();
    let gg = diphoton.p4();
    let (lep1, lep2) = (&pair.first, &pair.second);
    let ll = pair.p4();

    let dr = |lep: &Lepton, eta: f64, phi: f64| delta_r(lep.eta(), lep.phi(), eta, phi);

    into_map([
        ("pho1_eta", pho1.eta()),
        ("pho2_eta", pho2.eta()),
        ("pho1_ptoM", pho1.pt() / mass),
        ("pho2_ptoM", pho2.pt() / mass),
        ("min_phoId", pho1.id_mva.min(pho2.id_mva)),
        ("max_phoId", pho1.id_mva.max(pho2.id_mva)),
        (
            "cosdphi_dipho",
            delta_phi(pho1.phi(), pho2.phi()).abs().cos(),
        ),
        ("lep1_pt", lep1.pt()),
        ("lep2_pt", lep2.pt()),
        ("lep1_eta", lep1.eta()),
        ("lep2_eta", lep2.eta()),
        ("dr_pho1_lep1", dr(lep1, pho1.eta(), pho1.phi())),
        ("dr_pho1_lep2", dr(lep2, pho1.eta(), pho1.phi())),
        ("dr_pho2_lep1", dr(lep1, pho2.eta(), pho2.phi())),
        ("dr_pho2_lep2", dr(lep2, pho2.eta(), pho2.phi())),
        ("dilep_mass", ll.mass()),
        ("cosdphi_dilep", delta_phi(lep1.phi(), lep2.phi()).abs().cos()),
        ("dphi_dipho_dilep", delta_phi(gg.phi(), ll.phi()).abs()),
        ("pt_balance", (gg.pt() - ll.pt()) / gg.pt()),
        ("njet", jets.indices.len() as f64),
        ("max_jet_pt", jets.max_pt),
        ("max_jet_dCSV", jets.max_btag),
        ("leptonType", f64::from(pair.flavor().pdg_id())),
    ])
}

/// Anomalous-coupling classifier inputs; absent leptons give [`MISSING_OBJECT_DEFAULT`].
pub fn ac_inputs(diphoton: &DiPhotonCandidate, leptons: &DileptonSelection) -> FeatureMap {
    let pho1 = &diphoton.leading;
    let pho2 = &diphoton.subleading;
    let mass = diphoton.mass();

    let mu = |i: usize| {
        leptons
            .muons
            .as_ref()
            .map(|p| if i == 0 { &p.first } else { &p.second })
    };
    let ele = |i: usize| {
        leptons
            .electrons
            .as_ref()
            .map(|p| if i == 0 { &p.first } else { &p.second })
    };
    let cos_phi = |phi: f64, lep: Option<&Lepton>| or_missing(lep, |l| delta_phi(phi, l.phi()).cos());
    let dr = |eta: f64, phi: f64, lep: Option<&Lepton>| {
        or_missing(lep, |l| delta_r(l.eta(), l.phi(), eta, phi))
    };

    into_map([
        ("cosPhiG1_Ele1", cos_phi(pho1.phi(), ele(0))),
        ("cosPhiG1_Ele2", cos_phi(pho1.phi(), ele(1))),
        ("cosPhiG1_Mu1", cos_phi(pho1.phi(), mu(0))),
        ("cosPhiG1_Mu2", cos_phi(pho1.phi(), mu(1))),
        ("cosPhiG2_Mu2", cos_phi(pho2.phi(), mu(1))),
        ("cosPhiGG", delta_phi(pho1.phi(), pho2.phi()).cos()),
        ("dR_Pho1Ele1_wh", dr(pho1.eta(), pho1.phi(), ele(0))),
        ("dR_Pho1Mu1_wh", dr(pho1.eta(), pho1.phi(), mu(0))),
        ("dR_Pho1Mu2_wh", dr(pho1.eta(), pho1.phi(), mu(1))),
        ("dR_Pho2Ele1_wh", dr(pho2.eta(), pho2.phi(), ele(0))),
        ("dR_Pho2Mu1_wh", dr(pho2.eta(), pho2.phi(), mu(0))),
        ("ele1_energy", or_missing(ele(0), |l| l.p4.e)),
        ("ele1_pt", or_missing(ele(0), |l| l.pt())),
        ("ele2_pt", or_missing(ele(1), |l| l.pt())),
        ("mu1_energy", or_missing(mu(0), |l| l.p4.e)),
        ("mu1_pt", or_missing(mu(0), |l| l.pt())),
        ("mu2_phi", or_missing(mu(1), |l| l.phi())),
        ("mu2_pt", or_missing(mu(1), |l| l.pt())),
        ("pho1_eta", pho1.eta()),
        ("pho1_ptOverMgg", pho1.pt() / mass),
        ("pho2_phi", pho2.phi()),
        ("pho2_ptOverMgg", pho2.pt() / mass),
    ])
}
