//! Kinematic features of the leading jet pair and the photon pair.
//!
//! [`DijetFeatures::derive`] is only meaningful once a dijet exists; otherwise every field keeps
//! the [`SENTINEL`] value from [`DijetFeatures::default`]. All azimuthal differences go through
//! [`delta_phi`].


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::constants::{CENTRALITY_ETA_EPSILON, DIJET_DIPHOTON_DPHI_CAP, SENTINEL};
use crate::event::{DiPhotonCandidate, Jet};
use crate::kinematics::{LorentzVector, delta_phi};

/// Named scalar inputs, ordered by name.
pub type FeatureMap = BTreeMap<String, f64>;

/// Number of named entries produced by [`DijetFeatures::entries`].
pub const DIJET_FEATURE_COUNT: usize = 32;

/// Derived features of one photon-pair candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DijetFeatures {
    pub dijet_lead_eta: f64,
    pub dijet_sublead_eta: f64,
    pub dijet_abs_deta: f64,
    pub dijet_lead_pt: f64,
    pub dijet_sublead_pt: f64,
    pub dijet_pt: f64,

    /// `|dphi|` between the jet-pair and photon-pair systems.
    pub dijet_dipho_dphi: f64,
    /// [`Self::dijet_dipho_dphi`] saturated at 2.9416.
    pub dijet_dphi_trunc: f64,
    pub dijet_dphi: f64,

    /// pt of the two-jet plus two-photon system.
    pub dijet_dipho_pt: f64,

    /// Zeppenfeld variable `|eta_gg - (eta_j1 + eta_j2) / 2|`.
    pub dijet_zep: f64,
    pub dijet_centrality_gg: f64,
    pub dijet_centrality_g: f64,
    /// Never computed; kept so downstream consumers see a stable field set.
    pub dijet_centrality_j3: f64,
    pub dijet_mjj: f64,

    /// Negative cosine of the photon-pair polar angle in the four-body rest frame.
    pub cos_theta_star: f64,

    pub dipho_pt_over_m: f64,
    pub lead_pho_pt_over_m: f64,
    pub sublead_pho_pt_over_m: f64,
    pub dipho_signed_cos_phi: f64,
    pub dipho_cos_phi: f64,
    pub dipho_lead_eta: f64,
    pub dipho_sublead_eta: f64,
    pub dipho_lead_pt: f64,
    pub dipho_sublead_pt: f64,
    pub dipho_lead_phi: f64,
    pub dipho_sublead_phi: f64,
    pub dipho_sum_pt: f64,

    /// Smallest separation between either jet and either photon.
    pub dijet_min_dr_jet_pho: f64,
    /// `|y_jj - y_gg|`.
    pub dijet_dy: f64,
    pub dijet_lead_y: f64,
    pub dijet_sublead_y: f64,
}

impl Default for DijetFeatures {
    fn default() -> Self {
        Self {
            dijet_lead_eta: SENTINEL,
            dijet_sublead_eta: SENTINEL,
            dijet_abs_deta: SENTINEL,
            dijet_lead_pt: SENTINEL,
            dijet_sublead_pt: SENTINEL,
            dijet_pt: SENTINEL,
            dijet_dipho_dphi: SENTINEL,
            dijet_dphi_trunc: SENTINEL,
            dijet_dphi: SENTINEL,
            dijet_dipho_pt: SENTINEL,
            dijet_zep: SENTINEL,
            dijet_centrality_gg: SENTINEL,
            dijet_centrality_g: SENTINEL,
            dijet_centrality_j3: SENTINEL,
            dijet_mjj: SENTINEL,
            cos_theta_star: SENTINEL,
            dipho_pt_over_m: SENTINEL,
            lead_pho_pt_over_m: SENTINEL,
            sublead_pho_pt_over_m: SENTINEL,
            dipho_signed_cos_phi: SENTINEL,
            dipho_cos_phi: SENTINEL,
            dipho_lead_eta: SENTINEL,
            dipho_sublead_eta: SENTINEL,
            dipho_lead_pt: SENTINEL,
            dipho_sublead_pt: SENTINEL,
            dipho_lead_phi: SENTINEL,
            dipho_sublead_phi: SENTINEL,
            dipho_sum_pt: SENTINEL,
            dijet_min_dr_jet_pho: SENTINEL,
            dijet_dy: SENTINEL,
            dijet_lead_y: SENTINEL,
            dijet_sublead_y: SENTINEL,
        }
    }
}

impl DijetFeatures {
    /// Computes every feature from the resolved jet pair and the photons.
    ///
    /// A lead jet at `|eta| ~ 0` makes both centralities non-finite or meaningless; the value is
    /// still produced and a warning is logged.
    pub fn derive(lead: &LorentzVector, sublead: &LorentzVector, diphoton: &DiPhotonCandidate) -> Self {
        let pho1 = diphoton.leading.p4;
        let pho2 = diphoton.subleading.p4;
        let gg = pho1 + pho2;
        let jj = *lead + *sublead;
        let ggjj = gg + jj;

        let lead_eta = lead.eta();
        let sublead_eta = sublead.eta();
        let mean_jet_eta = 0.5 * (lead_eta + sublead_eta);

        let dijet_dipho_dphi = delta_phi(jj.phi(), gg.phi()).abs();
        let zep = (gg.eta() - mean_jet_eta).abs();
        let zep_g = (pho1.eta() - mean_jet_eta).abs();

        if lead_eta.abs() < CENTRALITY_ETA_EPSILON {
            warn!(lead_eta, zep, "degenerate centrality denominator");
        }

        let gg_mass = gg.mass();
        let signed_cos_phi = delta_phi(pho1.phi(), pho2.phi()).cos();

        let min_dr = [
            lead.delta_r(&pho1),
            sublead.delta_r(&pho1),
            lead.delta_r(&pho2),
            sublead.delta_r(&pho2),
        ]
        .into_iter()
        .fold(f64::INFINITY, f64::min);

        Self {
            dijet_lead_eta: lead_eta,
            dijet_sublead_eta: sublead_eta,
            dijet_abs_deta: (lead_eta - sublead_eta).abs(),
            dijet_lead_pt: lead.pt(),
            dijet_sublead_pt: sublead.pt(),
            dijet_pt: jj.pt(),
            dijet_dipho_dphi,
            dijet_dphi_trunc: dijet_dipho_dphi.min(DIJET_DIPHOTON_DPHI_CAP),
            dijet_dphi: delta_phi(lead.phi(), sublead.phi()).abs(),
            dijet_dipho_pt: ggjj.pt(),
            dijet_zep: zep,
            dijet_centrality_gg: centrality(zep, lead_eta),
            dijet_centrality_g: centrality(zep_g, lead_eta),
            dijet_centrality_j3: SENTINEL,
            dijet_mjj: jj.mass(),
            cos_theta_star: -gg.in_rest_frame_of(&ggjj).cos_theta(),
            dipho_pt_over_m: gg.pt() / gg_mass,
            lead_pho_pt_over_m: pho1.pt() / gg_mass,
            sublead_pho_pt_over_m: pho2.pt() / gg_mass,
            dipho_signed_cos_phi: signed_cos_phi,
            dipho_cos_phi: signed_cos_phi.abs(),
            dipho_lead_eta: pho1.eta(),
            dipho_sublead_eta: pho2.eta(),
            dipho_lead_pt: pho1.pt(),
            dipho_sublead_pt: pho2.pt(),
            dipho_lead_phi: pho1.phi(),
            dipho_sublead_phi: pho2.phi(),
            dipho_sum_pt: diphoton.sum_pt(),
            dijet_min_dr_jet_pho: min_dr,
            dijet_dy: (jj.rapidity() - gg.rapidity()).abs(),
            dijet_lead_y: lead.rapidity(),
            dijet_sublead_y: sublead.rapidity(),
        }
    }

    /// Every feature with the name downstream consumers know it by.
    pub fn entries(&self) -> [(&'static str, f64); DIJET_FEATURE_COUNT] {
        [
            ("dijet_leadEta", self.dijet_lead_eta),
            ("dijet_subleadEta", self.dijet_sublead_eta),
            ("dijet_abs_dEta", self.dijet_abs_deta),
            ("dijet_LeadJPt", self.dijet_lead_pt),
            ("dijet_SubJPt", self.dijet_sublead_pt),
            ("dijet_pt", self.dijet_pt),
            ("dijet_dipho_dphi", self.dijet_dipho_dphi),
            ("dijet_dphi_trunc", self.dijet_dphi_trunc),
            ("dijet_dphi", self.dijet_dphi),
            ("dijet_dipho_pt", self.dijet_dipho_pt),
            ("dijet_Zep", self.dijet_zep),
            ("dijet_centrality_gg", self.dijet_centrality_gg),
            ("dijet_centrality_g", self.dijet_centrality_g),
            ("dijet_centrality_j3", self.dijet_centrality_j3),
            ("dijet_Mjj", self.dijet_mjj),
            ("cosThetaStar", self.cos_theta_star),
            ("dipho_PToM", self.dipho_pt_over_m),
            ("leadPho_PToM", self.lead_pho_pt_over_m),
            ("sublPho_PToM", self.sublead_pho_pt_over_m),
            ("dipho_signed_cosphi", self.dipho_signed_cos_phi),
            ("dipho_cosphi", self.dipho_cos_phi),
            ("dipho_leadEta", self.dipho_lead_eta),
            ("dipho_subleadEta", self.dipho_sublead_eta),
            ("dipho_leadPt", self.dipho_lead_pt),
            ("dipho_subleadPt", self.dipho_sublead_pt),
            ("dipho_leadPhi", self.dipho_lead_phi),
            ("dipho_subleadPhi", self.dipho_sublead_phi),
            ("dipho_sumpt", self.dipho_sum_pt),
            ("dijet_minDRJetPho", self.dijet_min_dr_jet_pho),
            ("dijet_dy", self.dijet_dy),
            ("dijet_leady", self.dijet_lead_y),
            ("dijet_subleady", self.dijet_sublead_y),
        ]
    }

    pub fn to_map(&self) -> FeatureMap {
        self.entries()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    /// True when no feature was computed.
    pub fn is_sentinel(&self) -> bool {
        self.entries().iter().all(|&(_, value)| value == SENTINEL)
    }
}

/// `exp(-4 (x / lead_eta)^2)`, unclamped.
#[inline]
fn centrality(x: f64, lead_eta: f64) -> f64 {
    (-4.0 * (x / lead_eta).powi(2)).exp()
}

/// Inputs of the hadronic DNN.
///
/// `lead_jet` and `sublead_jet` are the jets in the original rank slots; they only contribute
/// their b-tag sums, the kinematics come from the resolved pair in `features`.
pub fn vh_had_dnn_inputs(
    features: &DijetFeatures,
    lead: &LorentzVector,
    sublead: &LorentzVector,
    diphoton: &DiPhotonCandidate,
    lead_jet: &Jet,
    sublead_jet: &Jet,
) -> FeatureMap {
    let dipho_lead_eta = features.dipho_lead_eta;
    let dipho_sublead_eta = features.dipho_sublead_eta;

    [
        ("dipho_lead_ptoM", features.lead_pho_pt_over_m),
        ("dipho_leadEta", dipho_lead_eta),
        ("dipho_leadIDMVA", diphoton.leading.id_mva),
        ("dipho_sublead_ptoM", features.sublead_pho_pt_over_m),
        ("dipho_subleadEta", dipho_sublead_eta),
        ("dipho_subleadIDMVA", diphoton.subleading.id_mva),
        ("dipho_abs_dEta", (dipho_lead_eta - dipho_sublead_eta).abs()),
        (
            "dipho_abs_dPhi",
            delta_phi(features.dipho_lead_phi, features.dipho_sublead_phi).abs(),
        ),
        ("dijet_leadPt", features.dijet_lead_pt),
        ("dijet_leadEta", features.dijet_lead_eta),
        ("dijet_leadPhi", lead.phi()),
        ("jet1_btag", lead_jet.btag()),
        ("dijet_subleadPt", features.dijet_sublead_pt),
        ("dijet_subleadEta", features.dijet_sublead_eta),
        ("dijet_subleadPhi", sublead.phi()),
        ("jet2_btag", sublead_jet.btag()),
        ("dijet_Mjj", features.dijet_mjj),
        ("dijet_abs_dEta", features.dijet_abs_deta),
        ("cos_thetastar", features.cos_theta_star),
        ("dijet_minDRJetPho", features.dijet_min_dr_jet_pho),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect()
}
