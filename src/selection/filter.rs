//! Per-jet admission predicate.
//!
//! Predicates run in a fixed order and the first failure rejects the jet; later predicates are
//! never evaluated for it.

use std::fmt;

use crate::config::ConfigError;
use crate::constants::{
    FORWARD_ETA_EDGE, MAX_JET_ABS_ETA, PU_MVA_ETA_BINS, PU_MVA_PT_BIN_1_HIGH, PU_MVA_PT_BIN_1_LOW,
    PU_MVA_PT_BIN_2_HIGH,
};
use crate::event::{DiPhotonCandidate, Jet};
use crate::kinematics::delta_r;

use super::config::JetSelectionConfig;

/// Which predicate rejected a jet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    PileupId,
    JetId,
    ForwardRms,
    PileupMva,
    Acceptance,
    PhotonOverlap,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::PileupId => "PILEUP_ID",
            Rejection::JetId => "JET_ID",
            Rejection::ForwardRms => "FORWARD_RMS",
            Rejection::PileupMva => "PILEUP_MVA",
            Rejection::Acceptance => "ACCEPTANCE",
            Rejection::PhotonOverlap => "PHOTON_OVERLAP",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated jet admission predicate.
#[derive(Debug, Clone)]
pub struct JetFilter {
    config: JetSelectionConfig,
}

impl JetFilter {
    /// Validates the thresholds; malformed working-point lists fail here, not per jet.
    pub fn new(config: JetSelectionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &JetSelectionConfig {
        &self.config
    }

    /// Returns `Ok(())` if the jet is admitted for this photon pair.
    pub fn check(&self, jet: &Jet, diphoton: &DiPhotonCandidate) -> Result<(), Rejection> {
        let config = &self.config;
        let abs_eta = jet.eta().abs();

        if config.use_pu_jet_id && !jet.passes_pu_jet_id(diphoton.vertex_index) {
            return Err(Rejection::PileupId);
        }

        if config.use_jet_id && !config.jet_id_level.accepts(&jet.jet_id) {
            return Err(Rejection::JetId);
        }

        if abs_eta > FORWARD_ETA_EDGE && jet.rms > config.rms_forward_cut {
            return Err(Rejection::ForwardRms);
        }

        if config.pu_mva_enabled() && !self.passes_pu_mva(jet, abs_eta) {
            return Err(Rejection::PileupMva);
        }

        if abs_eta > MAX_JET_ABS_ETA {
            return Err(Rejection::Acceptance);
        }

        for photon in diphoton.photons() {
            let dr = delta_r(jet.eta(), jet.phi(), photon.eta(), photon.phi());
            if dr < config.dr_jet_photon {
                return Err(Rejection::PhotonOverlap);
            }
        }

        Ok(())
    }

    #[inline]
    pub fn admits(&self, jet: &Jet, diphoton: &DiPhotonCandidate) -> bool {
        self.check(jet, diphoton).is_ok()
    }

    fn passes_pu_mva(&self, jet: &Jet, abs_eta: f64) -> bool {
        let pt = jet.pt();
        let wp_bin_1 = &self.config.pujid_wp_pt_bin_1;
        let wp_bin_2 = &self.config.pujid_wp_pt_bin_2;

        let Some(bin) = eta_bin(abs_eta, wp_bin_1.len()) else {
            return false;
        };

        if pt > PU_MVA_PT_BIN_2_HIGH {
            return true;
        }
        if pt > PU_MVA_PT_BIN_1_LOW && pt <= PU_MVA_PT_BIN_1_HIGH {
            return jet.pu_jet_id_mva > wp_bin_1[bin];
        }
        if pt > PU_MVA_PT_BIN_1_HIGH && pt <= PU_MVA_PT_BIN_2_HIGH {
            return jet.pu_jet_id_mva > wp_bin_2[bin];
        }
        false
    }
}

/// Index of the eta bin containing `abs_eta`, among the first `n_bins` bins.
fn eta_bin(abs_eta: f64, n_bins: usize) -> Option<usize> {
    PU_MVA_ETA_BINS
        .iter()
        .take(n_bins)
        .position(|&(lo, hi)| {
            let above_low = if lo == 0.0 { abs_eta >= lo } else { abs_eta > lo };
            above_low && abs_eta <= hi
        })
}
