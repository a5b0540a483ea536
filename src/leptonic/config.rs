use serde::{Deserialize, Serialize};

use crate::categorize::CategoryBoundaries;
use crate::config::ConfigError;
use crate::scoring::DnnConfig;

/// Inputs of the STXS classifier, in training order.
pub const ZH_STXS_INPUTS: [&str; 22] = [
    "pho1_eta",
    "pho2_eta",
    "pho1_ptoM",
    "pho2_ptoM",
    "min_phoId",
    "max_phoId",
    "cosdphi_dipho",
    "lep1_pt",
    "lep2_pt",
    "lep1_eta",
    "lep2_eta",
    "dr_pho1_lep1",
    "dr_pho1_lep2",
    "dr_pho2_lep1",
    "dr_pho2_lep2",
    "dilep_mass",
    "cosdphi_dilep",
    "dphi_dipho_dilep",
    "pt_balance",
    "njet",
    "max_jet_pt",
    "max_jet_dCSV",
];

/// Inputs shared by the three anomalous-coupling classifiers, in training order.
pub const ZH_AC_INPUTS: [&str; 22] = [
    "cosPhiG1_Ele1",
    "cosPhiG1_Ele2",
    "cosPhiG1_Mu1",
    "cosPhiG1_Mu2",
    "cosPhiG2_Mu2",
    "cosPhiGG",
    "dR_Pho1Ele1_wh",
    "dR_Pho1Mu1_wh",
    "dR_Pho1Mu2_wh",
    "dR_Pho2Ele1_wh",
    "dR_Pho2Mu1_wh",
    "ele1_energy",
    "ele1_pt",
    "ele2_pt",
    "mu1_energy",
    "mu1_pt",
    "mu2_phi",
    "mu2_pt",
    "pho1_eta",
    "pho1_ptOverMgg",
    "pho2_phi",
    "pho2_ptOverMgg",
];

/// Output classes of the lepton-channel classifiers; the first is read as the score.
pub const ZH_OUTPUT_CLASSES: [&str; 2] = ["signal", "background"];

/// Default category brackets over (STXS score, 0M score).
pub const DEFAULT_AC_BOUNDARIES: [f64; 8] = [1.0, 0.5, 1.0, -1.0, 0.5, -1.0, 1.0, -1.0];

fn zh_model(inputs: &[&str]) -> DnnConfig {
    DnnConfig::default().with_io(inputs.iter().copied(), ZH_OUTPUT_CLASSES)
}

/// Thresholds and models of the lepton-pair channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZhLeptonicConfig {
    /// Leading photon must have `pt >= mass * lead_pho_over_mass`.
    pub lead_pho_over_mass: f64,
    pub sublead_pho_over_mass: f64,

    /// Both photon ID scores must be strictly above this.
    pub pho_mva_threshold: f64,

    /// Photon-pair classifier output must be at least this.
    pub mva_threshold: f64,

    pub muon_pt_threshold: f64,
    pub muon_eta_threshold: f64,
    pub dr_muon_pho_threshold: f64,

    pub electron_pt_threshold: f64,
    pub electron_eta_threshold: f64,
    pub dr_electron_pho_threshold: f64,

    /// Dilepton mass must lie strictly inside `(low, high)`.
    pub inv_mass_lep_low: f64,
    pub inv_mass_lep_high: f64,

    pub jet_pt_threshold: f64,
    pub jet_eta_threshold: f64,
    pub dr_jet_pho_threshold: f64,
    pub dr_jet_lep_threshold: f64,

    pub stxs_model: DnnConfig,
    pub ac_model_0m: DnnConfig,
    pub ac_model_0ph: DnnConfig,
    pub ac_model_0l1: DnnConfig,

    /// Category brackets over (STXS score, 0M score).
    pub ac_boundaries: CategoryBoundaries,
}

impl Default for ZhLeptonicConfig {
    fn default() -> Self {
        Self {
            lead_pho_over_mass: 0.375,
            sublead_pho_over_mass: 0.25,
            pho_mva_threshold: -0.9,
            mva_threshold: -1.0,
            muon_pt_threshold: 20.0,
            muon_eta_threshold: 2.4,
            dr_muon_pho_threshold: 0.2,
            electron_pt_threshold: 20.0,
            electron_eta_threshold: 2.5,
            dr_electron_pho_threshold: 0.2,
            inv_mass_lep_low: 70.0,
            inv_mass_lep_high: 110.0,
            jet_pt_threshold: 20.0,
            jet_eta_threshold: 2.4,
            dr_jet_pho_threshold: 0.4,
            dr_jet_lep_threshold: 0.4,
            stxs_model: zh_model(&ZH_STXS_INPUTS),
            ac_model_0m: zh_model(&ZH_AC_INPUTS),
            ac_model_0ph: zh_model(&ZH_AC_INPUTS),
            ac_model_0l1: zh_model(&ZH_AC_INPUTS),
            ac_boundaries: CategoryBoundaries::new(DEFAULT_AC_BOUNDARIES.to_vec())
                .unwrap_or_default(),
        }
    }
}

impl ZhLeptonicConfig {
    pub fn with_ac_boundaries(mut self, flat: Vec<f64>) -> Result<Self, ConfigError> {
        self.ac_boundaries = CategoryBoundaries::new(flat)?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("lead_pho_over_mass", self.lead_pho_over_mass),
            ("sublead_pho_over_mass", self.sublead_pho_over_mass),
            ("muon_pt_threshold", self.muon_pt_threshold),
            ("muon_eta_threshold", self.muon_eta_threshold),
            ("dr_muon_pho_threshold", self.dr_muon_pho_threshold),
            ("electron_pt_threshold", self.electron_pt_threshold),
            ("electron_eta_threshold", self.electron_eta_threshold),
            ("dr_electron_pho_threshold", self.dr_electron_pho_threshold),
            ("jet_pt_threshold", self.jet_pt_threshold),
            ("jet_eta_threshold", self.jet_eta_threshold),
            ("dr_jet_pho_threshold", self.dr_jet_pho_threshold),
            ("dr_jet_lep_threshold", self.dr_jet_lep_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    name,
                    reason: format!("must be finite and non-negative, got {value}"),
                });
            }
        }

        if self.inv_mass_lep_low >= self.inv_mass_lep_high {
            return Err(ConfigError::InvalidValue {
                name: "inv_mass_lep_low",
                reason: format!(
                    "mass window is empty: ({}, {})",
                    self.inv_mass_lep_low, self.inv_mass_lep_high
                ),
            });
        }

        for model in [
            &self.stxs_model,
            &self.ac_model_0m,
            &self.ac_model_0ph,
            &self.ac_model_0l1,
        ] {
            model.validate()?;
        }

        Ok(())
    }
}
