use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{ConfigError, parse_bool_from_env, parse_f64_from_env};
use crate::constants::PU_MVA_ETA_BINS;
use crate::event::JetIdFlags;

pub const DEFAULT_THIRD_JET_DR_CUT: f64 = 1.8;

pub const DEFAULT_RMS_FORWARD_CUT: f64 = 3.0;

pub const DEFAULT_DR_JET_PHOTON: f64 = 0.4;

/// Jet quality tier required when jet ID is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JetIdLevel {
    /// Checks the Tight2017 flag; there is no separate loose flag upstream.
    Loose,
    Tight,
    #[default]
    Tight2017,
    Tight2018,
}

impl JetIdLevel {
    /// Whether the jet carries the flag this tier maps to.
    pub fn accepts(self, flags: &JetIdFlags) -> bool {
        match self {
            JetIdLevel::Loose | JetIdLevel::Tight2017 => flags.tight2017,
            JetIdLevel::Tight => flags.tight,
            JetIdLevel::Tight2018 => flags.tight2018,
        }
    }
}

impl FromStr for JetIdLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Loose" => Ok(JetIdLevel::Loose),
            "Tight" => Ok(JetIdLevel::Tight),
            "Tight2017" => Ok(JetIdLevel::Tight2017),
            "Tight2018" => Ok(JetIdLevel::Tight2018),
            other => Err(ConfigError::InvalidJetIdLevel {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for JetIdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JetIdLevel::Loose => "Loose",
            JetIdLevel::Tight => "Tight",
            JetIdLevel::Tight2017 => "Tight2017",
            JetIdLevel::Tight2018 => "Tight2018",
        };
        f.write_str(name)
    }
}

/// Thresholds of the hadronic jet selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JetSelectionConfig {
    /// Require the pile-up ID decision against the photon-pair vertex.
    pub use_pu_jet_id: bool,

    /// Require the jet quality tier in [`Self::jet_id_level`].
    pub use_jet_id: bool,

    pub jet_id_level: JetIdLevel,

    /// Absorb a nearby third jet into the closer of the leading pair.
    pub merge_third_jet: bool,

    /// Maximum ΔR between the third jet and the jet it merges into.
    pub third_jet_dr_cut: f64,

    /// Maximum shape RMS for jets beyond `|eta| > 2.5`.
    pub rms_forward_cut: f64,

    /// Minimum ΔR between a jet and either photon.
    pub dr_jet_photon: f64,

    /// Pile-up MVA working points for `20 < pt <= 30`, one per eta bin.
    pub pujid_wp_pt_bin_1: Vec<f64>,

    /// Pile-up MVA working points for `30 < pt <= 50`, one per eta bin.
    pub pujid_wp_pt_bin_2: Vec<f64>,
}

impl Default for JetSelectionConfig {
    fn default() -> Self {
        Self {
            use_pu_jet_id: false,
            use_jet_id: false,
            jet_id_level: JetIdLevel::default(),
            merge_third_jet: true,
            third_jet_dr_cut: DEFAULT_THIRD_JET_DR_CUT,
            rms_forward_cut: DEFAULT_RMS_FORWARD_CUT,
            dr_jet_photon: DEFAULT_DR_JET_PHOTON,
            pujid_wp_pt_bin_1: Vec::new(),
            pujid_wp_pt_bin_2: Vec::new(),
        }
    }
}

impl JetSelectionConfig {
    const ENV_USE_PU_JET_ID: &'static str = "VHTAG_USE_PU_JET_ID";
    const ENV_USE_JET_ID: &'static str = "VHTAG_USE_JET_ID";
    const ENV_JET_ID_LEVEL: &'static str = "VHTAG_JET_ID_LEVEL";
    const ENV_MERGE_THIRD_JET: &'static str = "VHTAG_MERGE_THIRD_JET";
    const ENV_THIRD_JET_DR_CUT: &'static str = "VHTAG_THIRD_JET_DR_CUT";
    const ENV_RMS_FORWARD_CUT: &'static str = "VHTAG_RMS_FORWARD_CUT";
    const ENV_DR_JET_PHOTON: &'static str = "VHTAG_DR_JET_PHOTON";

    /// Defaults with `VHTAG_*` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let jet_id_level = match std::env::var(Self::ENV_JET_ID_LEVEL) {
            Ok(value) => value.parse()?,
            Err(_) => defaults.jet_id_level,
        };

        let config = Self {
            use_pu_jet_id: parse_bool_from_env(Self::ENV_USE_PU_JET_ID, defaults.use_pu_jet_id)?,
            use_jet_id: parse_bool_from_env(Self::ENV_USE_JET_ID, defaults.use_jet_id)?,
            jet_id_level,
            merge_third_jet: parse_bool_from_env(
                Self::ENV_MERGE_THIRD_JET,
                defaults.merge_third_jet,
            )?,
            third_jet_dr_cut: parse_f64_from_env(
                Self::ENV_THIRD_JET_DR_CUT,
                defaults.third_jet_dr_cut,
            )?,
            rms_forward_cut: parse_f64_from_env(
                Self::ENV_RMS_FORWARD_CUT,
                defaults.rms_forward_cut,
            )?,
            dr_jet_photon: parse_f64_from_env(Self::ENV_DR_JET_PHOTON, defaults.dr_jet_photon)?,
            pujid_wp_pt_bin_1: defaults.pujid_wp_pt_bin_1,
            pujid_wp_pt_bin_2: defaults.pujid_wp_pt_bin_2,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn with_pu_mva_working_points(mut self, bin1: Vec<f64>, bin2: Vec<f64>) -> Self {
        self.pujid_wp_pt_bin_1 = bin1;
        self.pujid_wp_pt_bin_2 = bin2;
        self
    }

    pub fn with_merge_third_jet(mut self, merge: bool) -> Self {
        self.merge_third_jet = merge;
        self
    }

    /// Whether the binned pile-up MVA check is active.
    #[inline]
    pub fn pu_mva_enabled(&self) -> bool {
        !self.pujid_wp_pt_bin_1.is_empty() && !self.pujid_wp_pt_bin_2.is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("third_jet_dr_cut", self.third_jet_dr_cut)?;
        non_negative("rms_forward_cut", self.rms_forward_cut)?;
        non_negative("dr_jet_photon", self.dr_jet_photon)?;

        let bin1 = self.pujid_wp_pt_bin_1.len();
        let bin2 = self.pujid_wp_pt_bin_2.len();

        // One list set without the other would silently disable the check.
        if bin1 != bin2 {
            return Err(ConfigError::MismatchedBinLengths { bin1, bin2 });
        }

        let longest = bin1.max(bin2);
        if longest > PU_MVA_ETA_BINS.len() {
            return Err(ConfigError::TooManyEtaBins {
                len: longest,
                max: PU_MVA_ETA_BINS.len(),
            });
        }

        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidValue {
            name,
            reason: format!("must be finite and non-negative, got {value}"),
        });
    }
    Ok(())
}
