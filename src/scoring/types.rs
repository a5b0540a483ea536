use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::SENTINEL;

/// Named model outputs.
pub type ScoreMap = BTreeMap<String, f64>;

/// The three hadronic DNN outputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassScores {
    /// Background-like.
    pub bkg: f64,
    /// Standard-model-like.
    pub sm: f64,
    /// Anomalous-coupling-like.
    pub bsm: f64,
}

impl Default for ClassScores {
    fn default() -> Self {
        Self::sentinel()
    }
}

impl ClassScores {
    pub const fn sentinel() -> Self {
        Self {
            bkg: SENTINEL,
            sm: SENTINEL,
            bsm: SENTINEL,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.bkg == SENTINEL && self.sm == SENTINEL && self.bsm == SENTINEL
    }

    pub fn sum(&self) -> f64 {
        self.bkg + self.sm + self.bsm
    }
}
