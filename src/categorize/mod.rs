//! Two-score category lookup over ordered boundary quadruples.
//!
//! Each category is a quadruple `(primary_hi, primary_lo, secondary_hi, secondary_lo)` bracketing
//! both scores half-open from below: `lo < score <= hi`. Quadruples are scanned in order and the
//! first one containing both scores wins.


use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// One category's bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub primary_hi: f64,
    pub primary_lo: f64,
    pub secondary_hi: f64,
    pub secondary_lo: f64,
}

impl Bracket {
    #[inline]
    pub fn contains(&self, primary: f64, secondary: f64) -> bool {
        primary <= self.primary_hi
            && primary > self.primary_lo
            && secondary <= self.secondary_hi
            && secondary > self.secondary_lo
    }
}

/// Validated, ordered category brackets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CategoryBoundaries {
    brackets: Vec<Bracket>,
}

impl CategoryBoundaries {
    /// Builds brackets from a flat list; its length must be a multiple of four.
    pub fn new(flat: Vec<f64>) -> Result<Self, ConfigError> {
        if flat.len() % 4 != 0 {
            return Err(ConfigError::InvalidBoundaries { len: flat.len() });
        }

        let brackets = flat
            .chunks_exact(4)
            .map(|q| Bracket {
                primary_hi: q[0],
                primary_lo: q[1],
                secondary_hi: q[2],
                secondary_lo: q[3],
            })
            .collect();

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Index of the first bracket containing both scores.
    pub fn choose(&self, primary: f64, secondary: f64) -> Option<usize> {
        self.brackets
            .iter()
            .position(|b| b.contains(primary, secondary))
    }
}

impl TryFrom<Vec<f64>> for CategoryBoundaries {
    type Error = ConfigError;

    fn try_from(flat: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(flat)
    }
}

impl From<CategoryBoundaries> for Vec<f64> {
    fn from(boundaries: CategoryBoundaries) -> Self {
        boundaries
            .brackets
            .iter()
            .flat_map(|b| [b.primary_hi, b.primary_lo, b.secondary_hi, b.secondary_lo])
            .collect()
    }
}
