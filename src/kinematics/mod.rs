//! Four-momentum arithmetic and angular helpers.
//!
//! Every azimuthal difference in the crate goes through [`delta_phi`], which wraps the raw
//! difference into `[-pi, pi]`. Raw subtraction of `phi` values is never correct here.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Pseudorapidity reported for a vector along the beam axis.
const BEAM_AXIS_ETA: f64 = 1e10;

/// Cartesian four-momentum `(px, py, pz, E)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LorentzVector {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub e: f64,
}

impl LorentzVector {
    #[inline]
    pub const fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Builds a vector from collider coordinates and invariant mass.
    pub fn from_pt_eta_phi_m(pt: f64, eta: f64, phi: f64, mass: f64) -> Self {
        let px = pt * phi.cos();
        let py = pt * phi.sin();
        let pz = pt * eta.sinh();
        let p2 = px * px + py * py + pz * pz;
        let e = (p2 + mass * mass).sqrt();
        Self { px, py, pz, e }
    }

    #[inline]
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Magnitude of the three-momentum.
    #[inline]
    pub fn p(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    pub fn eta(&self) -> f64 {
        let pt = self.pt();
        if pt > 0.0 {
            (self.pz / pt).asinh()
        } else if self.pz == 0.0 {
            0.0
        } else {
            BEAM_AXIS_ETA.copysign(self.pz)
        }
    }

    #[inline]
    pub fn phi(&self) -> f64 {
        if self.px == 0.0 && self.py == 0.0 {
            0.0
        } else {
            self.py.atan2(self.px)
        }
    }

    /// Rapidity along the beam axis, `0.5 * ln((E + pz) / (E - pz))`.
    pub fn rapidity(&self) -> f64 {
        0.5 * ((self.e + self.pz) / (self.e - self.pz)).ln()
    }

    #[inline]
    pub fn mass2(&self) -> f64 {
        self.e * self.e - (self.px * self.px + self.py * self.py + self.pz * self.pz)
    }

    /// Invariant mass; space-like vectors report a negative mass.
    pub fn mass(&self) -> f64 {
        let m2 = self.mass2();
        if m2 < 0.0 { -(-m2).sqrt() } else { m2.sqrt() }
    }

    /// Velocity `(px/E, py/E, pz/E)` of the frame in which this vector is at rest.
    #[inline]
    pub fn boost_vector(&self) -> [f64; 3] {
        [self.px / self.e, self.py / self.e, self.pz / self.e]
    }

    /// Applies a Lorentz boost with velocity `beta`.
    ///
    /// Degenerate inputs (`|beta| >= 1`, zero energy frames) propagate as non-finite components.
    pub fn boosted(&self, beta: [f64; 3]) -> Self {
        let [bx, by, bz] = beta;
        let b2 = bx * bx + by * by + bz * bz;
        let gamma = 1.0 / (1.0 - b2).sqrt();
        let bp = bx * self.px + by * self.py + bz * self.pz;
        let gamma2 = if b2 > 0.0 { (gamma - 1.0) / b2 } else { 0.0 };

        Self {
            px: self.px + gamma2 * bp * bx + gamma * bx * self.e,
            py: self.py + gamma2 * bp * by + gamma * by * self.e,
            pz: self.pz + gamma2 * bp * bz + gamma * bz * self.e,
            e: gamma * (self.e + bp),
        }
    }

    /// Returns this vector expressed in the rest frame of `frame`.
    pub fn in_rest_frame_of(&self, frame: &LorentzVector) -> Self {
        let [bx, by, bz] = frame.boost_vector();
        self.boosted([-bx, -by, -bz])
    }

    /// Cosine of the polar angle; `1.0` for a null three-momentum.
    pub fn cos_theta(&self) -> f64 {
        let p = self.p();
        if p == 0.0 { 1.0 } else { self.pz / p }
    }

    /// Wrap-aware angular separation to `other`.
    #[inline]
    pub fn delta_r(&self, other: &LorentzVector) -> f64 {
        delta_r(self.eta(), self.phi(), other.eta(), other.phi())
    }
}

impl Add for LorentzVector {
    type Output = LorentzVector;

    #[inline]
    fn add(self, rhs: LorentzVector) -> LorentzVector {
        LorentzVector {
            px: self.px + rhs.px,
            py: self.py + rhs.py,
            pz: self.pz + rhs.pz,
            e: self.e + rhs.e,
        }
    }
}

impl AddAssign for LorentzVector {
    #[inline]
    fn add_assign(&mut self, rhs: LorentzVector) {
        *self = *self + rhs;
    }
}

impl Sum for LorentzVector {
    fn sum<I: Iterator<Item = LorentzVector>>(iter: I) -> Self {
        iter.fold(LorentzVector::default(), Add::add)
    }
}

/// Signed azimuthal difference `phi1 - phi2`, wrapped into `[-pi, pi]`.
pub fn delta_phi(phi1: f64, phi2: f64) -> f64 {
    let mut dphi = phi1 - phi2;
    if dphi > PI || dphi < -PI {
        dphi -= (2.0 * PI) * ((dphi + PI) / (2.0 * PI)).floor();
    }
    dphi
}

/// Angular separation in `(eta, phi)` with a wrap-aware azimuthal term.
pub fn delta_r(eta1: f64, phi1: f64, eta2: f64, phi2: f64) -> f64 {
    let deta = eta1 - eta2;
    let dphi = delta_phi(phi1, phi2);
    (deta * deta + dphi * dphi).sqrt()
}
