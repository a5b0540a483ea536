//! Single-pass cascading insertion into four rank slots.
//!
//! This is not a top-4 sort. A jet that beats the lead pushes the old lead into the sublead slot
//! and discards the old sublead; a jet that only beats the sublead pushes the old sublead into the
//! third slot. Evicted jets are never re-examined.

use serde::{Deserialize, Serialize};

use crate::constants::{EMPTY_SLOT_PT, JET_COUNT_PT_THRESHOLD};

/// A filled rank slot: position in the jet collection and the pt it was ranked with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub index: usize,
    pub pt: f64,
}

/// Outcome of the rank scan over admitted jets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RankedJets {
    pub lead: Option<Slot>,
    pub sublead: Option<Slot>,
    pub third: Option<Slot>,
    pub fourth: Option<Slot>,

    /// Admitted jets above the multiplicity threshold, regardless of slot membership.
    pub n_jets: usize,
}

impl RankedJets {
    #[inline]
    pub fn has_dijet(&self) -> bool {
        self.lead.is_some() && self.sublead.is_some()
    }

    #[inline]
    pub fn has_trijet(&self) -> bool {
        self.has_dijet() && self.third.is_some()
    }

    #[inline]
    pub fn has_tetrajet(&self) -> bool {
        self.has_trijet() && self.fourth.is_some()
    }
}

fn slot_pt(slot: Option<Slot>) -> f64 {
    slot.map_or(EMPTY_SLOT_PT, |s| s.pt)
}

/// Incremental rank state; feed admitted jets in collection order, then [`finish`](Self::finish).
#[derive(Debug, Clone, Default)]
pub struct GreedyRanker {
    ranked: RankedJets,
}

impl GreedyRanker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranks one admitted jet.
    pub fn push(&mut self, index: usize, pt: f64) {
        let r = &mut self.ranked;
        let slot = Some(Slot { index, pt });

        if pt > slot_pt(r.lead) {
            r.sublead = r.lead;
            r.lead = slot;
        } else if pt > slot_pt(r.sublead) {
            r.third = r.sublead;
            r.sublead = slot;
        } else if pt > slot_pt(r.third) {
            r.third = slot;
        } else if pt > slot_pt(r.fourth) {
            r.fourth = slot;
        }

        if pt > JET_COUNT_PT_THRESHOLD {
            r.n_jets += 1;
        }
    }

    pub fn finish(self) -> RankedJets {
        self.ranked
    }

    /// Ranks a whole sequence of `(index, pt)` pairs.
    pub fn rank<I>(admitted: I) -> RankedJets
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut ranker = Self::new();
        for (index, pt) in admitted {
            ranker.push(index, pt);
        }
        ranker.finish()
    }
}
