//! Third-jet merge resolution.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::event::Jet;
use crate::kinematics::LorentzVector;

use super::ranker::RankedJets;

/// Which jet of the leading pair the third jet is absorbed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeSide {
    Lead,
    Sublead,
}

/// Decision for the third jet given its separations to the leading pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThirdJetDecision {
    pub dr_lead: f64,
    pub dr_sublead: f64,

    /// Closer side, when that separation is strictly below the cut.
    pub side: Option<MergeSide>,

    /// Both separations exceed the cut; the trijet flag is withdrawn.
    pub retracted: bool,
}

impl ThirdJetDecision {
    /// Ties in separation go to the sublead side.
    pub fn decide(dr_lead: f64, dr_sublead: f64, cut: f64) -> Self {
        let side = if dr_lead < dr_sublead {
            (dr_lead < cut).then_some(MergeSide::Lead)
        } else {
            (dr_sublead < cut).then_some(MergeSide::Sublead)
        };

        Self {
            dr_lead,
            dr_sublead,
            side,
            retracted: dr_lead > cut && dr_sublead > cut,
        }
    }
}

/// Leading pair after merge resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeOutcome {
    /// Higher-pt side of the (possibly merged) pair.
    pub lead: LorentzVector,
    pub sublead: LorentzVector,

    /// Set only when a merge actually happened.
    pub merged_into: Option<MergeSide>,

    /// Present whenever a tentative third jet was evaluated.
    pub third_jet: Option<ThirdJetDecision>,

    pub has_trijet: bool,
    pub has_tetrajet: bool,
}

/// Resolves the leading pair for a ranked selection; `None` without a dijet.
///
/// `jets` must be the collection the slot indices were taken from.
pub fn resolve(
    ranked: &RankedJets,
    jets: &[Jet],
    third_jet_dr_cut: f64,
    merge_third_jet: bool,
) -> Option<MergeOutcome> {
    let (lead_slot, sublead_slot) = match (ranked.lead, ranked.sublead) {
        (Some(lead), Some(sublead)) => (lead, sublead),
        _ => return None,
    };

    let lead_p4 = jets.get(lead_slot.index)?.p4;
    let sublead_p4 = jets.get(sublead_slot.index)?.p4;

    let mut has_trijet = ranked.has_trijet();
    let mut third_jet = None;
    let mut merge = None;

    if has_trijet
        && let Some(third_slot) = ranked.third
        && let Some(third) = jets.get(third_slot.index)
    {
        let decision = ThirdJetDecision::decide(
            lead_p4.delta_r(&third.p4),
            sublead_p4.delta_r(&third.p4),
            third_jet_dr_cut,
        );

        debug!(
            dr_lead = decision.dr_lead,
            dr_sublead = decision.dr_sublead,
            side = ?decision.side,
            retracted = decision.retracted,
            "third jet resolved"
        );

        if decision.retracted {
            has_trijet = false;
        }
        if merge_third_jet {
            merge = decision.side.map(|side| (side, third.p4));
        }
        third_jet = Some(decision);
    }

    let (lead, sublead, merged_into) = match merge {
        Some((side, third_p4)) => {
            let (other, merged) = match side {
                MergeSide::Lead => (sublead_p4, lead_p4 + third_p4),
                MergeSide::Sublead => (lead_p4, sublead_p4 + third_p4),
            };
            if merged.pt() > other.pt() {
                (merged, other, Some(side))
            } else {
                (other, merged, Some(side))
            }
        }
        None => (lead_p4, sublead_p4, None),
    };

    Some(MergeOutcome {
        lead,
        sublead,
        merged_into,
        third_jet,
        has_trijet,
        has_tetrajet: has_trijet && ranked.has_tetrajet(),
    })
}
