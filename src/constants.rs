//! Cross-cutting, shared constants.
//!
//! These are fixed by the trained scoring models and the reference selection; the tunable
//! thresholds live in the per-module config structs instead.

/// Placeholder stored in every feature and score that was not computed.
pub const SENTINEL: f64 = -999.0;

/// Placeholder used by the lepton channel for objects that are absent from the event.
pub const MISSING_OBJECT_DEFAULT: f64 = -100.0;

/// Running-maximum value of an empty rank slot.
pub const EMPTY_SLOT_PT: f64 = -1.0;

/// Jets with `|eta|` above this are outside the tracker and subject to the RMS shape cut.
pub const FORWARD_ETA_EDGE: f64 = 2.5;

/// Detector acceptance limit for jets.
pub const MAX_JET_ABS_ETA: f64 = 4.7;

/// Jets above this pt contribute to the jet multiplicity tally.
pub const JET_COUNT_PT_THRESHOLD: f64 = 30.0;

/// Saturation value for the jet-pair / photon-pair azimuthal separation.
pub const DIJET_DIPHOTON_DPHI_CAP: f64 = 2.9416;

/// `|eta|` edges of the pile-up MVA working-point bins: `(lo, hi]`, first bin closed at 0.
pub const PU_MVA_ETA_BINS: [(f64, f64); 4] = [(0.0, 2.50), (2.50, 2.75), (2.75, 3.00), (3.00, 10.0)];

/// Lower pt edge of the first pile-up MVA pt bin.
pub const PU_MVA_PT_BIN_1_LOW: f64 = 20.0;

/// Upper pt edge of the first bin (and lower edge of the second).
pub const PU_MVA_PT_BIN_1_HIGH: f64 = 30.0;

/// Upper pt edge of the second bin; above it jets always pass.
pub const PU_MVA_PT_BIN_2_HIGH: f64 = 50.0;

/// Lead-jet `|eta|` below which the centrality ratio is reported as degenerate.
pub const CENTRALITY_ETA_EPSILON: f64 = 1e-6;

/// Names of the hadronic DNN inputs, in the order the reference model was trained with.
pub const VH_HAD_DNN_INPUTS: [&str; 20] = [
    "dipho_lead_ptoM",
    "dipho_leadEta",
    "dipho_leadIDMVA",
    "dipho_sublead_ptoM",
    "dipho_subleadEta",
    "dipho_subleadIDMVA",
    "dipho_abs_dEta",
    "dipho_abs_dPhi",
    "dijet_leadPt",
    "dijet_leadEta",
    "dijet_leadPhi",
    "jet1_btag",
    "dijet_subleadPt",
    "dijet_subleadEta",
    "dijet_subleadPhi",
    "jet2_btag",
    "dijet_Mjj",
    "dijet_abs_dEta",
    "cos_thetastar",
    "dijet_minDRJetPho",
];

/// Default output classes of the hadronic DNN: background, standard model, anomalous coupling.
pub const VH_HAD_DNN_CLASSES: [&str; 3] = ["bkg", "sm", "bsm"];
