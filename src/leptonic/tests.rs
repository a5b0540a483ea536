use super::*;
use crate::config::ConfigError;
use crate::constants::MISSING_OBJECT_DEFAULT;
use crate::event::{DiPhotonCandidate, Jet, JetIdFlags, Lepton, Photon};
use crate::kinematics::LorentzVector;
use crate::scoring::MockScoringModel;

fn p4(pt: f64, eta: f64, phi: f64) -> LorentzVector {
    LorentzVector::from_pt_eta_phi_m(pt, eta, phi, 0.0)
}

/// Mass about 116 GeV, both photons well above the pt-over-mass cuts.
fn diphoton() -> DiPhotonCandidate {
    let mut dipho = DiPhotonCandidate::new(
        Photon::new(p4(70.0, 0.0, 0.0), 0.5),
        Photon::new(p4(50.0, 0.5, 2.5), 0.3),
    );
    dipho.mva_result = 0.2;
    dipho
}

fn muon(pt: f64, eta: f64, phi: f64) -> Lepton {
    Lepton::new(p4(pt, eta, phi), Flavor::Muon)
}

fn electron(pt: f64, eta: f64, phi: f64) -> Lepton {
    Lepton::new(p4(pt, eta, phi), Flavor::Electron)
}

/// Dimuon mass about 90 GeV, isolated from both photons.
fn z_muons() -> Vec<Lepton> {
    vec![muon(45.0, 0.3, -1.0), muon(40.0, -0.4, 2.0)]
}

fn z_electrons() -> Vec<Lepton> {
    vec![electron(45.0, 0.3, -1.0), electron(40.0, -0.4, 2.0)]
}

fn tight_jet(pt: f64, eta: f64, phi: f64) -> Jet {
    let mut jet = Jet::new(p4(pt, eta, phi));
    jet.jet_id = JetIdFlags {
        tight2017: true,
        ..Default::default()
    };
    jet
}

fn event(muons: Vec<Lepton>, electrons: Vec<Lepton>) -> Event {
    Event {
        id: 1,
        jet_collections: vec![vec![tight_jet(60.0, 1.5, -2.5), tight_jet(35.0, -1.8, 1.0)]],
        diphotons: vec![diphoton()],
        muons,
        electrons,
    }
}

fn mock(score: f64) -> MockScoringModel {
    MockScoringModel::new([("signal", score), ("background", 1.0 - score)])
}

fn tagger(stxs: f64, ac_0m: f64) -> ZhLeptonicTagger {
    tagger_with(ZhLeptonicConfig::default(), stxs, ac_0m)
}

fn tagger_with(config: ZhLeptonicConfig, stxs: f64, ac_0m: f64) -> ZhLeptonicTagger {
    ZhLeptonicTagger::with_models(
        config,
        Box::new(mock(stxs)),
        Box::new(mock(ac_0m)),
        Box::new(mock(0.4)),
        Box::new(mock(0.6)),
    )
    .unwrap()
}

mod config_tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ZhLeptonicConfig::default();
        config.validate().unwrap();
        assert_eq!(config.ac_boundaries.len(), 2);
        assert_eq!(config.stxs_model.input_names.len(), ZH_STXS_INPUTS.len());
        assert_eq!(config.ac_model_0m.output_classes, ZH_OUTPUT_CLASSES);
    }

    #[test]
    fn test_empty_mass_window_rejected() {
        let config = ZhLeptonicConfig {
            inv_mass_lep_low: 110.0,
            inv_mass_lep_high: 70.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                name: "inv_mass_lep_low",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let config = ZhLeptonicConfig {
            dr_jet_lep_threshold: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_boundaries_from_json() {
        let config: ZhLeptonicConfig =
            serde_json::from_str(r#"{"ac_boundaries": [1.0, 0.9, 1.0, 0.5]}"#).unwrap();
        assert_eq!(config.ac_boundaries.len(), 1);
        assert_eq!(config.muon_pt_threshold, 20.0);

        let bad: Result<ZhLeptonicConfig, _> =
            serde_json::from_str(r#"{"ac_boundaries": [1.0, 0.9]}"#);
        assert!(bad.is_err());
    }
}

mod selection_tests {
    use super::*;
    use crate::leptonic::selection::{
        clean_jets, passes_photon_preselection, select_dileptons, select_leptons,
    };

    #[test]
    fn test_photon_preselection_passes() {
        assert!(passes_photon_preselection(
            &ZhLeptonicConfig::default(),
            &diphoton()
        ));
    }

    #[test]
    fn test_photon_pt_over_mass() {
        let config = ZhLeptonicConfig {
            lead_pho_over_mass: 0.7,
            ..Default::default()
        };
        assert!(!passes_photon_preselection(&config, &diphoton()));

        let config = ZhLeptonicConfig {
            sublead_pho_over_mass: 0.5,
            ..Default::default()
        };
        assert!(!passes_photon_preselection(&config, &diphoton()));
    }

    #[test]
    fn test_photon_id_must_be_strictly_above_threshold() {
        let mut dipho = diphoton();
        dipho.subleading.id_mva = -0.9;
        assert!(!passes_photon_preselection(
            &ZhLeptonicConfig::default(),
            &dipho
        ));
    }

    #[test]
    fn test_diphoton_mva_threshold_inclusive() {
        let config = ZhLeptonicConfig {
            mva_threshold: 0.2,
            ..Default::default()
        };
        assert!(passes_photon_preselection(&config, &diphoton()));

        let config = ZhLeptonicConfig {
            mva_threshold: 0.21,
            ..Default::default()
        };
        assert!(!passes_photon_preselection(&config, &diphoton()));
    }

    #[test]
    fn test_lepton_kinematic_cuts() {
        let config = ZhLeptonicConfig::default();
        let leptons = vec![
            muon(45.0, 0.3, -1.0),
            muon(15.0, 0.3, -1.0),
            muon(45.0, 2.45, -1.0),
            // On top of the leading photon.
            muon(45.0, 0.05, 0.05),
            electron(45.0, 0.3, -1.0),
        ];

        let selected = select_leptons(&config, &leptons, Flavor::Muon, &diphoton());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].pt(), leptons[0].pt());

        // 2.45 is inside the electron acceptance.
        let electrons = vec![electron(45.0, 2.45, -1.0)];
        assert_eq!(
            select_leptons(&config, &electrons, Flavor::Electron, &diphoton()).len(),
            1
        );
    }

    #[test]
    fn test_dimuon_in_window() {
        let config = ZhLeptonicConfig::default();
        let sel = select_dileptons(&config, &z_muons(), &[], &diphoton());

        let pair = sel.muons.as_ref().unwrap();
        assert!(pair.p4().mass() > 70.0 && pair.p4().mass() < 110.0);
        assert!(sel.electrons.is_none());
        assert_eq!(sel.primary().unwrap().flavor(), Flavor::Muon);
    }

    #[test]
    fn test_exactly_two_leptons_required() {
        let config = ZhLeptonicConfig::default();
        let mut muons = z_muons();
        muons.push(muon(30.0, 1.0, -2.0));
        assert!(select_dileptons(&config, &muons, &[], &diphoton()).primary().is_none());

        let single = vec![muon(45.0, 0.3, -1.0)];
        assert!(select_dileptons(&config, &single, &[], &diphoton()).primary().is_none());
    }

    #[test]
    fn test_mass_window_is_open() {
        let config = ZhLeptonicConfig {
            inv_mass_lep_low: 95.0,
            ..Default::default()
        };
        assert!(select_dileptons(&config, &z_muons(), &[], &diphoton()).primary().is_none());
    }

    #[test]
    fn test_muons_preferred_over_electrons() {
        let sel = select_dileptons(
            &ZhLeptonicConfig::default(),
            &z_muons(),
            &z_electrons(),
            &diphoton(),
        );
        assert!(sel.muons.is_some());
        assert!(sel.electrons.is_some());
        assert_eq!(sel.primary().unwrap().flavor(), Flavor::Muon);

        let sel = select_dileptons(&ZhLeptonicConfig::default(), &[], &z_electrons(), &diphoton());
        assert_eq!(sel.primary().unwrap().flavor(), Flavor::Electron);
    }

    #[test]
    fn test_jet_cleaning() {
        let config = ZhLeptonicConfig::default();
        let sel = select_dileptons(&config, &z_muons(), &[], &diphoton());
        let pair = sel.primary().unwrap();

        let mut loose = tight_jet(80.0, 1.0, -2.8);
        loose.jet_id.tight2017 = false;
        let mut tagged = tight_jet(35.0, -1.8, 1.0);
        tagged.btag_probb = 0.4;
        tagged.btag_probbb = 0.3;

        let jets = vec![
            tight_jet(60.0, 1.5, -2.5),
            loose,
            // Near the first muon.
            tight_jet(90.0, 0.35, -1.1),
            // Near the leading photon.
            tight_jet(90.0, 0.1, 0.1),
            tight_jet(30.0, 2.6, 1.0),
            tight_jet(15.0, 1.0, 1.0),
            tagged,
        ];

        let cleaned = clean_jets(&config, &jets, &diphoton(), pair);
        assert_eq!(cleaned.indices, vec![0, 6]);
        assert!((cleaned.max_pt - 60.0).abs() < 1e-9);
        assert!((cleaned.max_btag - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_no_clean_jets_tallies_zero() {
        let config = ZhLeptonicConfig::default();
        let sel = select_dileptons(&config, &z_muons(), &[], &diphoton());
        let cleaned = clean_jets(&config, &[], &diphoton(), sel.primary().unwrap());
        assert!(cleaned.indices.is_empty());
        assert_eq!(cleaned.max_pt, 0.0);
        assert_eq!(cleaned.max_btag, 0.0);
    }
}

mod feature_tests {
    use super::*;
    use crate::leptonic::features::{ac_inputs, stxs_inputs};
    use crate::leptonic::selection::{clean_jets, select_dileptons};

    #[test]
    fn test_stxs_inputs_cover_model_inputs() {
        let config = ZhLeptonicConfig::default();
        let sel = select_dileptons(&config, &z_muons(), &[], &diphoton());
        let pair = sel.primary().unwrap();
        let jets = vec![tight_jet(60.0, 1.5, -2.5)];
        let cleaned = clean_jets(&config, &jets, &diphoton(), pair);

        let inputs = stxs_inputs(&diphoton(), pair, &cleaned);
        for name in ZH_STXS_INPUTS {
            assert!(inputs.contains_key(name), "missing {name}");
        }
        assert_eq!(inputs.len(), ZH_STXS_INPUTS.len() + 1);
        assert_eq!(inputs["leptonType"], 13.0);
        assert_eq!(inputs["njet"], 1.0);
        assert!((inputs["lep1_pt"] - 45.0).abs() < 1e-9);
        assert!((inputs["min_phoId"] - 0.3).abs() < 1e-12);
        assert!((inputs["max_phoId"] - 0.5).abs() < 1e-12);

        let mass = diphoton().mass();
        assert!((inputs["pho1_ptoM"] - 70.0 / mass).abs() < 1e-9);
        assert!((inputs["cosdphi_dipho"] - 2.5_f64.cos()).abs() < 1e-9);
    }

    #[test]
    fn test_stxs_pt_balance() {
        let config = ZhLeptonicConfig::default();
        let sel = select_dileptons(&config, &z_muons(), &[], &diphoton());
        let pair = sel.primary().unwrap();
        let inputs = stxs_inputs(&diphoton(), pair, &CleanedJets::default());

        let gg = diphoton().p4().pt();
        let ll = pair.p4().pt();
        assert!((inputs["pt_balance"] - (gg - ll) / gg).abs() < 1e-9);
        assert!(inputs["dphi_dipho_dilep"] >= 0.0);
    }

    #[test]
    fn test_ac_inputs_fill_absent_flavour() {
        let config = ZhLeptonicConfig::default();
        let sel = select_dileptons(&config, &z_muons(), &[], &diphoton());
        let inputs = ac_inputs(&diphoton(), &sel);

        assert_eq!(inputs.len(), ZH_AC_INPUTS.len());
        for name in [
            "cosPhiG1_Ele1",
            "cosPhiG1_Ele2",
            "dR_Pho1Ele1_wh",
            "dR_Pho2Ele1_wh",
            "ele1_energy",
            "ele1_pt",
            "ele2_pt",
        ] {
            assert_eq!(inputs[name], MISSING_OBJECT_DEFAULT, "{name}");
        }
        assert!((inputs["mu1_pt"] - 45.0).abs() < 1e-9);
        assert!((inputs["mu2_phi"] - 2.0).abs() < 1e-9);
        assert!((inputs["cosPhiG1_Mu1"] - (-1.0_f64).cos()).abs() < 1e-9);
    }

    #[test]
    fn test_ac_inputs_use_both_flavours() {
        let config = ZhLeptonicConfig::default();
        let sel = select_dileptons(&config, &z_muons(), &z_electrons(), &diphoton());
        let inputs = ac_inputs(&diphoton(), &sel);

        assert!(inputs.values().all(|&v| v != MISSING_OBJECT_DEFAULT));
        assert!((inputs["ele1_pt"] - 45.0).abs() < 1e-9);
    }
}

mod tagger_tests {
    use super::*;

    #[test]
    fn test_reco_tag_mapping() {
        assert_eq!(RecoTag::from_category(0), RecoTag::ZhLepTag0);
        assert_eq!(RecoTag::from_category(1), RecoTag::ZhLepTag1);
        assert_eq!(RecoTag::from_category(2), RecoTag::LogicError);
        assert_eq!(
            serde_json::to_string(&RecoTag::ZhLepTag1).unwrap(),
            "\"RECO_ZH_LEP_Tag1\""
        );
    }

    #[test]
    fn test_tight_category() {
        let tag = tagger(0.8, 0.7)
            .tag(&event(z_muons(), vec![]), 0)
            .unwrap()
            .unwrap();

        assert_eq!(tag.category, 0);
        assert_eq!(tag.reco_tag, RecoTag::ZhLepTag0);
        assert_eq!(tag.lepton_type, Flavor::Muon);
        assert_eq!(tag.stxs_score, 0.8);
        assert_eq!(tag.ac_0m_score, 0.7);
        assert_eq!(tag.ac_0ph_score, 0.4);
        assert_eq!(tag.ac_0l1_score, 0.6);
        assert_eq!(tag.jets.indices, vec![0, 1]);
    }

    #[test]
    fn test_loose_category() {
        let tag = tagger(0.3, 0.7)
            .tag(&event(vec![], z_electrons()), 0)
            .unwrap()
            .unwrap();
        assert_eq!(tag.category, 1);
        assert_eq!(tag.reco_tag, RecoTag::ZhLepTag1);
        assert_eq!(tag.lepton_type, Flavor::Electron);
    }

    #[test]
    fn test_no_category_no_tag() {
        let tagger = tagger(-2.0, 0.7);
        assert!(tagger.tag(&event(z_muons(), vec![]), 0).unwrap().is_none());
        assert!(tagger.tag_event(&event(z_muons(), vec![])).unwrap().is_empty());
    }

    #[test]
    fn test_extra_category_is_logic_error() {
        let config = ZhLeptonicConfig::default()
            .with_ac_boundaries(vec![
                1.0, 0.9, 1.0, -1.0, //
                0.9, 0.8, 1.0, -1.0, //
                0.8, -1.0, 1.0, -1.0,
            ])
            .unwrap();
        let tag = tagger_with(config, 0.5, 0.1)
            .tag(&event(z_muons(), vec![]), 0)
            .unwrap()
            .unwrap();
        assert_eq!(tag.category, 2);
        assert_eq!(tag.reco_tag, RecoTag::LogicError);
    }

    #[test]
    fn test_requirements_gate_scoring() {
        let stxs = mock(0.8);
        let tagger = ZhLeptonicTagger::with_models(
            ZhLeptonicConfig::default(),
            Box::new(stxs.clone()),
            Box::new(mock(0.7)),
            Box::new(mock(0.4)),
            Box::new(mock(0.6)),
        )
        .unwrap();

        assert!(tagger.tag(&event(vec![], vec![]), 0).unwrap().is_none());

        let mut failing = event(z_muons(), vec![]);
        failing.diphotons[0].mva_result = -2.0;
        assert!(tagger.tag(&failing, 0).unwrap().is_none());
        assert_eq!(stxs.call_count(), 0);

        assert!(tagger.tag(&event(z_muons(), vec![]), 0).unwrap().is_some());
        assert_eq!(stxs.call_count(), 1);
    }

    #[test]
    fn test_unknown_output_class_is_error() {
        let tagger = ZhLeptonicTagger::with_models(
            ZhLeptonicConfig::default(),
            Box::new(MockScoringModel::new([("sig", 0.8)])),
            Box::new(mock(0.7)),
            Box::new(mock(0.4)),
            Box::new(mock(0.6)),
        )
        .unwrap();

        let err = tagger.tag(&event(z_muons(), vec![]), 0).unwrap_err();
        assert!(matches!(
            err,
            TaggerError::Scoring(ScoringError::UnknownOutputClass { ref name }) if name == "signal"
        ));
    }

    #[test]
    fn test_missing_jet_collection() {
        let mut ev = event(z_muons(), vec![]);
        ev.diphotons[0].jet_collection_index = 3;
        let err = tagger(0.8, 0.7).tag(&ev, 0).unwrap_err();
        assert!(matches!(
            err,
            TaggerError::MissingJetCollection {
                index: 3,
                available: 1
            }
        ));
    }

    #[test]
    fn test_out_of_range_candidate() {
        assert!(tagger(0.8, 0.7).tag(&event(z_muons(), vec![]), 5).unwrap().is_none());
    }

    #[test]
    fn test_stub_models_evaluate() {
        let tagger = ZhLeptonicTagger::new(ZhLeptonicConfig::default()).unwrap();
        // Stub outputs are a two-class softmax, so any tag carries probabilities.
        if let Some(tag) = tagger.tag(&event(z_muons(), vec![]), 0).unwrap() {
            assert!(tag.stxs_score > 0.0 && tag.stxs_score < 1.0);
        }
    }
}
