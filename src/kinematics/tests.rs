use super::*;

const EPS: f64 = 1e-9;

fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

#[test]
fn test_delta_phi_wraps_across_pi() {
    let dphi = delta_phi(3.0, -3.0);
    assert!(approx(dphi.abs(), 2.0 * PI - 6.0, 1e-12));
    assert!(approx(dphi.abs(), 0.2832, 1e-4));
}

#[test]
fn test_delta_phi_absolute_range_for_all_sign_combinations() {
    let samples = [-PI, -2.5, -1.0, -0.1, 0.0, 0.1, 1.0, 2.5, PI];
    for &a in &samples {
        for &b in &samples {
            let d = delta_phi(a, b).abs();
            assert!((0.0..=PI + EPS).contains(&d), "phi1={a}, phi2={b}, got {d}");
        }
    }
}

#[test]
fn test_delta_phi_is_antisymmetric() {
    let d1 = delta_phi(1.2, -0.7);
    let d2 = delta_phi(-0.7, 1.2);
    assert!(approx(d1, -d2, EPS));
    assert!(approx(d1, 1.9, EPS));
}

#[test]
fn test_delta_r_uses_wrapped_phi() {
    let dr = delta_r(0.0, 3.1, 0.0, -3.1);
    assert!(dr < 0.1);

    let dr = delta_r(1.0, 0.0, -2.0, 0.0);
    assert!(approx(dr, 3.0, EPS));
}

#[test]
fn test_from_pt_eta_phi_m_roundtrips_coordinates() {
    let v = LorentzVector::from_pt_eta_phi_m(45.0, -1.3, 2.2, 5.0);

    assert!(approx(v.pt(), 45.0, 1e-9));
    assert!(approx(v.eta(), -1.3, 1e-9));
    assert!(approx(v.phi(), 2.2, 1e-9));
    assert!(approx(v.mass(), 5.0, 1e-6));
}

#[test]
fn test_massless_back_to_back_pair_mass() {
    let a = LorentzVector::from_pt_eta_phi_m(50.0, 0.0, 0.0, 0.0);
    let b = LorentzVector::from_pt_eta_phi_m(50.0, 0.0, PI, 0.0);
    let sum = a + b;

    assert!(approx(sum.mass(), 100.0, 1e-9));
    assert!(sum.pt() < 1e-9);
}

#[test]
fn test_space_like_mass_is_negative() {
    let v = LorentzVector::new(3.0, 4.0, 0.0, 1.0);
    assert!(approx(v.mass(), -(24.0f64).sqrt(), EPS));
}

#[test]
fn test_eta_along_beam_axis() {
    let forward = LorentzVector::new(0.0, 0.0, 10.0, 10.0);
    let backward = LorentzVector::new(0.0, 0.0, -10.0, 10.0);
    let at_rest = LorentzVector::new(0.0, 0.0, 0.0, 1.0);

    assert!(forward.eta() > 1e9);
    assert!(backward.eta() < -1e9);
    assert_eq!(at_rest.eta(), 0.0);
    assert_eq!(at_rest.phi(), 0.0);
}

#[test]
fn test_rapidity_equals_eta_for_massless() {
    let v = LorentzVector::from_pt_eta_phi_m(30.0, 1.7, 0.3, 0.0);
    assert!(approx(v.rapidity(), 1.7, 1e-9));
}

#[test]
fn test_boost_into_own_rest_frame() {
    let v = LorentzVector::from_pt_eta_phi_m(80.0, 0.9, -1.1, 125.0);
    let rest = v.in_rest_frame_of(&v);

    assert!(rest.p() < 1e-6);
    assert!(approx(rest.e, 125.0, 1e-6));
}

#[test]
fn test_boost_preserves_mass() {
    let v = LorentzVector::from_pt_eta_phi_m(20.0, 0.4, 0.5, 10.0);
    let frame = LorentzVector::from_pt_eta_phi_m(150.0, -0.8, 2.0, 300.0);
    let boosted = v.in_rest_frame_of(&frame);

    assert!(approx(boosted.mass(), 10.0, 1e-6));
}

#[test]
fn test_zero_boost_is_identity() {
    let v = LorentzVector::new(1.0, 2.0, 3.0, 10.0);
    assert_eq!(v.boosted([0.0, 0.0, 0.0]), v);
}

#[test]
fn test_cos_theta() {
    assert_eq!(LorentzVector::new(0.0, 0.0, 0.0, 1.0).cos_theta(), 1.0);
    assert!(approx(LorentzVector::new(1.0, 0.0, 1.0, 2.0).cos_theta(), 1.0 / 2f64.sqrt(), EPS));
    assert!(approx(LorentzVector::new(0.0, 0.0, -5.0, 6.0).cos_theta(), -1.0, EPS));
}

#[test]
fn test_sum_of_vectors() {
    let vs = [
        LorentzVector::new(1.0, 0.0, 0.0, 2.0),
        LorentzVector::new(0.0, 1.0, 0.0, 2.0),
        LorentzVector::new(0.0, 0.0, 1.0, 2.0),
    ];
    let total: LorentzVector = vs.iter().copied().sum();
    assert_eq!(total, LorentzVector::new(1.0, 1.0, 1.0, 6.0));

    let mut acc = LorentzVector::default();
    acc += vs[0];
    assert_eq!(acc, vs[0]);
}
