//! Per-event pipeline benchmark.
//!
//! Runs the hadronic tagger with the stub model over events of growing jet multiplicity.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use vhtag::config::TaggerConfig;
use vhtag::event::{DiPhotonCandidate, Event, Jet, Photon};
use vhtag::kinematics::LorentzVector;
use vhtag::selection::GreedyRanker;
use vhtag::tagger::VhHadTagger;

fn make_event(n_jets: usize) -> Event {
    let jets: Vec<Jet> = (0..n_jets)
        .map(|i| {
            let pt = 20.0 + (i as f64 * 37.3) % 120.0;
            let eta = -2.4 + (i as f64 * 0.77) % 4.8;
            let phi = -3.1 + (i as f64 * 1.13) % 6.2;
            Jet::new(LorentzVector::from_pt_eta_phi_m(pt, eta, phi, 5.0))
        })
        .collect();

    let diphoton = DiPhotonCandidate::new(
        Photon::new(LorentzVector::from_pt_eta_phi_m(70.0, 0.3, 1.2, 0.0), 0.9),
        Photon::new(LorentzVector::from_pt_eta_phi_m(45.0, -0.8, -1.9, 0.0), 0.7),
    );

    Event {
        id: n_jets as u64,
        jet_collections: vec![jets],
        diphotons: vec![diphoton],
        ..Default::default()
    }
}

fn bench_process_event(c: &mut Criterion) {
    let tagger = match VhHadTagger::new(&TaggerConfig::default()) {
        Ok(tagger) => tagger,
        Err(e) => panic!("stub tagger failed to build: {e}"),
    };

    let mut group = c.benchmark_group("process_event");
    for n_jets in [2usize, 8, 32] {
        let event = make_event(n_jets);
        group.bench_with_input(BenchmarkId::from_parameter(n_jets), &event, |b, event| {
            b.iter(|| tagger.process_event(black_box(event)))
        });
    }
    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let pts: Vec<(usize, f64)> = (0..64)
        .map(|i| (i, 20.0 + (i as f64 * 37.3) % 120.0))
        .collect();

    c.bench_function("greedy_rank_64", |b| {
        b.iter(|| GreedyRanker::rank(black_box(pts.iter().copied())))
    });
}

criterion_group!(benches, bench_process_event, bench_rank);
criterion_main!(benches);
