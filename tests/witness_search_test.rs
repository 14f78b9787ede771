// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Integration tests for the bounded witness search.

mod common;

use collatz_cert::arith::odd_step;
use collatz_cert::config::AvoidanceParams;
use collatz_cert::report::WitnessFingerprint;
use collatz_cert::search::{
    earliest_spike, find_witness, verify_avoidance, NullSink, ResidueWitness, Witness,
};

#[test]
fn test_scenario_a_every_residue_has_a_witness() {
    let mut seen: Vec<ResidueWitness> = Vec::new();
    let report = verify_avoidance(&common::scenario_a(), &mut seen).unwrap();

    assert!(report.holds());
    assert_eq!(report.residues_checked, 8);
    assert_eq!(report.witnesses_found, 8);
    assert_eq!(
        common::tuples(&seen),
        vec![
            (1, 0, 0, 2),
            (3, 0, 1, 4),
            (5, 0, 0, 4),
            (7, 0, 2, 2),
            (9, 0, 0, 2),
            (11, 0, 1, 2),
            (13, 0, 0, 3),
            (15, 0, 3, 5),
        ]
    );
}

#[test]
fn test_scenario_a_fingerprint() {
    let mut fp = WitnessFingerprint::new(4);
    verify_avoidance(&common::scenario_a(), &mut fp).unwrap();
    assert_eq!(fp.count(), 8);
    assert_eq!(
        fp.hex_digest(),
        "088ec66d65e93aff97a8a4a744a56f346e4df3afc580f99053083314b5ad309e"
    );
}

#[test]
fn test_short_horizon_reports_survivors() {
    let mut seen: Vec<ResidueWitness> = Vec::new();
    let report = verify_avoidance(&common::short_horizon(), &mut seen).unwrap();

    assert!(!report.holds());
    assert_eq!(report.survivors, vec![7, 9, 11, 15]);
    assert_eq!(report.witnesses_found, 4);
    assert_eq!(
        common::tuples(&seen),
        vec![(1, 1, 1, 3), (3, 0, 1, 4), (5, 0, 0, 4), (13, 0, 0, 3)]
    );
}

#[test]
fn test_search_is_deterministic() {
    let params = AvoidanceParams::default();
    for r in [1u64, 255, 4097, 65535] {
        assert_eq!(
            find_witness(r, &params).unwrap(),
            find_witness(r, &params).unwrap()
        );
    }
    let first = verify_avoidance(&common::scenario_a(), &mut NullSink).unwrap();
    let second = verify_avoidance(&common::scenario_a(), &mut NullSink).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_witness_is_lexicographic_minimum() {
    // Residue 1 mod 2^16 has witnesses on lifts 1, 2, 3, ... Lift 1 spikes
    // at step 15 while lift 3 spikes at step 7: the search must still
    // return lift 1, the smaller (ℓ, j).
    let params = AvoidanceParams::default();
    let w = find_witness(1, &params).unwrap().unwrap();
    assert_eq!(
        w,
        Witness {
            lift: 1,
            step: 15,
            valuation: 5
        }
    );

    // Brute-force every (ℓ, j) witness and compare with the minimum.
    let mut all = Vec::new();
    for lift in 0..params.lifts {
        let mut x = 1u128 + (u128::from(lift) << params.m0);
        for step in 0..params.horizon {
            let s = odd_step(x).unwrap();
            if s.valuation >= params.threshold {
                all.push((lift, step));
            }
            x = s.next;
        }
    }
    assert_eq!(all.iter().min(), Some(&(w.lift, w.step)));
    assert!(all.contains(&(3, 7)));
}

#[test]
fn test_earliest_spike_never_later_than_first_witness() {
    let params = common::scenario_a();
    for r in (1..16u64).step_by(2) {
        let first = find_witness(r, &params).unwrap().unwrap();
        let early = earliest_spike(r, &params).unwrap().unwrap();
        assert!(early.step <= first.step, "r = {}", r);
    }
}

#[test]
fn test_default_certificate_a16_is_empty() {
    let params = AvoidanceParams::default();
    let mut fp = WitnessFingerprint::new(params.m0);
    let report = verify_avoidance(&params, &mut fp).unwrap();

    assert!(report.holds());
    assert_eq!(report.residues_checked, 32768);
    assert_eq!(report.witnesses_found, 32768);
    let hardest = report.hardest.unwrap();
    assert_eq!(
        (
            hardest.residue,
            hardest.witness.lift,
            hardest.witness.step,
            hardest.witness.valuation
        ),
        (65535, 0, 15, 7)
    );
    assert_eq!(
        fp.hex_digest(),
        "b3df1347d2396a9b6b6ff5bc35759ab317efc9339a0d7c14dfd75e7f95f3f08e"
    );
}

#[test]
fn test_invalid_parameters_fail_before_search() {
    let params = AvoidanceParams {
        m0: 0,
        ..AvoidanceParams::default()
    };
    let mut seen: Vec<ResidueWitness> = Vec::new();
    assert!(verify_avoidance(&params, &mut seen).is_err());
    assert!(seen.is_empty());
}
