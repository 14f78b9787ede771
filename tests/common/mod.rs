// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use collatz_cert::config::{AvoidanceParams, TowerParams};
use collatz_cert::search::ResidueWitness;

/// Small enough to check by hand: 8 odd residues, 4 lifts, 4 steps.
pub fn scenario_a() -> AvoidanceParams {
    AvoidanceParams {
        m0: 4,
        horizon: 4,
        threshold: 2,
        lifts: 4,
    }
}

/// Too short a horizon for residues 7, 9, 11, 15 mod 16.
pub fn short_horizon() -> AvoidanceParams {
    AvoidanceParams {
        m0: 4,
        horizon: 2,
        threshold: 3,
        lifts: 2,
    }
}

/// `T ∈ [2, 5]`, `q mod 2^6`.
pub fn scenario_b() -> TowerParams {
    TowerParams {
        t_max: 5,
        ..TowerParams::new(4, 2)
    }
}

/// Tower window `T ∈ [2, KQ + 2]`, `q mod 2^KQ`.
pub fn tower_window(q_bits: u32) -> TowerParams {
    TowerParams::new(q_bits - 2, 2)
}

/// `(r, ℓ, j, b)` tuples for compact assertions.
pub fn tuples(witnesses: &[ResidueWitness]) -> Vec<(u64, u32, u32, u32)> {
    witnesses
        .iter()
        .map(|w| (w.residue, w.witness.lift, w.witness.step, w.witness.valuation))
        .collect()
}
