// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bounded witness search for the avoidance certificate.
//!
//! The avoidance set at resolution `m0` is
//!
//! ```text
//! A = { r odd mod 2^m0 : for all ℓ < L, j < J:  v2(3·x_j + 1) < K }
//! ```
//!
//! where `x_0 = r + ℓ·2^m0` and `x_{j+1} = U(x_j)`. The certificate holds
//! when `A` is empty, i.e. every residue has a witness `(ℓ, j, b)` with `b ≥ K`.
//!
//! # Stepping discipline
//!
//! Each step `j` applies [`odd_step`] exactly once. The valuation returned by
//! that application is compared to `K`, and the successor returned by the
//! same application becomes `x_{j+1}`. Witnesses are therefore attributed to
//! the step whose `3x + 1` produced the spike.
//!
//! # Examples
//!
//! ```
//! use collatz_cert::config::AvoidanceParams;
//! use collatz_cert::search::{find_witness, Witness};
//!
//! let params = AvoidanceParams { m0: 4, horizon: 4, threshold: 2, lifts: 4 };
//! // 3·3 + 1 = 10, then 3·5 + 1 = 16.
//! assert_eq!(
//!     find_witness(3, &params).unwrap(),
//!     Some(Witness { lift: 0, step: 1, valuation: 4 })
//! );
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::arith::{odd_step, Step};
use crate::config::AvoidanceParams;
use crate::errors::VerifyError;
use crate::state::LiftState;

/// Residues between progress messages.
const PROGRESS_INTERVAL: u64 = 4096;

/// A spike found at step `step` of lift `lift`, with valuation `valuation ≥ K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Witness {
    pub lift: u32,
    pub step: u32,
    pub valuation: u32,
}

/// A witness tagged with the residue it certifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResidueWitness {
    pub residue: u64,
    #[serde(flatten)]
    pub witness: Witness,
}

/// Receives witnesses in canonical order (ascending residue).
pub trait WitnessSink {
    fn record(&mut self, witness: &ResidueWitness);
}

/// Discards every witness.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl WitnessSink for NullSink {
    fn record(&mut self, _witness: &ResidueWitness) {}
}

impl WitnessSink for Vec<ResidueWitness> {
    fn record(&mut self, witness: &ResidueWitness) {
        self.push(*witness);
    }
}

/// Totals of one pass over all odd residues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvoidanceReport {
    pub params: AvoidanceParams,
    pub residues_checked: u64,
    pub witnesses_found: u64,
    /// Residues with no witness, ascending. Empty iff the certificate holds.
    pub survivors: Vec<u64>,
    /// Residue whose earliest spike (over all lifts) comes latest.
    pub hardest: Option<ResidueWitness>,
}

impl AvoidanceReport {
    pub fn holds(&self) -> bool {
        self.survivors.is_empty()
    }
}

/// Starting point `r + ℓ·2^m0`, checking the residue against the window.
fn start(residue: u64, lift: u32, params: &AvoidanceParams) -> Result<u128, VerifyError> {
    Ok(LiftState::new(residue, lift, params.m0, params.lifts)?.value(params.m0))
}

/// First spike of a single lift, scanning steps `0..limit`.
fn first_spike(
    residue: u64,
    lift: u32,
    limit: u32,
    params: &AvoidanceParams,
) -> Result<Option<Witness>, VerifyError> {
    let mut x = start(residue, lift, params)?;
    for step in 0..limit {
        let Step { next, valuation } = odd_step(x)?;
        if valuation >= params.threshold {
            return Ok(Some(Witness {
                lift,
                step,
                valuation,
            }));
        }
        x = next;
    }
    Ok(None)
}

/// First witness for `residue` in `(ℓ, j)` lexicographic order, or `None`
/// if the residue survives every lift for the whole horizon.
pub fn find_witness(
    residue: u64,
    params: &AvoidanceParams,
) -> Result<Option<Witness>, VerifyError> {
    for lift in 0..params.lifts {
        if let Some(witness) = first_spike(residue, lift, params.horizon, params)? {
            return Ok(Some(witness));
        }
    }
    Ok(None)
}

/// Witness with the smallest step over all lifts; ties go to the smaller lift.
pub fn earliest_spike(
    residue: u64,
    params: &AvoidanceParams,
) -> Result<Option<Witness>, VerifyError> {
    let mut best: Option<Witness> = None;
    for lift in 0..params.lifts {
        // A later lift only matters if it spikes strictly earlier.
        let limit = best.map_or(params.horizon, |w| w.step);
        if let Some(witness) = first_spike(residue, lift, limit, params)? {
            best = Some(witness);
        }
        if best.is_some_and(|w| w.step == 0) {
            break;
        }
    }
    Ok(best)
}

/// Check every odd residue modulo `2^m0`, streaming witnesses into `sink`.
pub fn verify_avoidance(
    params: &AvoidanceParams,
    sink: &mut dyn WitnessSink,
) -> Result<AvoidanceReport, VerifyError> {
    params.validate()?;
    info!(
        m0 = params.m0,
        horizon = params.horizon,
        threshold = params.threshold,
        lifts = params.lifts,
        residues = params.residue_count(),
        "avoidance: searching witnesses"
    );

    let mut report = AvoidanceReport {
        params: *params,
        residues_checked: 0,
        witnesses_found: 0,
        survivors: Vec::new(),
        hardest: None,
    };

    for residue in (1..1u64 << params.m0).step_by(2) {
        report.residues_checked += 1;
        match find_witness(residue, params)? {
            None => {
                warn!(residue, "avoidance: survivor residue has no witness");
                report.survivors.push(residue);
            }
            Some(witness) => {
                report.witnesses_found += 1;
                sink.record(&ResidueWitness { residue, witness });

                if let Some(early) = earliest_spike(residue, params)? {
                    let later = report
                        .hardest
                        .is_none_or(|h| early.step > h.witness.step);
                    if later {
                        report.hardest = Some(ResidueWitness {
                            residue,
                            witness: early,
                        });
                    }
                }
            }
        }
        if report.residues_checked % PROGRESS_INTERVAL == 0 {
            debug!(
                checked = report.residues_checked,
                total = params.residue_count(),
                "avoidance: progress"
            );
        }
    }

    info!(
        checked = report.residues_checked,
        witnesses = report.witnesses_found,
        survivors = report.survivors.len(),
        "avoidance: search complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> AvoidanceParams {
        AvoidanceParams {
            m0: 4,
            horizon: 4,
            threshold: 2,
            lifts: 4,
        }
    }

    #[test]
    fn test_find_witness_single_step_attribution() {
        // r = 7: 7 -> 11 (b=1) -> 17 (b=1) -> 13 (b=2)
        let w = find_witness(7, &small()).unwrap().unwrap();
        assert_eq!(
            w,
            Witness {
                lift: 0,
                step: 2,
                valuation: 2
            }
        );
    }

    #[test]
    fn test_find_witness_prefers_lower_lift() {
        // r = 1 spikes immediately for ℓ = 0 (3·1 + 1 = 4) and ℓ = 2 (3·33 + 1 = 100).
        let w = find_witness(1, &small()).unwrap().unwrap();
        assert_eq!((w.lift, w.step), (0, 0));
    }

    #[test]
    fn test_find_witness_rejects_even_residue() {
        assert!(matches!(
            find_witness(6, &small()),
            Err(VerifyError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_survivor_when_horizon_too_short() {
        let params = AvoidanceParams {
            m0: 4,
            horizon: 2,
            threshold: 3,
            lifts: 2,
        };
        assert_eq!(find_witness(7, &params).unwrap(), None);
    }

    #[test]
    fn test_earliest_spike_scans_all_lifts() {
        // r = 1, m0 = 16: lift 0 is the fixed point 1 (b = 2 forever),
        // lift 1 spikes at step 15, lifts 3, 7, 11 and 15 at step 7.
        let params = AvoidanceParams::default();
        let first = find_witness(1, &params).unwrap().unwrap();
        let early = earliest_spike(1, &params).unwrap().unwrap();
        assert_eq!(
            first,
            Witness {
                lift: 1,
                step: 15,
                valuation: 5
            }
        );
        assert_eq!(
            early,
            Witness {
                lift: 3,
                step: 7,
                valuation: 4
            }
        );
    }

    #[test]
    fn test_verify_avoidance_streams_in_order() {
        let mut seen: Vec<ResidueWitness> = Vec::new();
        let report = verify_avoidance(&small(), &mut seen).unwrap();
        assert!(report.holds());
        assert_eq!(report.residues_checked, 8);
        let residues: Vec<u64> = seen.iter().map(|w| w.residue).collect();
        assert_eq!(residues, vec![1, 3, 5, 7, 9, 11, 13, 15]);
    }
}
