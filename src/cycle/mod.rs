// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Cycle detection on implicit functional graphs.
//!
//! The graph is never materialised: it is a successor function over a
//! finite state type. [`find_cycle`] runs Floyd's tortoise-and-hare search
//! from a start state, and [`check_gates`] uses it to certify that no gate
//! state lies on the cycle eventually reached from any gate.
//!
//! Every phase of the search is capped at the size of the state space, which
//! bounds both the transient and the cycle length. Hitting the cap means the
//! state representation is not actually finite and is reported as an error.
//!
//! # Examples
//!
//! ```
//! use collatz_cert::cycle::find_cycle;
//!
//! // 0 -> 1 -> 2 -> 3 -> 1
//! let next = [1u32, 2, 3, 1];
//! let info = find_cycle(0u32, |s: &u32| Ok(next[*s as usize]), 4).unwrap();
//! assert_eq!((info.transient, info.length), (1, 3));
//! assert_eq!(info.entry, 1);
//! ```

pub mod gate;

pub use gate::{gate_states, is_gate_state, lift_successor, verify_gate_cycles};

use serde::Serialize;
use std::fmt::Debug;

use crate::errors::VerifyError;

/// Shape of the trajectory from a start state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleInfo<S> {
    /// First state of the trajectory that lies on the cycle.
    pub entry: S,
    /// Number of steps before the cycle is entered (`μ`).
    pub transient: u64,
    /// Cycle length (`λ`).
    pub length: u64,
    /// Smallest state on the cycle.
    pub representative: S,
    /// Successor evaluations spent.
    pub evaluations: u64,
}

/// Result of the cycle check from one gate state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateOutcome<S> {
    pub gate: S,
    pub cycle: CycleInfo<S>,
    /// A gate state found on the cycle, if any.
    pub violation: Option<S>,
}

impl<S> GateOutcome<S> {
    pub fn passed(&self) -> bool {
        self.violation.is_none()
    }
}

/// Per-gate results, in gate order. Stops after the first violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateReport<S> {
    pub outcomes: Vec<GateOutcome<S>>,
    pub gates_total: usize,
}

impl<S> GateReport<S> {
    pub fn holds(&self) -> bool {
        self.outcomes.iter().all(GateOutcome::passed)
    }

    pub fn violation(&self) -> Option<&GateOutcome<S>> {
        self.outcomes.iter().find(|o| !o.passed())
    }

    pub fn evaluations(&self) -> u64 {
        self.outcomes.iter().map(|o| o.cycle.evaluations).sum()
    }
}

fn cap_exceeded(cap: u64) -> VerifyError {
    VerifyError::IterationCapExceeded {
        what: "Floyd cycle search",
        cap,
    }
}

/// Floyd's cycle search from `start` under `successor`.
///
/// `cap` bounds each phase (meeting, transient, cycle walk) and should be
/// the number of reachable states.
pub fn find_cycle<S, F>(start: S, mut successor: F, cap: u64) -> Result<CycleInfo<S>, VerifyError>
where
    S: Clone + Ord + Debug,
    F: FnMut(&S) -> Result<S, VerifyError>,
{
    let mut evaluations: u64 = 0;
    let mut step = |s: &S| {
        evaluations += 1;
        successor(s)
    };

    // Tortoise moves 1, hare moves 2, until they meet on the cycle.
    let mut tortoise = step(&start)?;
    let mut hare = step(&start)?;
    hare = step(&hare)?;
    let mut rounds: u64 = 0;
    while tortoise != hare {
        rounds += 1;
        if rounds > cap {
            return Err(cap_exceeded(cap));
        }
        tortoise = step(&tortoise)?;
        hare = step(&hare)?;
        hare = step(&hare)?;
    }

    // Restart the tortoise; both now move 1 and meet at the cycle entry.
    let mut transient: u64 = 0;
    tortoise = start;
    while tortoise != hare {
        transient += 1;
        if transient > cap {
            return Err(cap_exceeded(cap));
        }
        tortoise = step(&tortoise)?;
        hare = step(&hare)?;
    }
    let entry = tortoise;

    let mut length: u64 = 1;
    let mut representative = entry.clone();
    let mut current = step(&entry)?;
    while current != entry {
        length += 1;
        if length > cap {
            return Err(cap_exceeded(cap));
        }
        if current < representative {
            representative = current.clone();
        }
        current = step(&current)?;
    }

    Ok(CycleInfo {
        entry,
        transient,
        length,
        representative,
        evaluations,
    })
}

/// First state on the cycle starting at `info.entry` that satisfies `is_gate`.
fn gate_on_cycle<S, F, G>(
    info: &CycleInfo<S>,
    successor: &mut F,
    is_gate: &G,
) -> Result<Option<S>, VerifyError>
where
    S: Clone,
    F: FnMut(&S) -> Result<S, VerifyError>,
    G: Fn(&S) -> bool,
{
    let mut current = info.entry.clone();
    for _ in 0..info.length {
        if is_gate(&current) {
            return Ok(Some(current));
        }
        current = successor(&current)?;
    }
    Ok(None)
}

/// Check that the eventual cycle of every gate avoids the gate set.
///
/// Gates are processed in order and the search stops at the first violation.
pub fn check_gates<S, F, G>(
    gates: &[S],
    is_gate: G,
    mut successor: F,
    cap: u64,
) -> Result<GateReport<S>, VerifyError>
where
    S: Clone + Ord + Debug,
    F: FnMut(&S) -> Result<S, VerifyError>,
    G: Fn(&S) -> bool,
{
    let mut outcomes = Vec::with_capacity(gates.len());
    for gate in gates {
        let cycle = find_cycle(gate.clone(), &mut successor, cap)?;
        let violation = gate_on_cycle(&cycle, &mut successor, &is_gate)?;
        let stop = violation.is_some();
        outcomes.push(GateOutcome {
            gate: gate.clone(),
            cycle,
            violation,
        });
        if stop {
            break;
        }
    }
    Ok(GateReport {
        outcomes,
        gates_total: gates.len(),
    })
}
