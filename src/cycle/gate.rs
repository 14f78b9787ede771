// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Gate-cycle certificate on lift-states.
//!
//! The lift-state map is
//!
//! ```text
//! F_m(r, ℓ) = (x' mod 2^m, x' >> m)   where x' = U(r + ℓ·2^m) mod 2^(m + log2 L)
//! ```
//!
//! and the gate is `I_m = {(2^m - 1, ℓ) : ℓ odd}`, i.e. `x ≡ -1 (mod 2^(m+1))`.
//! The certificate holds when no cycle of `F_m` reached from a gate state
//! contains a gate state.

use tracing::{debug, info, warn};

use super::{check_gates, GateReport};
use crate::arith::{mask, odd_step};
use crate::config::GateCycleParams;
use crate::errors::VerifyError;
use crate::state::LiftState;

/// One application of `F_m`.
#[inline]
pub fn lift_successor(state: &LiftState, params: &GateCycleParams) -> Result<LiftState, VerifyError> {
    let m = params.m;
    let next = odd_step(state.value(m))?.next;
    let reduced = (next & u128::from(mask(m + params.lift_bits()))) as u64;
    Ok(LiftState::from_parts(reduced & mask(m), (reduced >> m) as u32))
}

pub fn is_gate_state(state: &LiftState, params: &GateCycleParams) -> bool {
    state.residue() == mask(params.m) && state.lift() & 1 == 1
}

/// Gate states `(2^m - 1, ℓ)` for odd `ℓ`, ascending.
pub fn gate_states(params: &GateCycleParams) -> Result<Vec<LiftState>, VerifyError> {
    (1..params.lifts)
        .step_by(2)
        .map(|lift| LiftState::new(mask(params.m), lift, params.m, params.lifts))
        .collect()
}

/// Run the Floyd check from every gate state.
pub fn verify_gate_cycles(params: &GateCycleParams) -> Result<GateReport<LiftState>, VerifyError> {
    params.validate()?;
    let gates = gate_states(params)?;
    let cap = params.state_space();
    info!(
        m = params.m,
        lifts = params.lifts,
        gates = gates.len(),
        cap,
        "gate cycle: checking eventual cycles"
    );

    let report = check_gates(
        &gates,
        |s| is_gate_state(s, params),
        |s| lift_successor(s, params),
        cap,
    )?;

    for outcome in &report.outcomes {
        debug!(
            gate = %outcome.gate,
            transient = outcome.cycle.transient,
            length = outcome.cycle.length,
            representative = %outcome.cycle.representative,
            "gate cycle: eventual cycle"
        );
    }
    if let Some(bad) = report.violation() {
        warn!(
            gate = %bad.gate,
            representative = %bad.cycle.representative,
            "gate cycle: gate state lies on an eventual cycle"
        );
    }
    Ok(report)
}
