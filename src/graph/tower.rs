// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Truncated `(T, q)` tower graph.
//!
//! A state `(T, q)` is admissible (a *minimal exit*) when `u = 3^T·q` satisfies
//! `v2(u - 1) = 1`, i.e. `u ≡ 3 (mod 4)`. Its re-entry is
//!
//! ```text
//! T' = v2(u + 1) - 1,    q' = (u + 1) / 2^(T' + 1)
//! ```
//!
//! All arithmetic is done modulo `2^KQ`. A state has no successor when
//! `u + 1` vanishes in the window, when `T' < 2`, when `T'` leaves the depth
//! window, or when `(T', q')` is not itself a minimal exit.

use tracing::info;

use super::{TransitionGraph, VertexId};
use crate::arith::{mask, v2_masked};
use crate::config::TowerParams;
use crate::errors::VerifyError;
use crate::memo::Pow3Table;
use crate::state::TowerState;

/// Marks an empty slot of the dense vertex index.
const NO_VERTEX: VertexId = VertexId::MAX;

/// `v2(u - 1) = 1` inside a window of `bits` bits.
#[inline]
pub fn is_minimal_exit(u: u64, bits: u32) -> bool {
    u & 3 == 3 && v2_masked(u - 1, bits) == Some(1)
}

/// `3^T·q mod 2^KQ`, or `None` if `T` is outside the table.
#[inline]
fn exit_value(depth: u32, q: u64, pow3: &Pow3Table) -> Option<u64> {
    Some((pow3.get(depth)? * q) & mask(pow3.bits()))
}

/// Closed-form successor of an admissible tower state.
pub fn tower_successor(
    state: &TowerState,
    params: &TowerParams,
    pow3: &Pow3Table,
) -> Option<TowerState> {
    let bits = params.q_bits;
    let u = exit_value(state.depth(), state.q(), pow3)?;

    let t_plus = v2_masked(u + 1, bits)?;
    if t_plus < 2 {
        return None;
    }
    let depth = t_plus - 1;
    let q = (u + 1) >> t_plus;
    if q & 1 == 0 || !params.contains_depth(depth) {
        return None;
    }
    let q = q & mask(bits);

    if !is_minimal_exit(exit_value(depth, q, pow3)?, bits) {
        return None;
    }
    Some(TowerState::from_parts(depth, q))
}

/// Position of `(T, q)` in the dense index: one row of `2^(KQ-1)` odd `q` per depth.
#[inline]
fn slot(depth: u32, q: u64, params: &TowerParams) -> usize {
    ((u64::from(depth - params.t_min) << (params.q_bits - 1)) | (q >> 1)) as usize
}

fn check_table(params: &TowerParams, pow3: &Pow3Table) -> Result<(), VerifyError> {
    if pow3.bits() != params.q_bits {
        return Err(VerifyError::parameter(
            "pow3",
            format!(
                "table is modulo 2^{} but q is modulo 2^{}",
                pow3.bits(),
                params.q_bits
            ),
        ));
    }
    if pow3.get(params.t_min).is_none() || pow3.get(params.t_max).is_none() {
        return Err(VerifyError::parameter(
            "pow3",
            format!(
                "table does not cover depths {}..={}",
                params.t_min, params.t_max
            ),
        ));
    }
    Ok(())
}

/// Enumerate the admissible states of the window and link each to its successor.
pub fn build_tower_graph(
    params: &TowerParams,
    pow3: &Pow3Table,
) -> Result<TransitionGraph<TowerState>, VerifyError> {
    params.validate()?;
    check_table(params, pow3)?;

    let bits = params.q_bits;
    let mut index = vec![NO_VERTEX; params.candidate_count() as usize];
    // About a quarter of the candidates are minimal exits.
    let mut graph = TransitionGraph::with_capacity(index.len() / 4);

    for depth in params.t_min..=params.t_max {
        for q in (1..1u64 << bits).step_by(2) {
            let u = exit_value(depth, q, pow3).ok_or_else(|| VerifyError::InvalidState {
                kind: "tower",
                state: format!("(T={}, q={})", depth, q),
                reason: "depth missing from the power table".to_string(),
            })?;
            if is_minimal_exit(u, bits) {
                index[slot(depth, q, params)] = graph.add_vertex(TowerState::from_parts(depth, q));
            }
        }
    }

    for id in 0..graph.vertex_count() as VertexId {
        let state = *graph.vertex(id);
        let Some(next) = tower_successor(&state, params, pow3) else {
            continue;
        };
        let target = index[slot(next.depth(), next.q(), params)];
        if target != NO_VERTEX {
            graph.set_successor(id, target)?;
        }
    }

    info!(
        t_min = params.t_min,
        t_max = params.t_max,
        q_bits = bits,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "tower graph built"
    );
    Ok(graph)
}
