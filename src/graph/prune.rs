// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Survivor pruning: greatest fixed point of "has an infinite forward path".
//!
//! Vertices whose live out-degree reaches zero are removed, and each removal
//! decrements the live out-degree of its predecessors. What remains is
//! exactly the set of vertices lying on, or feeding into, a cycle of the
//! graph.

use std::collections::VecDeque;

use tracing::debug;

use super::{TransitionGraph, VertexId};
use crate::errors::VerifyError;

/// Vertices that survived pruning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurvivorSet {
    alive: Vec<bool>,
    live_count: usize,
}

impl SurvivorSet {
    #[inline]
    pub fn is_alive(&self, id: VertexId) -> bool {
        self.alive[id as usize]
    }

    pub fn live_count(&self) -> usize {
        self.live_count
    }

    pub fn removed_count(&self) -> usize {
        self.alive.len() - self.live_count
    }

    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Ids of all surviving vertices, ascending.
    pub fn survivors(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(id, _)| id as VertexId)
    }

    /// The first surviving vertex and, if it is alive too, its successor.
    pub fn witness<V>(&self, graph: &TransitionGraph<V>) -> Option<(VertexId, Option<VertexId>)> {
        let id = self.survivors().next()?;
        let next = graph.successor(id).filter(|&s| self.is_alive(s));
        Some((id, next))
    }
}

/// Prune every vertex without an infinite forward path.
///
/// Each vertex enters the worklist at most once (when its live out-degree
/// drops to zero), so the loop runs at most `|V| + |E|` times; running
/// longer is reported as `IterationCapExceeded`.
pub fn prune<V>(graph: &TransitionGraph<V>) -> Result<SurvivorSet, VerifyError> {
    let n = graph.vertex_count();
    let mut alive = vec![true; n];
    let mut out_degree: Vec<u32> = (0..n as VertexId).map(|id| graph.out_degree(id)).collect();

    let mut worklist: VecDeque<VertexId> = (0..n as VertexId)
        .filter(|&id| out_degree[id as usize] == 0)
        .collect();

    let cap = (n + graph.edge_count()) as u64;
    let mut iterations: u64 = 0;
    let mut removed = 0usize;

    while let Some(x) = worklist.pop_front() {
        iterations += 1;
        if iterations > cap {
            return Err(VerifyError::IterationCapExceeded {
                what: "survivor pruning",
                cap,
            });
        }
        if !alive[x as usize] {
            continue;
        }
        alive[x as usize] = false;
        removed += 1;

        for &p in graph.predecessors(x) {
            if !alive[p as usize] {
                continue;
            }
            out_degree[p as usize] -= 1;
            if out_degree[p as usize] == 0 {
                worklist.push_back(p);
            }
        }
    }

    debug!(vertices = n, removed, iterations, "pruning reached fixed point");
    Ok(SurvivorSet {
        alive,
        live_count: n - removed,
    })
}
