// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Finite functional transition graphs.
//!
//! Every vertex has out-degree 0 or 1. The reverse adjacency is kept
//! alongside the forward successor array because the pruning engine walks
//! predecessors.
//!
//! # Examples
//!
//! ```
//! use collatz_cert::graph::{prune, TransitionGraph};
//!
//! // a -> b -> a, c -> a, d (dead end)
//! let mut graph = TransitionGraph::new();
//! let a = graph.add_vertex('a');
//! let b = graph.add_vertex('b');
//! let c = graph.add_vertex('c');
//! let d = graph.add_vertex('d');
//! graph.set_successor(a, b).unwrap();
//! graph.set_successor(b, a).unwrap();
//! graph.set_successor(c, a).unwrap();
//!
//! let survivors = prune(&graph).unwrap();
//! assert_eq!(survivors.live_count(), 3);
//! assert!(!survivors.is_alive(d));
//! ```

pub mod prune;
pub mod tower;

pub use prune::{prune, SurvivorSet};
pub use tower::{build_tower_graph, is_minimal_exit, tower_successor};

use crate::errors::VerifyError;

/// Dense vertex index.
pub type VertexId = u32;

/// A functional graph over vertices of type `V`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionGraph<V> {
    vertices: Vec<V>,
    successor: Vec<Option<VertexId>>,
    predecessors: Vec<Vec<VertexId>>,
    edge_count: usize,
}

impl<V> Default for TransitionGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TransitionGraph<V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            successor: Vec::with_capacity(capacity),
            predecessors: Vec::with_capacity(capacity),
            edge_count: 0,
        }
    }

    /// Append a vertex with no outgoing edge and return its id.
    pub fn add_vertex(&mut self, vertex: V) -> VertexId {
        let id = self.vertices.len() as VertexId;
        self.vertices.push(vertex);
        self.successor.push(None);
        self.predecessors.push(Vec::new());
        id
    }

    /// Add the edge `from -> to`.
    ///
    /// Fails with `NotFunctional` if `from` already has a successor.
    pub fn set_successor(&mut self, from: VertexId, to: VertexId) -> Result<(), VerifyError> {
        let slot = &mut self.successor[from as usize];
        if slot.is_some() {
            return Err(VerifyError::NotFunctional { vertex: from });
        }
        *slot = Some(to);
        self.predecessors[to as usize].push(from);
        self.edge_count += 1;
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn vertex(&self, id: VertexId) -> &V {
        &self.vertices[id as usize]
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    #[inline]
    pub fn successor(&self, id: VertexId) -> Option<VertexId> {
        self.successor[id as usize]
    }

    #[inline]
    pub fn out_degree(&self, id: VertexId) -> u32 {
        u32::from(self.successor[id as usize].is_some())
    }

    #[inline]
    pub fn predecessors(&self, id: VertexId) -> &[VertexId] {
        &self.predecessors[id as usize]
    }
}
