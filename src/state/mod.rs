// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bounded state representations.
//!
//! - [`LiftState`]: `(r, ℓ)` standing for `x = r + ℓ·2^m`, used by the gate-cycle certificate.
//! - [`TowerState`]: `(T, q)` truncated tower states, the vertices of the tower graph.
//! - [`statistics`]: counters accumulated over a verifier run.
//!
//! States are only built through checked constructors, so a value of either
//! type always satisfies its window invariants.

pub mod lift;
pub mod statistics;
pub mod tower;

pub use lift::LiftState;
pub use statistics::{Counters, Statistics};
pub use tower::TowerState;
