// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Finite obstruction-graph verifiers for the odd Collatz map
//! `U(x) = (3x + 1) / 2^v2(3x + 1)`.
//!
//! Each verifier decides, by exhaustive exact-integer search, whether a
//! specific finite set is empty. Nothing here reasons about the infinite
//! state space; a PASS only certifies the bounded model at fixed precision.
//!
//! # Architecture
//!
//! ## Kernel
//!
//! - [`arith`]: 2-adic valuation and the odd step, shared by every verifier
//! - [`state`]: bounded lift-states `(r, ℓ)` and tower states `(T, q)`
//! - [`memo`]: immutable tables (powers of 3 modulo `2^KQ`), built once per run
//!
//! ## Engines
//!
//! 1. **Witness search** ([`search`]): for each odd residue, the first
//!    `(ℓ, j)` whose step valuation reaches the spike threshold
//! 2. **Graph builder + pruning** ([`graph`]): the truncated `(T, q)` tower
//!    graph and its greatest fixed point of vertices with an infinite forward path
//! 3. **Cycle detection** ([`cycle`]): Floyd's algorithm over the implicit
//!    lift-state graph, from every gate state
//!
//! ## Running
//!
//! [`engine`] wraps each engine as a [`Certificate`] and produces an
//! [`Outcome`] with a PASS/FAIL [`Verdict`]; [`report`] formats outcomes and
//! fingerprints the witness stream.
//!
//! # Example
//!
//! ```
//! use collatz_cert::config::AvoidanceParams;
//! use collatz_cert::engine::{run_certificate, AvoidanceCertificate, Verdict};
//! use collatz_cert::search::NullSink;
//!
//! let params = AvoidanceParams { m0: 4, horizon: 4, threshold: 2, lifts: 4 };
//! let mut sink = NullSink;
//! let outcome = run_certificate(AvoidanceCertificate::new(params, &mut sink)).unwrap();
//! assert_eq!(outcome.verdict, Verdict::Pass);
//! assert_eq!(outcome.report.residues_checked, 8);
//! ```

pub mod arith;
pub mod config;
pub mod cycle;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod memo;
pub mod report;
pub mod search;
pub mod state;

// Re-export commonly used types
pub use engine::{run_certificate, Certificate, Outcome, Verdict};
pub use errors::VerifyError;
