// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for the verifiers.
//!
//! A certificate that fails is not an error: it is reported as
//! [`Verdict::Fail`](crate::engine::Verdict) inside a successful outcome.
//! Everything here is a broken precondition or a misused parameter, and
//! aborts the run before any PASS can be printed.

use thiserror::Error;

/// Errors raised by the arithmetic kernel, the graph engines and parameter validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// `v2(0)` is undefined.
    #[error("2-adic valuation of zero is undefined")]
    ZeroValuation,

    /// The odd Collatz step was handed an even integer.
    #[error("odd step applied to even value {value}")]
    EvenInput { value: u128 },

    /// `3x + 1` (or a lift reconstruction) left the `u128` range.
    #[error("arithmetic overflow computing successor of {value}")]
    ArithmeticOverflow { value: u128 },

    /// A state violated its declared window.
    #[error("invalid {kind} state {state}: {reason}")]
    InvalidState {
        kind: &'static str,
        state: String,
        reason: String,
    },

    /// A parameter failed validation before the search began.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A second successor was assigned to a vertex of a functional graph.
    #[error("vertex {vertex} already has a successor")]
    NotFunctional { vertex: u32 },

    /// A fixed-point or cycle search ran past its defensive bound.
    #[error("{what} exceeded its iteration cap of {cap}")]
    IterationCapExceeded { what: &'static str, cap: u64 },
}

impl VerifyError {
    /// Convenience constructor for parameter validation failures.
    pub fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        VerifyError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
