// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Arithmetic kernel: the 2-adic valuation and the odd Collatz step.
//!
//! Every verifier is built on [`odd_step`]. The variants differ only in how
//! many times it is applied, what the returned valuation is compared against,
//! and how the successor is folded back into a bounded state.
//!
//! # Examples
//!
//! ```
//! use collatz_cert::arith::{odd_step, v2};
//!
//! assert_eq!(v2(40).unwrap(), 3);
//!
//! // 3·7 + 1 = 22 = 2 · 11
//! let step = odd_step(7).unwrap();
//! assert_eq!((step.next, step.valuation), (11, 1));
//! ```

use crate::errors::VerifyError;

/// Result of one application of the odd Collatz map `U`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// `U(x) = (3x + 1) / 2^b`, always odd.
    pub next: u128,
    /// `b = v2(3x + 1)`, always at least 1.
    pub valuation: u32,
}

/// 2-adic valuation of a strictly positive integer.
///
/// Counts trailing zero bits, which compiles to a single instruction.
#[inline]
pub fn v2(n: u128) -> Result<u32, VerifyError> {
    if n == 0 {
        return Err(VerifyError::ZeroValuation);
    }
    Ok(n.trailing_zeros())
}

/// Valuation of `n mod 2^bits`, or `None` if the reduced value is zero.
///
/// The truncated graphs work inside a window of `bits` bits; a value that
/// vanishes in the window has no defined valuation there.
#[inline]
pub fn v2_masked(n: u64, bits: u32) -> Option<u32> {
    let reduced = n & mask(bits);
    if reduced == 0 {
        None
    } else {
        Some(reduced.trailing_zeros())
    }
}

/// `2^bits - 1`, saturating to all ones at 64 bits.
#[inline]
pub fn mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// One step of the odd Collatz map.
///
/// Returns `Err(EvenInput)` for even `x` and `Err(ArithmeticOverflow)` if
/// `3x + 1` does not fit in `u128`.
#[inline]
pub fn odd_step(x: u128) -> Result<Step, VerifyError> {
    if x & 1 == 0 {
        return Err(VerifyError::EvenInput { value: x });
    }
    let t = x
        .checked_mul(3)
        .and_then(|v| v.checked_add(1))
        .ok_or(VerifyError::ArithmeticOverflow { value: x })?;
    let b = v2(t)?;
    Ok(Step {
        next: t >> b,
        valuation: b,
    })
}
