// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Lift-states `(r, ℓ)`.

use serde::Serialize;
use std::fmt;

use crate::errors::VerifyError;

/// A residue `r` modulo `2^m` together with a lift index `ℓ`.
///
/// Represents the integer `x = r + ℓ·2^m`. The residue is always odd and
/// below `2^m`; the lift is always below the configured lift count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LiftState {
    residue: u64,
    lift: u32,
}

impl LiftState {
    /// Create a lift-state, checking that `residue` is odd and below `2^m`
    /// and that `lift < lifts`.
    pub fn new(residue: u64, lift: u32, m: u32, lifts: u32) -> Result<Self, VerifyError> {
        let invalid = |reason: &str| VerifyError::InvalidState {
            kind: "lift",
            state: format!("({}, {})", residue, lift),
            reason: reason.to_string(),
        };
        if residue & 1 == 0 {
            return Err(invalid("residue is even"));
        }
        if m < 64 && residue >> m != 0 {
            return Err(invalid("residue does not fit the modulus"));
        }
        if lift >= lifts {
            return Err(invalid("lift index out of range"));
        }
        Ok(Self { residue, lift })
    }

    /// Build a state already known to satisfy the window invariants.
    #[inline]
    pub(crate) fn from_parts(residue: u64, lift: u32) -> Self {
        debug_assert!(residue & 1 == 1, "even residue {}", residue);
        Self { residue, lift }
    }

    pub fn residue(&self) -> u64 {
        self.residue
    }

    pub fn lift(&self) -> u32 {
        self.lift
    }

    /// Reconstruct `x = r + ℓ·2^m`.
    pub fn value(&self, m: u32) -> u128 {
        u128::from(self.residue) + (u128::from(self.lift) << m)
    }
}

impl fmt::Display for LiftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(r={}, ell={})", self.residue, self.lift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lift_state_value() {
        let s = LiftState::new(15, 3, 4, 16).unwrap();
        assert_eq!(s.value(4), 15 + 3 * 16);
        assert_eq!(s.to_string(), "(r=15, ell=3)");
    }

    #[test]
    fn test_lift_state_rejects_even_residue() {
        let err = LiftState::new(4, 0, 4, 16).unwrap_err();
        assert!(err.to_string().contains("residue is even"));
    }

    #[test]
    fn test_lift_state_rejects_out_of_window() {
        assert!(LiftState::new(17, 0, 4, 16).is_err());
        assert!(LiftState::new(1, 16, 4, 16).is_err());
    }

    #[test]
    fn test_lift_state_ordering_is_lexicographic() {
        let a = LiftState::new(1, 9, 4, 16).unwrap();
        let b = LiftState::new(3, 0, 4, 16).unwrap();
        assert!(a < b);
    }
}
