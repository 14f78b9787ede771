// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Truncated tower states `(T, q)`.

use serde::Serialize;
use std::fmt;

use crate::config::TowerParams;
use crate::errors::VerifyError;

/// A depth `T` and an odd multiplier `q` reduced modulo `2^KQ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TowerState {
    depth: u32,
    q: u64,
}

impl TowerState {
    /// Create a tower state inside the window described by `params`.
    pub fn new(depth: u32, q: u64, params: &TowerParams) -> Result<Self, VerifyError> {
        let invalid = |reason: &str| VerifyError::InvalidState {
            kind: "tower",
            state: format!("(T={}, q={})", depth, q),
            reason: reason.to_string(),
        };
        if q & 1 == 0 {
            return Err(invalid("q is even"));
        }
        if q >> params.q_bits != 0 {
            return Err(invalid("q does not fit the modulus"));
        }
        if !params.contains_depth(depth) {
            return Err(invalid("depth outside the window"));
        }
        Ok(Self { depth, q })
    }

    #[inline]
    pub(crate) fn from_parts(depth: u32, q: u64) -> Self {
        debug_assert!(q & 1 == 1, "even q {}", q);
        Self { depth, q }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn q(&self) -> u64 {
        self.q
    }
}

impl fmt::Display for TowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(T={}, q={})", self.depth, self.q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tower_state_checks_window() {
        let params = TowerParams::new(4, 2);
        assert!(TowerState::new(2, 3, &params).is_ok());
        assert!(TowerState::new(2, 4, &params).is_err());
        assert!(TowerState::new(1, 3, &params).is_err());
        assert!(TowerState::new(2, 65, &params).is_err());
    }

    #[test]
    fn test_tower_state_display() {
        let s = TowerState::new(5, 7, &TowerParams::default()).unwrap();
        assert_eq!(s.to_string(), "(T=5, q=7)");
    }
}
