// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Verifier parameters.
//!
//! Each certificate is configured by a plain struct whose `Default` matches
//! the published certificate. `validate()` runs before any search starts, so
//! a misused parameter never produces partial output.
//!
//! | Certificate | Defaults |
//! |---|---|
//! | avoidance `A_m` | `m0 = 16`, `J = 16`, `K = 4`, `L = 16` |
//! | tower graph | `s0 = 16`, `α = 4`, `T ∈ [2, 22]`, `q mod 2^20` |
//! | gate cycle | `m = 16`, `L = 16` |

use serde::Serialize;

use crate::errors::VerifyError;

/// Default base resolution for the avoidance certificate.
pub const DEFAULT_M0: u32 = 16;
/// Default step horizon `J`.
pub const DEFAULT_HORIZON: u32 = 16;
/// Default spike threshold `K`.
pub const DEFAULT_THRESHOLD: u32 = 4;
/// Default number of lifts `L`.
pub const DEFAULT_LIFTS: u32 = 16;
/// Default tower depth-control scale `s0`.
pub const DEFAULT_S0: u32 = 16;
/// Default extra precision bits `α` for the tower graph.
pub const DEFAULT_ALPHA: u32 = 4;
/// Smallest admissible re-entry depth.
pub const MIN_DEPTH: u32 = 2;

/// Largest number of significant bits a `u128` trajectory may reach.
const U128_HEADROOM_BITS: u32 = 127;

/// Upper bound on `s0 + α` for the tower window.
const MAX_SCALE_BITS: u64 = 64;

/// `ceil(log2(n))` for `n >= 1`.
fn ceil_log2(n: u32) -> u32 {
    if n <= 1 {
        0
    } else {
        32 - (n - 1).leading_zeros()
    }
}

/// Parameters of the bounded witness search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvoidanceParams {
    /// Residues are taken modulo `2^m0`.
    pub m0: u32,
    /// Steps `j = 0..horizon` are examined per lift.
    pub horizon: u32,
    /// A step is a spike when its valuation is at least this.
    pub threshold: u32,
    /// Lifts `ℓ = 0..lifts` are tried per residue.
    pub lifts: u32,
}

impl Default for AvoidanceParams {
    fn default() -> Self {
        Self {
            m0: DEFAULT_M0,
            horizon: DEFAULT_HORIZON,
            threshold: DEFAULT_THRESHOLD,
            lifts: DEFAULT_LIFTS,
        }
    }
}

impl AvoidanceParams {
    /// Number of odd residues modulo `2^m0`.
    pub fn residue_count(&self) -> u64 {
        1u64 << (self.m0 - 1)
    }

    /// Reject parameters that cannot be searched exactly or packed into the witness stream.
    pub fn validate(&self) -> Result<(), VerifyError> {
        if !(1..=32).contains(&self.m0) {
            return Err(VerifyError::parameter("m0", format!("{} not in 1..=32", self.m0)));
        }
        if !(1..=256).contains(&self.horizon) {
            return Err(VerifyError::parameter(
                "horizon",
                format!("{} not in 1..=256", self.horizon),
            ));
        }
        if !(1..=256).contains(&self.lifts) {
            return Err(VerifyError::parameter(
                "lifts",
                format!("{} not in 1..=256", self.lifts),
            ));
        }
        if !(1..=U128_HEADROOM_BITS).contains(&self.threshold) {
            return Err(VerifyError::parameter(
                "threshold",
                format!(
                    "{} not in 1..={} (valuations of 3x+1 never exceed {} bits)",
                    self.threshold, U128_HEADROOM_BITS, U128_HEADROOM_BITS
                ),
            ));
        }

        // x_{j} + 1 <= (3/2)^j (x_0 + 1); log2(3/2) < 0.585.
        let growth = (self.horizon * 585).div_ceil(1000);
        let bits = self.m0 + ceil_log2(self.lifts) + growth + 2;
        if bits > U128_HEADROOM_BITS {
            return Err(VerifyError::parameter(
                "horizon",
                format!(
                    "trajectories may need {} bits, more than the {} available",
                    bits, U128_HEADROOM_BITS
                ),
            ));
        }
        Ok(())
    }
}

/// Parameters of the truncated `(T, q)` tower graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TowerParams {
    /// Base depth-control scale.
    pub s0: u32,
    /// Extra bits for lift robustness.
    pub alpha: u32,
    /// Smallest depth in the window.
    pub t_min: u32,
    /// Largest depth in the window (inclusive).
    pub t_max: u32,
    /// `q` is tracked modulo `2^q_bits`.
    pub q_bits: u32,
}

impl Default for TowerParams {
    fn default() -> Self {
        Self::new(DEFAULT_S0, DEFAULT_ALPHA)
    }
}

impl TowerParams {
    /// Window derived from `s0` and `α`: `T ∈ [2, s0 + α + 2]`, `q mod 2^(s0 + α)`.
    pub fn new(s0: u32, alpha: u32) -> Self {
        Self {
            s0,
            alpha,
            t_min: MIN_DEPTH,
            t_max: s0.saturating_add(alpha).saturating_add(2),
            q_bits: s0.saturating_add(alpha),
        }
    }

    /// Depth is tracked modulo `2^(s0 - 2 + α)`.
    pub fn depth_modulus_bits(&self) -> u32 {
        self.s0.saturating_add(self.alpha).saturating_sub(2)
    }

    /// Number of depths in the window.
    pub fn depth_count(&self) -> u32 {
        self.t_max - self.t_min + 1
    }

    /// Number of candidate states `(T, q)` with `q` odd.
    pub fn candidate_count(&self) -> u64 {
        u64::from(self.depth_count()) << (self.q_bits - 1)
    }

    pub fn contains_depth(&self, depth: u32) -> bool {
        (self.t_min..=self.t_max).contains(&depth)
    }

    pub fn validate(&self) -> Result<(), VerifyError> {
        if self.s0 < 2 {
            return Err(VerifyError::parameter("s0", format!("{} < 2", self.s0)));
        }
        if u64::from(self.s0) + u64::from(self.alpha) > MAX_SCALE_BITS {
            return Err(VerifyError::parameter(
                "s0",
                format!(
                    "s0 + alpha = {} exceeds {}",
                    u64::from(self.s0) + u64::from(self.alpha),
                    MAX_SCALE_BITS
                ),
            ));
        }
        if !(3..=30).contains(&self.q_bits) {
            return Err(VerifyError::parameter(
                "q_bits",
                format!("{} not in 3..=30", self.q_bits),
            ));
        }
        if self.t_min < MIN_DEPTH {
            return Err(VerifyError::parameter(
                "t_min",
                format!("{} < {}", self.t_min, MIN_DEPTH),
            ));
        }
        if self.t_max < self.t_min {
            return Err(VerifyError::parameter(
                "t_max",
                format!("{} < t_min {}", self.t_max, self.t_min),
            ));
        }
        let modulus_bits = self.depth_modulus_bits();
        if modulus_bits < 32 && u64::from(self.t_max) >= 1u64 << modulus_bits {
            return Err(VerifyError::parameter(
                "t_max",
                format!(
                    "{} does not fit the depth modulus 2^{}",
                    self.t_max, modulus_bits
                ),
            ));
        }
        if self.candidate_count() > u64::from(u32::MAX) {
            return Err(VerifyError::parameter(
                "q_bits",
                format!("{} candidate states exceed the vertex id range", self.candidate_count()),
            ));
        }
        Ok(())
    }
}

/// Parameters of the gate-cycle certificate on lift-states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateCycleParams {
    /// Residues are taken modulo `2^m`.
    pub m: u32,
    /// Number of lifts; must be a power of two.
    pub lifts: u32,
}

impl Default for GateCycleParams {
    fn default() -> Self {
        Self {
            m: DEFAULT_M0,
            lifts: DEFAULT_LIFTS,
        }
    }
}

impl GateCycleParams {
    /// `log2(lifts)`: the successor is reduced modulo `2^(m + lift_bits)`.
    pub fn lift_bits(&self) -> u32 {
        self.lifts.trailing_zeros()
    }

    /// Total number of lift-states; also the Floyd step cap.
    pub fn state_space(&self) -> u64 {
        1u64 << (self.m + self.lift_bits())
    }

    pub fn validate(&self) -> Result<(), VerifyError> {
        if !(1..=32).contains(&self.m) {
            return Err(VerifyError::parameter("m", format!("{} not in 1..=32", self.m)));
        }
        if !self.lifts.is_power_of_two() || !(2..=256).contains(&self.lifts) {
            return Err(VerifyError::parameter(
                "lifts",
                format!("{} is not a power of two in 2..=256", self.lifts),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        AvoidanceParams::default().validate().unwrap();
        TowerParams::default().validate().unwrap();
        GateCycleParams::default().validate().unwrap();
    }

    #[test]
    fn test_tower_default_window() {
        let params = TowerParams::default();
        assert_eq!((params.t_min, params.t_max, params.q_bits), (2, 22, 20));
        assert_eq!(params.depth_modulus_bits(), 18);
        assert_eq!(params.candidate_count(), 21 << 19);
    }

    #[test]
    fn test_ceil_log2() {
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(16), 4);
        assert_eq!(ceil_log2(17), 5);
    }

    #[test]
    fn test_avoidance_rejects_huge_threshold() {
        let params = AvoidanceParams {
            threshold: 200,
            ..AvoidanceParams::default()
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(err, VerifyError::InvalidParameter { name: "threshold", .. }));
    }

    #[test]
    fn test_avoidance_rejects_unbounded_growth() {
        let params = AvoidanceParams {
            m0: 32,
            horizon: 256,
            ..AvoidanceParams::default()
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(err, VerifyError::InvalidParameter { name: "horizon", .. }));
    }

    #[test]
    fn test_tower_rejects_depth_beyond_modulus() {
        let params = TowerParams {
            t_max: 40,
            ..TowerParams::new(4, 2)
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_tower_huge_scale_is_rejected_not_overflowed() {
        let params = TowerParams::new(u32::MAX, 4);
        assert_eq!(params.q_bits, u32::MAX);
        assert_eq!(params.t_max, u32::MAX);
        let err = params.validate().unwrap_err();
        assert!(matches!(err, VerifyError::InvalidParameter { name: "s0", .. }));

        // Explicit window overrides do not hide the oversized scale.
        let params = TowerParams {
            t_max: 10,
            q_bits: 8,
            ..TowerParams::new(4, u32::MAX)
        };
        assert!(matches!(
            params.validate().unwrap_err(),
            VerifyError::InvalidParameter { name: "s0", .. }
        ));
    }

    #[test]
    fn test_gate_requires_power_of_two_lifts() {
        let params = GateCycleParams { m: 8, lifts: 12 };
        assert!(params.validate().is_err());
        let params = GateCycleParams { m: 8, lifts: 8 };
        assert_eq!(params.lift_bits(), 3);
        assert_eq!(params.state_space(), 1 << 11);
    }
}
