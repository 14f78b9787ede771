// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Powers of three modulo a power of two.

use crate::arith::mask;
use crate::config::TowerParams;

/// `3^t mod 2^bits` for every depth `t` in a window.
///
/// Built once per verifier run and lent to the graph builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pow3Table {
    t_min: u32,
    bits: u32,
    powers: Vec<u64>,
}

impl Pow3Table {
    /// Tabulate `3^t mod 2^bits` for `t` in `t_min..=t_max`.
    pub fn new(t_min: u32, t_max: u32, bits: u32) -> Self {
        let m = mask(bits);
        let mut power = 1u64;
        for _ in 0..t_min {
            power = power.wrapping_mul(3) & m;
        }
        let mut powers = Vec::with_capacity((t_max.saturating_sub(t_min) + 1) as usize);
        for _ in t_min..=t_max {
            powers.push(power);
            power = power.wrapping_mul(3) & m;
        }
        Self { t_min, bits, powers }
    }

    /// Table covering the depth window of a tower graph.
    pub fn for_tower(params: &TowerParams) -> Self {
        Self::new(params.t_min, params.t_max, params.q_bits)
    }

    /// `3^t mod 2^bits`, or `None` if `t` lies outside the table.
    #[inline]
    pub fn get(&self, t: u32) -> Option<u64> {
        let index = t.checked_sub(self.t_min)?;
        self.powers.get(index as usize).copied()
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.powers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }
}
