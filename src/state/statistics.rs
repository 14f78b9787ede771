// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Counters are accumulated by the certificates while they run and are
//! carried in the [`Outcome`](crate::engine::Outcome) for reporting.

use serde::Serialize;
use std::collections::BTreeMap;
use strum::EnumCount;
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

#[derive(EnumCountMacro, EnumIter, IntoStaticStr, Debug, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Counters {
    ResiduesChecked,
    WitnessesFound,
    Survivors,
    Vertices,
    Edges,
    Pruned,
    GatesChecked,
    CycleSteps,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub fn increment(&mut self, counter: Counters) {
        self.add(counter, 1);
    }

    pub fn add(&mut self, counter: Counters, amount: u64) {
        self.stats[counter as usize] += amount;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    /// Non-zero counters keyed by their snake_case name.
    pub fn nonzero(&self) -> BTreeMap<&'static str, u64> {
        use strum::IntoEnumIterator;
        Counters::iter()
            .filter(|c| self.get(*c) != 0)
            .map(|c| (c.into(), self.get(c)))
            .collect()
    }
}

impl Serialize for Statistics {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.nonzero().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let stats = Statistics::new();
        assert_eq!(stats.get(Counters::Vertices), 0);
        assert!(stats.nonzero().is_empty());
    }

    #[test]
    fn test_increment_and_add() {
        let mut stats = Statistics::new();
        stats.increment(Counters::GatesChecked);
        stats.increment(Counters::GatesChecked);
        stats.add(Counters::CycleSteps, 40);
        assert_eq!(stats.get(Counters::GatesChecked), 2);

        let named = stats.nonzero();
        assert_eq!(named.get("gates_checked"), Some(&2));
        assert_eq!(named.get("cycle_steps"), Some(&40));
        assert_eq!(named.len(), 2);
    }
}
