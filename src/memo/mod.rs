// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! MEMO data (immutable, precomputed).
//!
//! Lookup tables computed once per verifier run and shared by reference with
//! the engines that need them:
//! - Powers of three modulo `2^KQ` for the tower-graph window

pub mod pow3;

pub use pow3::Pow3Table;
