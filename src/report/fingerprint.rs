// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! SHA-256 fingerprints of witness streams and report files.
//!
//! Witnesses are packed little-endian in stream order: the residue as `u16`
//! when `m0 <= 16` (as `u32` otherwise), then lift, step and valuation as
//! one byte each.

use sha2::{Digest, Sha256};
use std::fmt;

use crate::search::{ResidueWitness, WitnessSink};

/// Lowercase hexadecimal SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex(&Sha256::digest(bytes))
}

fn hex(digest: &[u8]) -> String {
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Running digest of a witness stream.
#[derive(Clone)]
pub struct WitnessFingerprint {
    hasher: Sha256,
    wide_residues: bool,
    count: u64,
}

impl WitnessFingerprint {
    pub fn new(m0: u32) -> Self {
        Self {
            hasher: Sha256::new(),
            wide_residues: m0 > 16,
            count: 0,
        }
    }

    /// Canonical byte packing of one witness.
    ///
    /// Parameter validation bounds lifts and horizon by 256 and valuations
    /// stay below 128, so the byte fields never truncate.
    pub fn pack(&self, w: &ResidueWitness) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(7);
        if self.wide_residues {
            bytes.extend_from_slice(&(w.residue as u32).to_le_bytes());
        } else {
            bytes.extend_from_slice(&(w.residue as u16).to_le_bytes());
        }
        bytes.push(w.witness.lift as u8);
        bytes.push(w.witness.step as u8);
        bytes.push(w.witness.valuation as u8);
        bytes
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Lowercase hex digest of everything recorded so far.
    pub fn hex_digest(&self) -> String {
        hex(&self.hasher.clone().finalize())
    }
}

impl fmt::Debug for WitnessFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WitnessFingerprint")
            .field("wide_residues", &self.wide_residues)
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

impl WitnessSink for WitnessFingerprint {
    fn record(&mut self, witness: &ResidueWitness) {
        let bytes = self.pack(witness);
        self.hasher.update(&bytes);
        self.count += 1;
    }
}
