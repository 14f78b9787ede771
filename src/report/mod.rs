// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Human-readable and JSON reports.
//!
//! The engines produce [`Outcome`] values; this module only formats them.
//! Text reports end with a single `RESULT: PASS` or `RESULT: FAIL` line.

pub mod fingerprint;

pub use fingerprint::{sha256_hex, WitnessFingerprint};

use serde::Serialize;
use std::fmt::Write;
use std::fs;
use std::io;
use std::path::Path;

use crate::cycle::GateReport;
use crate::engine::{Outcome, TowerReport};
use crate::search::{AvoidanceReport, ResidueWitness, WitnessSink};
use crate::state::LiftState;

/// Witness sink used by the CLI: optional fingerprint plus a bounded sample.
#[derive(Debug, Clone, Default)]
pub struct WitnessLog {
    pub fingerprint: Option<WitnessFingerprint>,
    pub sample: Vec<ResidueWitness>,
    sample_limit: usize,
}

impl WitnessLog {
    pub fn new(fingerprint: Option<WitnessFingerprint>, sample_limit: usize) -> Self {
        Self {
            fingerprint,
            sample: Vec::with_capacity(sample_limit.min(1024)),
            sample_limit,
        }
    }
}

impl WitnessSink for WitnessLog {
    fn record(&mut self, witness: &ResidueWitness) {
        if let Some(fp) = self.fingerprint.as_mut() {
            fp.record(witness);
        }
        if self.sample.len() < self.sample_limit {
            self.sample.push(*witness);
        }
    }
}

/// Options for the avoidance text report.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvoidanceOptions {
    pub print_survivors: bool,
}

fn result_line(out: &mut String, verdict: crate::engine::Verdict) {
    let _ = writeln!(out, "RESULT: {}", verdict);
}

/// Text report for the avoidance certificate.
pub fn render_avoidance(
    outcome: &Outcome<AvoidanceReport>,
    log: &WitnessLog,
    options: AvoidanceOptions,
) -> String {
    let report = &outcome.report;
    let p = &report.params;
    let mut out = String::new();

    for w in &log.sample {
        let _ = writeln!(
            out,
            "r={:5} -> (ell={:2}, j={:2}, b={:2})",
            w.residue, w.witness.lift, w.witness.step, w.witness.valuation
        );
    }
    if options.print_survivors {
        for r in &report.survivors {
            let _ = writeln!(out, "SURVIVOR r={}", r);
        }
    }

    let _ = writeln!(out, "=== Summary ===");
    let _ = writeln!(out, "m0={}, J={}, K={}, L={}", p.m0, p.horizon, p.threshold, p.lifts);
    let _ = writeln!(out, "Odd residues checked: {}", report.residues_checked);
    let _ = writeln!(out, "Witnesses found:      {}", report.witnesses_found);
    let _ = writeln!(out, "Survivors (A_m0):     {}", report.survivors.len());
    if let Some(h) = &report.hardest {
        let _ = writeln!(
            out,
            "Hardest case (r, ell, j, b): ({}, {}, {}, {})",
            h.residue, h.witness.lift, h.witness.step, h.witness.valuation
        );
    }
    if report.holds() {
        let _ = writeln!(out, "A_m0 is EMPTY (finite certificate condition holds).");
    } else {
        let _ = writeln!(out, "A_m0 is NONEMPTY (certificate fails).");
        if !options.print_survivors {
            let _ = writeln!(out, "Tip: rerun with --print-survivors to list survivors.");
        }
    }
    if let Some(fp) = &log.fingerprint {
        let _ = writeln!(out, "SHA256(witness-stream) = {}", fp.hex_digest());
    }
    result_line(&mut out, outcome.verdict);
    out
}

/// Text report for the tower certificate.
pub fn render_tower(outcome: &Outcome<TowerReport>) -> String {
    let report = &outcome.report;
    let p = &report.params;
    let mut out = String::new();

    let _ = writeln!(out, "Core-window tower graph (s0={}, alpha={})", p.s0, p.alpha);
    let _ = writeln!(out, "  T window: {} .. {}", p.t_min, p.t_max);
    let _ = writeln!(out, "  q modulus: 2^{}", p.q_bits);
    let _ = writeln!(out, "  |V| = {}", report.vertices);
    let _ = writeln!(out, "  |E| = {}", report.edges);
    let _ = writeln!(out, "  survivors after pruning: {}", report.survivors);
    match report.witness {
        None => {
            let _ = writeln!(out, "EMPTY (in core-window model): no surviving tower states.");
        }
        Some(state) => {
            let _ = writeln!(out, "NONEMPTY (in core-window model): witness survivor state");
            let _ = writeln!(out, "  T = {}", state.depth());
            let _ = writeln!(out, "  q mod 2^{} = {}", p.q_bits, state.q());
            if let Some(next) = report.witness_successor {
                let _ = writeln!(out, "  successor: T' = {}  q' = {}", next.depth(), next.q());
            }
        }
    }
    result_line(&mut out, outcome.verdict);
    out
}

/// Text report for the gate-cycle certificate.
pub fn render_gate_cycle(outcome: &Outcome<GateReport<LiftState>>, verbose: bool) -> String {
    let report = &outcome.report;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Gate-cycle check: {} of {} gate states processed",
        report.outcomes.len(),
        report.gates_total
    );
    if verbose {
        for o in &report.outcomes {
            let _ = writeln!(
                out,
                "  gate {}: transient={}, cycle length={}, representative={} [{}]",
                o.gate,
                o.cycle.transient,
                o.cycle.length,
                o.cycle.representative,
                if o.passed() { "ok" } else { "VIOLATION" }
            );
        }
    }
    match report.violation() {
        None => {
            let _ = writeln!(out, "NO CYCLES FOUND: no eventual cycle meets the gate.");
        }
        Some(o) => {
            let _ = writeln!(
                out,
                "FAILURE: gate {} reaches a cycle (length {}, representative {}) containing gate state {}",
                o.gate,
                o.cycle.length,
                o.cycle.representative,
                o.violation.map(|s| s.to_string()).unwrap_or_default()
            );
        }
    }
    result_line(&mut out, outcome.verdict);
    out
}

/// Pretty-printed JSON for any outcome.
pub fn render_json<R: Serialize>(outcome: &Outcome<R>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}

/// Write `text` to `path` and return the SHA-256 of the written bytes.
pub fn save_output(path: &Path, text: &str) -> io::Result<String> {
    fs::write(path, text.as_bytes())?;
    Ok(sha256_hex(text.as_bytes()))
}
