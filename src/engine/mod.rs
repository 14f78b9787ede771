// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Certificate runner.
//!
//! Each verifier run checks exactly one [`Certificate`]. The runner times
//! the check, collects statistics, and packages the verdict with the
//! certificate's report into an [`Outcome`] for the reporting layer.
//!
//! A run either returns an outcome (PASS or FAIL) or an error. There is no
//! partial outcome, so an aborted run can never be reported as PASS.

pub mod certificate;

pub use certificate::{
    AvoidanceCertificate, Certificate, GateCycleCertificate, TowerCertificate, TowerReport,
};

use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

use crate::errors::VerifyError;
use crate::state::Statistics;

/// Exit status when the certificate holds.
pub const EXIT_PASS: u8 = 0;
/// Exit status for program errors (bad parameters, broken preconditions).
pub const EXIT_ERROR: u8 = 1;
/// Exit status when the certificate fails.
pub const EXIT_FAIL: u8 = 2;

/// Whether a certificate holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// The checked set is empty.
    Pass,
    /// A survivor, witness-less residue or gate-intersecting cycle exists.
    Fail,
}

impl Verdict {
    pub fn from_holds(holds: bool) -> Self {
        if holds {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn exit_code(self) -> u8 {
        match self {
            Verdict::Pass => EXIT_PASS,
            Verdict::Fail => EXIT_FAIL,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => f.write_str("PASS"),
            Verdict::Fail => f.write_str("FAIL"),
        }
    }
}

/// Everything a finished run hands to the reporting layer.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome<R> {
    pub certificate: &'static str,
    pub verdict: Verdict,
    pub report: R,
    pub statistics: Statistics,
    pub elapsed_ms: u64,
}

/// Check one certificate.
pub fn run_certificate<C: Certificate>(mut certificate: C) -> Result<Outcome<C::Report>, VerifyError> {
    let name = certificate.name();
    info!(certificate = name, "checking certificate");
    let started = Instant::now();

    let mut statistics = Statistics::new();
    let report = certificate.check(&mut statistics)?;
    let verdict = certificate.verdict(&report);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    debug!(certificate = name, counters = ?statistics.nonzero(), "statistics");
    info!(certificate = name, %verdict, elapsed_ms, "certificate checked");
    Ok(Outcome {
        certificate: name,
        verdict,
        report,
        statistics,
        elapsed_ms,
    })
}
