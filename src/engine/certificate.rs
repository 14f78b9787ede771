// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Certificate trait and the three certificates of the verifier.
//!
//! A certificate owns its parameters, runs one exhaustive check, and says
//! whether its report is a PASS. Failing certificates return `Ok` with a
//! report describing the survivor; `Err` is reserved for broken
//! preconditions.
//!
//! # Example
//!
//! ```
//! use collatz_cert::engine::{run_certificate, Certificate, Verdict};
//! use collatz_cert::errors::VerifyError;
//! use collatz_cert::state::Statistics;
//!
//! struct AlwaysHolds;
//!
//! impl Certificate for AlwaysHolds {
//!     type Report = ();
//!
//!     fn name(&self) -> &'static str {
//!         "always"
//!     }
//!
//!     fn check(&mut self, _stats: &mut Statistics) -> Result<(), VerifyError> {
//!         Ok(())
//!     }
//!
//!     fn verdict(&self, _report: &()) -> Verdict {
//!         Verdict::Pass
//!     }
//! }
//!
//! let outcome = run_certificate(AlwaysHolds).unwrap();
//! assert_eq!(outcome.verdict, Verdict::Pass);
//! ```

use serde::Serialize;

use super::Verdict;
use crate::config::{AvoidanceParams, GateCycleParams, TowerParams};
use crate::cycle::{verify_gate_cycles, GateReport};
use crate::errors::VerifyError;
use crate::graph::{build_tower_graph, prune, SurvivorSet, TransitionGraph};
use crate::memo::Pow3Table;
use crate::search::{verify_avoidance, AvoidanceReport, WitnessSink};
use crate::state::{Counters, LiftState, Statistics, TowerState};

/// A finite certificate that can be checked exhaustively.
pub trait Certificate {
    /// Diagnostics produced by one check.
    type Report: Serialize;

    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Run the check, recording counters in `stats`.
    fn check(&mut self, stats: &mut Statistics) -> Result<Self::Report, VerifyError>;

    /// Whether the report certifies the property.
    fn verdict(&self, report: &Self::Report) -> Verdict;
}

/// Emptiness of the avoidance set `A_m0`.
pub struct AvoidanceCertificate<'a> {
    params: AvoidanceParams,
    sink: &'a mut dyn WitnessSink,
}

impl<'a> AvoidanceCertificate<'a> {
    pub fn new(params: AvoidanceParams, sink: &'a mut dyn WitnessSink) -> Self {
        Self { params, sink }
    }
}

impl Certificate for AvoidanceCertificate<'_> {
    type Report = AvoidanceReport;

    fn name(&self) -> &'static str {
        "avoidance"
    }

    fn check(&mut self, stats: &mut Statistics) -> Result<AvoidanceReport, VerifyError> {
        let report = verify_avoidance(&self.params, &mut *self.sink)?;
        stats.add(Counters::ResiduesChecked, report.residues_checked);
        stats.add(Counters::WitnessesFound, report.witnesses_found);
        stats.add(Counters::Survivors, report.survivors.len() as u64);
        Ok(report)
    }

    fn verdict(&self, report: &AvoidanceReport) -> Verdict {
        Verdict::from_holds(report.holds())
    }
}

/// Survivor count of the pruned tower graph, with a witness if non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TowerReport {
    pub params: TowerParams,
    pub vertices: usize,
    pub edges: usize,
    pub survivors: usize,
    pub witness: Option<TowerState>,
    pub witness_successor: Option<TowerState>,
}

/// Summarise a pruned tower graph, naming the first survivor and its successor.
fn tower_report(
    params: TowerParams,
    graph: &TransitionGraph<TowerState>,
    survivors: &SurvivorSet,
) -> TowerReport {
    let witness = survivors.witness(graph);
    TowerReport {
        params,
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        survivors: survivors.live_count(),
        witness: witness.map(|(id, _)| *graph.vertex(id)),
        witness_successor: witness.and_then(|(_, next)| next).map(|id| *graph.vertex(id)),
    }
}

/// No tower state survives pruning.
pub struct TowerCertificate {
    params: TowerParams,
}

impl TowerCertificate {
    pub fn new(params: TowerParams) -> Self {
        Self { params }
    }
}

impl Certificate for TowerCertificate {
    type Report = TowerReport;

    fn name(&self) -> &'static str {
        "tower"
    }

    fn check(&mut self, stats: &mut Statistics) -> Result<TowerReport, VerifyError> {
        self.params.validate()?;
        let pow3 = Pow3Table::for_tower(&self.params);
        let graph = build_tower_graph(&self.params, &pow3)?;
        let survivors = prune(&graph)?;

        stats.add(Counters::Vertices, graph.vertex_count() as u64);
        stats.add(Counters::Edges, graph.edge_count() as u64);
        stats.add(Counters::Pruned, survivors.removed_count() as u64);
        stats.add(Counters::Survivors, survivors.live_count() as u64);

        Ok(tower_report(self.params, &graph, &survivors))
    }

    fn verdict(&self, report: &TowerReport) -> Verdict {
        Verdict::from_holds(report.survivors == 0)
    }
}

/// No eventual cycle from a gate state meets the gate.
pub struct GateCycleCertificate {
    params: GateCycleParams,
}

impl GateCycleCertificate {
    pub fn new(params: GateCycleParams) -> Self {
        Self { params }
    }
}

impl Certificate for GateCycleCertificate {
    type Report = GateReport<LiftState>;

    fn name(&self) -> &'static str {
        "gate-cycle"
    }

    fn check(&mut self, stats: &mut Statistics) -> Result<GateReport<LiftState>, VerifyError> {
        let report = verify_gate_cycles(&self.params)?;
        stats.add(Counters::GatesChecked, report.outcomes.len() as u64);
        stats.add(Counters::CycleSteps, report.evaluations());
        Ok(report)
    }

    fn verdict(&self, report: &GateReport<LiftState>) -> Verdict {
        Verdict::from_holds(report.holds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tower_report_names_survivor_and_successor() {
        // a <-> b is a cycle, c feeds into it, d dangles.
        let mut graph = TransitionGraph::new();
        let a = graph.add_vertex(TowerState::from_parts(3, 1));
        let b = graph.add_vertex(TowerState::from_parts(3, 5));
        let c = graph.add_vertex(TowerState::from_parts(4, 7));
        graph.add_vertex(TowerState::from_parts(5, 9));
        graph.set_successor(a, b).unwrap();
        graph.set_successor(b, a).unwrap();
        graph.set_successor(c, a).unwrap();

        let survivors = prune(&graph).unwrap();
        let params = TowerParams::new(4, 2);
        let report = tower_report(params, &graph, &survivors);

        assert_eq!(report.vertices, 4);
        assert_eq!(report.edges, 3);
        assert_eq!(report.survivors, 3);
        assert_eq!(report.witness, Some(TowerState::from_parts(3, 1)));
        assert_eq!(report.witness_successor, Some(TowerState::from_parts(3, 5)));

        let certificate = TowerCertificate::new(params);
        assert_eq!(certificate.verdict(&report), Verdict::Fail);
    }
}
