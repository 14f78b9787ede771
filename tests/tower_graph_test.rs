// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Integration tests for the tower graph builder and survivor pruning.

mod common;

use collatz_cert::config::TowerParams;
use collatz_cert::engine::{run_certificate, TowerCertificate, Verdict};
use collatz_cert::graph::{build_tower_graph, prune, tower_successor, VertexId};
use collatz_cert::memo::Pow3Table;

fn counts(params: &TowerParams) -> (usize, usize, usize) {
    let pow3 = Pow3Table::for_tower(params);
    let graph = build_tower_graph(params, &pow3).unwrap();
    let survivors = prune(&graph).unwrap();
    (graph.vertex_count(), graph.edge_count(), survivors.live_count())
}

#[test]
fn test_scenario_b_tiny_window() {
    assert_eq!(counts(&common::scenario_b()), (64, 12, 0));
}

#[test]
fn test_reference_windows() {
    assert_eq!(counts(&common::tower_window(5)), (48, 12, 0));
    assert_eq!(counts(&common::tower_window(8)), (576, 135, 0));
    assert_eq!(counts(&common::tower_window(12)), (13312, 3315, 0));
}

#[test]
fn test_graph_is_functional_and_matches_closed_form() {
    let params = common::tower_window(8);
    let pow3 = Pow3Table::for_tower(&params);
    let graph = build_tower_graph(&params, &pow3).unwrap();

    let mut edges = 0;
    for id in 0..graph.vertex_count() as VertexId {
        let state = graph.vertex(id);
        match graph.successor(id) {
            Some(next) => {
                edges += 1;
                assert_eq!(tower_successor(state, &params, &pow3), Some(*graph.vertex(next)));
                assert!(graph.predecessors(next).contains(&id));
            }
            None => {
                // Either no closed-form successor, or one outside the vertex set.
                if let Some(next) = tower_successor(state, &params, &pow3) {
                    assert!(!graph.vertices().contains(&next));
                }
            }
        }
    }
    assert_eq!(edges, graph.edge_count());
}

#[test]
fn test_certificate_outcome_for_scenario_b() {
    let outcome = run_certificate(TowerCertificate::new(common::scenario_b())).unwrap();
    assert_eq!(outcome.verdict, Verdict::Pass);
    assert_eq!(outcome.report.vertices, 64);
    assert_eq!(outcome.report.edges, 12);
    assert_eq!(outcome.report.survivors, 0);
    assert_eq!(outcome.report.witness, None);
}

#[test]
#[ignore = "builds the full 5.5M-vertex default window"]
fn test_default_window_has_no_survivors() {
    assert_eq!(counts(&TowerParams::default()), (5_505_024, 1_376_235, 0));
}
