//! Full-session tests over a small hand-checked scenario
//!
//! Two runs on the shared path graph 0-1-2-3. At t=1 run A is
//! [S, I, R, S] and run B is [I, S, S, R], which gives a pooled S-I
//! distance sample of {1, 1, 2, 2} and a pooled infected-neighbor
//! sample of {1.0, 0.0, 0.5, 0.0}.

use std::sync::Arc;

use crate::analysis::{AnalysisConfig, analyze};
use crate::model::StateCode::{Infected as I, Recovered as R, Susceptible as S};
use crate::model::{ContactGraph, RunBundle, StateCode, StateSpace, TrajectoryMatrix};

fn path_graph() -> Arc<ContactGraph> {
    Arc::new(ContactGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap())
}

fn scenario_bundles(graph: &Arc<ContactGraph>) -> Vec<RunBundle> {
    let run_a = TrajectoryMatrix::from_rows(vec![
        vec![S, S, I, S],
        vec![S, I, R, S],
        vec![S, I, R, R],
    ])
    .unwrap();
    let run_b = TrajectoryMatrix::from_rows(vec![
        vec![S, I, S, S],
        vec![I, S, S, R],
        vec![I, I, S, R],
    ])
    .unwrap();

    vec![
        RunBundle::new(0, run_a, Arc::clone(graph)),
        RunBundle::new(1, run_b, Arc::clone(graph)),
    ]
}

#[test]
fn test_si_distance_reference_values() {
    let graph = path_graph();
    let report = analyze(&scenario_bundles(&graph), &AnalysisConfig::default()).unwrap();

    // t=1: from A, S={0,3}, I={1} -> {1, 2}; from B, S={1,2}, I={0} -> {1, 2}
    let point = report.si_distance.point(1).unwrap();
    assert_eq!(point.count, 4);
    assert!((point.mean - 1.5).abs() < 1e-12);
    assert!((point.std - 0.5).abs() < 1e-12);

    // t=0: from A {2, 1, 1}, from B {1, 1, 2}; pooled mean 4/3
    let point = report.si_distance.point(0).unwrap();
    assert_eq!(point.count, 6);
    assert!((point.mean - 4.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_infected_neighbor_reference_values() {
    let graph = path_graph();
    let report = analyze(&scenario_bundles(&graph), &AnalysisConfig::default()).unwrap();

    // t=1 pooled sample: A node 0 -> 1.0, A node 3 -> 0.0,
    //                    B node 1 -> 0.5, B node 2 -> 0.0
    let point = report.infected_neighbors.point(1).unwrap();
    assert_eq!(point.count, 4);
    assert!((point.mean - 0.375).abs() < 1e-12);
    assert!((point.std - 0.171875f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_state_evolution_reference_values() {
    let graph = path_graph();
    let report = analyze(&scenario_bundles(&graph), &AnalysisConfig::default()).unwrap();
    let evolution = &report.state_evolution;

    // Both runs at t=1 have proportions [0.5, 0.25, 0.25, 0.0]
    assert!((evolution.mean(1, S) - 0.5).abs() < 1e-12);
    assert_eq!(evolution.std(1, S), 0.0);
    assert!((evolution.mean(1, I) - 0.25).abs() < 1e-12);
    assert!((evolution.mean(1, R) - 0.25).abs() < 1e-12);
    assert_eq!(evolution.mean(1, StateCode::Dead), 0.0);

    // Every (timestep, run) histogram row is a density
    for hist in &report.run_histograms {
        for t in 0..hist.timesteps() {
            let sum: f64 = hist.proportions_row(t).iter().sum();
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }
}

#[test]
fn test_series_cover_all_timesteps() {
    let graph = path_graph();
    let report = analyze(&scenario_bundles(&graph), &AnalysisConfig::default()).unwrap();

    assert_eq!(report.si_distance.len(), 3);
    assert_eq!(report.infected_neighbors.len(), 3);
    assert_eq!(report.state_evolution.timesteps(), 3);
    assert_eq!(report.run_histograms.len(), 2);
}

#[test]
fn test_all_recovered_timestep_is_no_data() {
    let graph = path_graph();
    let traj = TrajectoryMatrix::from_rows(vec![vec![S, I, S, S], vec![R, R, R, R]]).unwrap();
    let bundle = RunBundle::new(0, traj, graph);

    let report = analyze(&[bundle], &AnalysisConfig::default()).unwrap();
    assert!(report.si_distance.point(0).is_some());
    assert_eq!(report.si_distance.point(1), None);
    assert_eq!(report.infected_neighbors.point(1), None);
    assert_eq!(report.si_distance.defined_count(), 1);
}

#[test]
fn test_five_class_state_space() {
    use crate::model::StateCode::Immune;

    let graph = path_graph();
    let traj = TrajectoryMatrix::from_rows(vec![vec![S, I, Immune, S]]).unwrap();
    let bundle = RunBundle::new(0, traj, graph);

    // Immune is out of range for the 4-class default
    let err = analyze(
        std::slice::from_ref(&bundle),
        &AnalysisConfig::new(StateSpace::sird()),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        crate::error::AnalysisError::MissingClassData {
            run: 0,
            timestep: 0,
            node: 2,
            code: 5
        }
    ));

    // The 5-class variant accepts it
    let report = analyze(&[bundle], &AnalysisConfig::new(StateSpace::sirdm())).unwrap();
    assert_eq!(report.state_evolution.class_count(), 5);
    assert!((report.state_evolution.mean(0, Immune) - 0.25).abs() < 1e-12);
}

#[test]
fn test_report_serializes() {
    let graph = path_graph();
    let report = analyze(&scenario_bundles(&graph), &AnalysisConfig::default()).unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let restored: crate::analysis::AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, report);
}
