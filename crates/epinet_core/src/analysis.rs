//! Analysis session: validation, caching, and the full report
//!
//! One call to [`analyze`] takes the injected run bundles (run discovery
//! lives in the excluded ingestion layer) and produces everything the
//! rendering layer consumes. Structural problems abort the whole session;
//! per-timestep sparsity never does.

use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate_histograms;
use crate::distance::DistanceMatrix;
use crate::error::{AnalysisError, ShapeMismatchKind};
use crate::histogram::state_histogram;
use crate::model::{AggregatedHistogram, AggregatedSeries, RunBundle, StateHistogram, StateSpace};
use crate::spatial::{infected_neighbor_series, si_distance_series};

/// Session configuration.
///
/// The state space is explicit: class count is fixed up front, never
/// inferred from observed data (see [`StateSpace`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub state_space: StateSpace,
}

impl AnalysisConfig {
    #[must_use]
    pub fn new(state_space: StateSpace) -> Self {
        Self { state_space }
    }
}

impl Default for AnalysisConfig {
    /// The 4-class S/I/R/D variant
    fn default() -> Self {
        Self {
            state_space: StateSpace::sird(),
        }
    }
}

/// Full output contract to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The configured state space, for labeling
    pub state_space: StateSpace,
    /// Raw per-run histograms, in bundle order, for overlay plotting
    pub run_histograms: Vec<StateHistogram>,
    /// Cross-run mean/std of state proportions
    pub state_evolution: AggregatedHistogram,
    /// Pooled susceptible-infected distance per timestep
    pub si_distance: AggregatedSeries,
    /// Pooled infected-neighbor fraction per timestep
    pub infected_neighbors: AggregatedSeries,
}

/// Run the full multi-run analysis.
///
/// Validates shapes up front (uniform timestep count across runs, node
/// count matching each run's graph, state codes within the configured
/// class count), computes one distance matrix per distinct graph, then
/// builds the aggregated series. Errors name the offending run's id.
pub fn analyze(
    bundles: &[RunBundle],
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let first = bundles.first().ok_or(AnalysisError::NoRuns)?;
    let timesteps = first.trajectory().timesteps();

    for bundle in bundles {
        let traj = bundle.trajectory();
        if traj.timesteps() != timesteps {
            return Err(AnalysisError::ShapeMismatch {
                run: bundle.run_id(),
                kind: ShapeMismatchKind::TimestepCount {
                    expected: timesteps,
                    found: traj.timesteps(),
                },
            });
        }
        if traj.nodes() != bundle.graph().node_count() {
            return Err(AnalysisError::ShapeMismatch {
                run: bundle.run_id(),
                kind: ShapeMismatchKind::NodeCount {
                    graph: bundle.graph().node_count(),
                    trajectory: traj.nodes(),
                },
            });
        }
    }

    // Per-run histograms are independent of each other
    #[cfg(feature = "parallel")]
    let run_histograms: Vec<StateHistogram> = bundles
        .par_iter()
        .map(|bundle| {
            state_histogram(bundle.trajectory(), &config.state_space)
                .map_err(|e| AnalysisError::from_histogram(bundle.run_id(), e))
        })
        .collect::<Result<_, _>>()?;

    #[cfg(not(feature = "parallel"))]
    let run_histograms: Vec<StateHistogram> = bundles
        .iter()
        .map(|bundle| {
            state_histogram(bundle.trajectory(), &config.state_space)
                .map_err(|e| AnalysisError::from_histogram(bundle.run_id(), e))
        })
        .collect::<Result<_, _>>()?;

    let state_evolution = aggregate_histograms(&run_histograms)?;

    let distances = distance_matrices(bundles);
    let si_distance = si_distance_series(bundles, &distances);
    let infected_neighbors = infected_neighbor_series(bundles);

    Ok(AnalysisReport {
        state_space: config.state_space,
        run_histograms,
        state_evolution,
        si_distance,
        infected_neighbors,
    })
}

/// One distance matrix per bundle, computed once per distinct graph.
///
/// Graph identity is `Arc` pointer identity: the shared-graph mode (all
/// bundles cloning one handle) triggers a single BFS pass, while per-run
/// graphs each get their own. The BFS itself parallelizes over sources
/// under the `parallel` feature.
fn distance_matrices(bundles: &[RunBundle]) -> Vec<Arc<DistanceMatrix>> {
    let mut cache: FxHashMap<usize, Arc<DistanceMatrix>> = FxHashMap::default();

    bundles
        .iter()
        .map(|bundle| {
            let key = Arc::as_ptr(bundle.graph_handle()) as usize;
            Arc::clone(
                cache
                    .entry(key)
                    .or_insert_with(|| Arc::new(DistanceMatrix::from_graph(bundle.graph()))),
            )
        })
        .collect()
}
