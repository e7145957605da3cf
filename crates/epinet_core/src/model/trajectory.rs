//! Per-run state trajectories and the run bundle
//!
//! A trajectory matrix holds one state code per (timestep, node) cell,
//! row-major by timestep. It matches the upstream tabular format: one row
//! per timestep, one column per node.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::TrajectoryShapeError;

use super::graph::ContactGraph;
use super::states::StateCode;

/// Immutable per-run trajectory: one [`StateCode`] per (timestep, node)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryMatrix {
    states: Vec<StateCode>,
    timesteps: usize,
    nodes: usize,
}

impl TrajectoryMatrix {
    /// Build from per-timestep rows. All rows must have equal length.
    pub fn from_rows(rows: Vec<Vec<StateCode>>) -> Result<Self, TrajectoryShapeError> {
        let timesteps = rows.len();
        let nodes = rows.first().map_or(0, Vec::len);

        let mut states = Vec::with_capacity(timesteps * nodes);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != nodes {
                return Err(TrajectoryShapeError::RaggedRow {
                    row: row_index,
                    expected: nodes,
                    found: row.len(),
                });
            }
            states.extend(row);
        }

        Ok(Self {
            states,
            timesteps,
            nodes,
        })
    }

    /// Build from flat raw integer codes in row-major (timestep, node) order
    pub fn from_codes(
        raw: &[u8],
        timesteps: usize,
        nodes: usize,
    ) -> Result<Self, TrajectoryShapeError> {
        if raw.len() != timesteps * nodes {
            return Err(TrajectoryShapeError::LengthMismatch {
                expected: timesteps * nodes,
                found: raw.len(),
            });
        }

        let mut states = Vec::with_capacity(raw.len());
        for (index, &code) in raw.iter().enumerate() {
            let state =
                StateCode::from_code(code).ok_or_else(|| TrajectoryShapeError::InvalidCode {
                    timestep: index / nodes.max(1),
                    node: index % nodes.max(1),
                    code,
                })?;
            states.push(state);
        }

        Ok(Self {
            states,
            timesteps,
            nodes,
        })
    }

    /// Number of timesteps (rows)
    #[must_use]
    pub fn timesteps(&self) -> usize {
        self.timesteps
    }

    /// Number of nodes (columns)
    #[must_use]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// State of a node at a timestep
    #[must_use]
    pub fn state(&self, timestep: usize, node: usize) -> StateCode {
        self.states[timestep * self.nodes + node]
    }

    /// All node states at a timestep
    #[must_use]
    pub fn row(&self, timestep: usize) -> &[StateCode] {
        let start = timestep * self.nodes;
        &self.states[start..start + self.nodes]
    }

    /// The distinct states this trajectory actually visits, in code order.
    ///
    /// Diagnostic only: histogram width always comes from the configured
    /// [`StateSpace`](super::StateSpace), never from observed data, so that
    /// a short run missing a rare state cannot shrink the histogram.
    #[must_use]
    pub fn observed_states(&self) -> Vec<StateCode> {
        let mut seen = [false; super::states::MAX_STATE_CODES];
        for state in &self.states {
            seen[state.bin()] = true;
        }
        seen.iter()
            .enumerate()
            .filter(|&(_, &s)| s)
            .map(|(bin, _)| StateCode::from_code(bin as u8 + 1).unwrap())
            .collect()
    }
}

/// One simulation run: a trajectory plus its contact graph.
///
/// The graph is held behind an [`Arc`] so a session can either share one
/// graph across all runs (cloned handle) or give each run its own. Distance
/// matrices are cached per distinct graph, keyed on the `Arc` identity.
#[derive(Debug, Clone)]
pub struct RunBundle {
    run_id: usize,
    trajectory: TrajectoryMatrix,
    graph: Arc<ContactGraph>,
}

impl RunBundle {
    /// Bundle a run. `run_id` only identifies the run in error reports.
    #[must_use]
    pub fn new(run_id: usize, trajectory: TrajectoryMatrix, graph: Arc<ContactGraph>) -> Self {
        Self {
            run_id,
            trajectory,
            graph,
        }
    }

    /// Identifier used in error reports
    #[must_use]
    pub fn run_id(&self) -> usize {
        self.run_id
    }

    #[must_use]
    pub fn trajectory(&self) -> &TrajectoryMatrix {
        &self.trajectory
    }

    #[must_use]
    pub fn graph(&self) -> &ContactGraph {
        &self.graph
    }

    /// Shared handle to the run's graph
    #[must_use]
    pub fn graph_handle(&self) -> &Arc<ContactGraph> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::StateCode::{Infected as I, Recovered as R, Susceptible as S};

    #[test]
    fn test_from_rows_indexing() {
        let traj = TrajectoryMatrix::from_rows(vec![vec![S, S, I], vec![S, I, R]]).unwrap();
        assert_eq!(traj.timesteps(), 2);
        assert_eq!(traj.nodes(), 3);
        assert_eq!(traj.state(0, 2), I);
        assert_eq!(traj.state(1, 1), I);
        assert_eq!(traj.row(1), &[S, I, R]);
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = TrajectoryMatrix::from_rows(vec![vec![S, S], vec![S]]).unwrap_err();
        assert!(matches!(
            err,
            TrajectoryShapeError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_from_codes() {
        let traj = TrajectoryMatrix::from_codes(&[1, 1, 2, 3], 2, 2).unwrap();
        assert_eq!(traj.state(0, 0), S);
        assert_eq!(traj.state(1, 1), R);

        let err = TrajectoryMatrix::from_codes(&[1, 2, 9, 1], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            TrajectoryShapeError::InvalidCode {
                timestep: 1,
                node: 0,
                code: 9
            }
        ));
    }

    #[test]
    fn test_from_codes_length_mismatch() {
        let err = TrajectoryMatrix::from_codes(&[1, 2, 3], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            TrajectoryShapeError::LengthMismatch {
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn test_empty_trajectory() {
        let traj = TrajectoryMatrix::from_rows(vec![Vec::new(), Vec::new()]).unwrap();
        assert_eq!(traj.timesteps(), 2);
        assert_eq!(traj.nodes(), 0);
        assert!(traj.row(1).is_empty());
    }

    #[test]
    fn test_observed_states() {
        let traj = TrajectoryMatrix::from_rows(vec![vec![S, I], vec![S, R]]).unwrap();
        assert_eq!(traj.observed_states(), vec![S, I, R]);
    }
}
