//! Spatial statistics over the contact network
//!
//! Two per-timestep statistics, each pooled across all runs into a single
//! sample before taking mean/std:
//! - average network distance between susceptible and infected nodes
//! - fraction of infected neighbors among susceptible nodes
//!
//! Pooling across runs is deliberate: averaging per-run means would weight
//! runs equally regardless of how many (S, I) pairs or susceptible nodes
//! each contributes that timestep.

use std::sync::Arc;

use crate::distance::DistanceMatrix;
use crate::model::{AggregatedSeries, RunBundle, SeriesPoint, StateCode};

/// Streaming mean/std accumulator for one timestep's pooled sample
#[derive(Debug, Default)]
struct PooledSample {
    count: usize,
    sum: f64,
    sum_sq: f64,
}

impl PooledSample {
    fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
    }

    /// Population mean/std of the sample, or `None` when it is empty.
    /// The empty case is the explicit no-data marker, never a zero.
    fn summarize(&self) -> Option<SeriesPoint> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        let mean = self.sum / n;
        let variance = (self.sum_sq / n - mean * mean).max(0.0);
        Some(SeriesPoint {
            mean,
            std: variance.sqrt(),
            count: self.count,
        })
    }
}

/// Average susceptible-infected network distance per timestep.
///
/// For each timestep the sample is every finite distance between a
/// susceptible and an infected node, over all runs. Disconnected pairs
/// contribute nothing. `distances` must align with `bundles` (one matrix
/// per run, shared graphs sharing a matrix), and all trajectories must
/// share one timestep count; [`analyze`](crate::analysis::analyze)
/// guarantees both.
#[must_use]
pub fn si_distance_series(
    bundles: &[RunBundle],
    distances: &[Arc<DistanceMatrix>],
) -> AggregatedSeries {
    debug_assert_eq!(bundles.len(), distances.len());
    let timesteps = bundles.first().map_or(0, |b| b.trajectory().timesteps());

    let mut points = Vec::with_capacity(timesteps);
    for timestep in 0..timesteps {
        let mut pool = PooledSample::default();

        for (bundle, dists) in bundles.iter().zip(distances) {
            let row = bundle.trajectory().row(timestep);
            let susceptible: Vec<usize> = state_indices(row, StateCode::Susceptible);
            let infected: Vec<usize> = state_indices(row, StateCode::Infected);

            for &i in &susceptible {
                for &j in &infected {
                    if let Some(hops) = dists.get(i, j) {
                        pool.push(f64::from(hops));
                    }
                }
            }
        }

        points.push(pool.summarize());
    }

    AggregatedSeries::from_points(points)
}

/// Fraction of infected neighbors among susceptible nodes per timestep.
///
/// For each timestep the sample holds, for every susceptible node with at
/// least one neighbor across all runs, the fraction of its neighbors that
/// are infected. Zero-degree nodes have no defined fraction and are
/// excluded from the sample entirely.
#[must_use]
pub fn infected_neighbor_series(bundles: &[RunBundle]) -> AggregatedSeries {
    let timesteps = bundles.first().map_or(0, |b| b.trajectory().timesteps());

    let mut points = Vec::with_capacity(timesteps);
    for timestep in 0..timesteps {
        let mut pool = PooledSample::default();

        for bundle in bundles {
            let graph = bundle.graph();
            let row = bundle.trajectory().row(timestep);

            for (node, &state) in row.iter().enumerate() {
                if state != StateCode::Susceptible {
                    continue;
                }
                let neighbors = graph.neighbors(node as u32);
                if neighbors.is_empty() {
                    continue;
                }
                let infected = neighbors
                    .iter()
                    .filter(|&&nb| row[nb as usize] == StateCode::Infected)
                    .count();
                pool.push(infected as f64 / neighbors.len() as f64);
            }
        }

        points.push(pool.summarize());
    }

    AggregatedSeries::from_points(points)
}

fn state_indices(row: &[StateCode], state: StateCode) -> Vec<usize> {
    row.iter()
        .enumerate()
        .filter(|&(_, &s)| s == state)
        .map(|(i, _)| i)
        .collect()
}
