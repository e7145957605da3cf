//! Output types handed to the rendering layer
//!
//! Everything here is plain numeric data: the engine's obligation ends at
//! producing these series, and the excluded plotting layer consumes them.

use serde::{Deserialize, Serialize};

use super::states::StateCode;

/// Mean and standard deviation of one pooled sample, with its size.
///
/// `std` is the population standard deviation (ddof = 0). `count` is the
/// pooled sample size, kept so renderers can weight error bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub mean: f64,
    pub std: f64,
    pub count: usize,
}

/// A per-timestep statistic with uncertainty.
///
/// A `None` point is the explicit no-data marker: the timestep's pooled
/// sample was empty. Renderers must show it as a gap, never as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregatedSeries {
    points: Vec<Option<SeriesPoint>>,
}

impl AggregatedSeries {
    #[must_use]
    pub fn from_points(points: Vec<Option<SeriesPoint>>) -> Self {
        Self { points }
    }

    /// Number of timesteps
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point at a timestep, or `None` if out of range or no-data
    #[must_use]
    pub fn point(&self, timestep: usize) -> Option<SeriesPoint> {
        self.points.get(timestep).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<SeriesPoint>> + '_ {
        self.points.iter().copied()
    }

    /// Timesteps that carry data
    #[must_use]
    pub fn defined_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }
}

/// Per-run state histogram: node counts and proportions per (timestep, state).
///
/// Bins align exactly on integer state codes; the width is the session's
/// configured class count, not the set of observed states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateHistogram {
    timesteps: usize,
    class_count: usize,
    node_count: usize,
    counts: Vec<u32>,
}

impl StateHistogram {
    pub(crate) fn from_counts(
        timesteps: usize,
        class_count: usize,
        node_count: usize,
        counts: Vec<u32>,
    ) -> Self {
        debug_assert_eq!(counts.len(), timesteps * class_count);
        Self {
            timesteps,
            class_count,
            node_count,
            counts,
        }
    }

    #[must_use]
    pub fn timesteps(&self) -> usize {
        self.timesteps
    }

    #[must_use]
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of nodes in a state at a timestep
    #[must_use]
    pub fn count(&self, timestep: usize, state: StateCode) -> u32 {
        self.counts[timestep * self.class_count + state.bin()]
    }

    /// Proportion of nodes in a state at a timestep (0 when the run has no nodes)
    #[must_use]
    pub fn proportion(&self, timestep: usize, state: StateCode) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            f64::from(self.count(timestep, state)) / self.node_count as f64
        }
    }

    /// Density row at a timestep, one proportion per state class
    #[must_use]
    pub fn proportions_row(&self, timestep: usize) -> Vec<f64> {
        let start = timestep * self.class_count;
        self.counts[start..start + self.class_count]
            .iter()
            .map(|&c| {
                if self.node_count == 0 {
                    0.0
                } else {
                    f64::from(c) / self.node_count as f64
                }
            })
            .collect()
    }

    /// One state's proportion over time, for overlay plotting
    #[must_use]
    pub fn state_series(&self, state: StateCode) -> Vec<f64> {
        (0..self.timesteps)
            .map(|t| self.proportion(t, state))
            .collect()
    }
}

/// Cross-run mean/std of state proportions per (timestep, state)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedHistogram {
    timesteps: usize,
    class_count: usize,
    runs: usize,
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl AggregatedHistogram {
    pub(crate) fn from_moments(
        timesteps: usize,
        class_count: usize,
        runs: usize,
        mean: Vec<f64>,
        std: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(mean.len(), timesteps * class_count);
        debug_assert_eq!(std.len(), timesteps * class_count);
        Self {
            timesteps,
            class_count,
            runs,
            mean,
            std,
        }
    }

    #[must_use]
    pub fn timesteps(&self) -> usize {
        self.timesteps
    }

    #[must_use]
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    /// Number of runs pooled into each cell
    #[must_use]
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Mean proportion across runs for one (timestep, state) cell
    #[must_use]
    pub fn mean(&self, timestep: usize, state: StateCode) -> f64 {
        self.mean[timestep * self.class_count + state.bin()]
    }

    /// Std of proportions across runs for one (timestep, state) cell
    #[must_use]
    pub fn std(&self, timestep: usize, state: StateCode) -> f64 {
        self.std[timestep * self.class_count + state.bin()]
    }

    /// One state's (mean, std) over time, the uncertainty-band input
    #[must_use]
    pub fn state_series(&self, state: StateCode) -> Vec<(f64, f64)> {
        (0..self.timesteps)
            .map(|t| (self.mean(t, state), self.std(t, state)))
            .collect()
    }
}
