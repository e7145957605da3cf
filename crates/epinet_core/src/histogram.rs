//! State histogram builder
//!
//! Converts one run's trajectory matrix into per-timestep state counts and
//! proportions. Bins sit exactly on integer state codes; the histogram
//! width is the configured class count, so runs that never visit a rare
//! state still produce comparable rows.

use crate::error::HistogramError;
use crate::model::{StateHistogram, StateSpace, TrajectoryMatrix};

/// Build the T x C state histogram for one trajectory.
///
/// A state code outside the configured class count is fatal for the run:
/// it means the session's class count is misconfigured, and carrying on
/// would silently corrupt the histogram shape.
pub fn state_histogram(
    trajectory: &TrajectoryMatrix,
    space: &StateSpace,
) -> Result<StateHistogram, HistogramError> {
    let timesteps = trajectory.timesteps();
    let class_count = space.class_count();
    let mut counts = vec![0u32; timesteps * class_count];

    for timestep in 0..timesteps {
        for (node, &state) in trajectory.row(timestep).iter().enumerate() {
            if !space.contains(state) {
                return Err(HistogramError::OutOfRangeCode {
                    timestep,
                    node,
                    code: state.code(),
                });
            }
            counts[timestep * class_count + state.bin()] += 1;
        }
    }

    Ok(StateHistogram::from_counts(
        timesteps,
        class_count,
        trajectory.nodes(),
        counts,
    ))
}
