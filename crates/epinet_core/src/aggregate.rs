//! Cross-run histogram aggregation
//!
//! Pools over runs, not over nodes: each run contributes exactly one
//! proportion per (timestep, state) cell, and the mean/std are taken
//! across those per-run proportions.

use crate::error::{AnalysisError, ShapeMismatchKind};
use crate::model::{AggregatedHistogram, StateHistogram};

/// Combine per-run histograms into mean/std time series across runs.
///
/// All histograms must share the same timestep and class counts; the
/// first histogram sets the expectation and the `run` field of a
/// [`AnalysisError::ShapeMismatch`] is the offending slice index.
/// Standard deviation is population std (ddof = 0), so a single run
/// aggregates to its own values with std 0.
pub fn aggregate_histograms(
    histograms: &[StateHistogram],
) -> Result<AggregatedHistogram, AnalysisError> {
    let first = histograms.first().ok_or(AnalysisError::NoRuns)?;
    let timesteps = first.timesteps();
    let class_count = first.class_count();

    for (run, hist) in histograms.iter().enumerate().skip(1) {
        if hist.timesteps() != timesteps {
            return Err(AnalysisError::ShapeMismatch {
                run,
                kind: ShapeMismatchKind::TimestepCount {
                    expected: timesteps,
                    found: hist.timesteps(),
                },
            });
        }
        if hist.class_count() != class_count {
            return Err(AnalysisError::ShapeMismatch {
                run,
                kind: ShapeMismatchKind::ClassCount {
                    expected: class_count,
                    found: hist.class_count(),
                },
            });
        }
    }

    let cells = timesteps * class_count;
    let runs = histograms.len() as f64;
    let mut sum = vec![0.0; cells];
    let mut sum_sq = vec![0.0; cells];

    for hist in histograms {
        for timestep in 0..timesteps {
            for (class, &p) in hist.proportions_row(timestep).iter().enumerate() {
                let cell = timestep * class_count + class;
                sum[cell] += p;
                sum_sq[cell] += p * p;
            }
        }
    }

    let mean: Vec<f64> = sum.iter().map(|s| s / runs).collect();
    let std: Vec<f64> = mean
        .iter()
        .zip(&sum_sq)
        .map(|(m, sq)| (sq / runs - m * m).max(0.0).sqrt())
        .collect();

    Ok(AggregatedHistogram::from_moments(
        timesteps,
        class_count,
        histograms.len(),
        mean,
        std,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapeMismatchKind;
    use crate::histogram::state_histogram;
    use crate::model::StateCode::{Infected as I, Recovered as R, Susceptible as S};
    use crate::model::{StateSpace, TrajectoryMatrix};

    fn hist(rows: Vec<Vec<crate::model::StateCode>>) -> StateHistogram {
        let traj = TrajectoryMatrix::from_rows(rows).unwrap();
        state_histogram(&traj, &StateSpace::sird()).unwrap()
    }

    #[test]
    fn test_single_run_is_identity_with_zero_std() {
        let h = hist(vec![vec![S, S, I, R], vec![S, I, I, R]]);
        let agg = aggregate_histograms(std::slice::from_ref(&h)).unwrap();

        for t in 0..2 {
            for state in StateSpace::sird().states() {
                assert_eq!(agg.mean(t, state), h.proportion(t, state));
                assert_eq!(agg.std(t, state), 0.0);
            }
        }
        assert_eq!(agg.runs(), 1);
    }

    #[test]
    fn test_two_run_mean_and_std() {
        // Run A at t0: S proportion 1.0; run B: 0.5
        let a = hist(vec![vec![S, S]]);
        let b = hist(vec![vec![S, I]]);
        let agg = aggregate_histograms(&[a, b]).unwrap();

        assert!((agg.mean(0, S) - 0.75).abs() < 1e-12);
        assert!((agg.std(0, S) - 0.25).abs() < 1e-12);
        assert!((agg.mean(0, I) - 0.25).abs() < 1e-12);
        assert!((agg.std(0, I) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_timestep_mismatch_names_offender() {
        let a = hist(vec![vec![S, I], vec![S, I]]);
        let b = hist(vec![vec![S, I]]);
        let err = aggregate_histograms(&[a, b]).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::ShapeMismatch {
                run: 1,
                kind: ShapeMismatchKind::TimestepCount {
                    expected: 2,
                    found: 1
                }
            }
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            aggregate_histograms(&[]),
            Err(AnalysisError::NoRuns)
        ));
    }
}
