use std::fmt;

/// Errors raised while constructing a trajectory matrix from raw input
#[derive(Debug, Clone)]
pub enum TrajectoryShapeError {
    /// A row's length differs from the first row's length
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Flat data length does not factor into the declared shape
    LengthMismatch {
        expected: usize,
        found: usize,
    },
    /// A raw value is not a known state code
    InvalidCode {
        timestep: usize,
        node: usize,
        code: u8,
    },
}

impl fmt::Display for TrajectoryShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrajectoryShapeError::RaggedRow {
                row,
                expected,
                found,
            } => {
                write!(
                    f,
                    "trajectory row {row} has {found} nodes, expected {expected}"
                )
            }
            TrajectoryShapeError::LengthMismatch { expected, found } => {
                write!(
                    f,
                    "trajectory data has {found} entries, shape requires {expected}"
                )
            }
            TrajectoryShapeError::InvalidCode {
                timestep,
                node,
                code,
            } => {
                write!(
                    f,
                    "value {code} at timestep {timestep}, node {node} is not a valid state code"
                )
            }
        }
    }
}

impl std::error::Error for TrajectoryShapeError {}

/// Errors raised while constructing a contact graph
#[derive(Debug, Clone)]
pub enum GraphError {
    /// An edge endpoint is outside the declared node range
    NodeOutOfRange { node: u32, node_count: usize },
    /// An edge references a node label that was not declared
    UnknownLabel(String),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::NodeOutOfRange { node, node_count } => {
                write!(
                    f,
                    "edge endpoint {node} is outside the node range 0..{node_count}"
                )
            }
            GraphError::UnknownLabel(label) => {
                write!(f, "edge references undeclared node label {label}")
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// Errors raised when configuring the categorical state space
#[derive(Debug, Clone)]
pub enum StateSpaceError {
    /// Requested class count is zero or exceeds the known state codes
    InvalidClassCount { requested: usize, max: usize },
}

impl fmt::Display for StateSpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateSpaceError::InvalidClassCount { requested, max } => {
                write!(f, "class count {requested} is outside the range 1..={max}")
            }
        }
    }
}

impl std::error::Error for StateSpaceError {}

/// Error raised by the histogram builder for a single trajectory.
///
/// Carries no run identifier; [`analyze`](crate::analysis::analyze) attaches
/// one when lifting this into an [`AnalysisError`].
#[derive(Debug, Clone)]
pub enum HistogramError {
    /// A state code in the trajectory lies outside the configured class count
    OutOfRangeCode {
        timestep: usize,
        node: usize,
        code: u8,
    },
}

impl fmt::Display for HistogramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistogramError::OutOfRangeCode {
                timestep,
                node,
                code,
            } => {
                write!(
                    f,
                    "state code {code} at timestep {timestep}, node {node} exceeds the configured class count"
                )
            }
        }
    }
}

impl std::error::Error for HistogramError {}

/// Which structural invariant a run violated
#[derive(Debug, Clone)]
pub enum ShapeMismatchKind {
    /// Run's timestep count differs from the session's
    TimestepCount { expected: usize, found: usize },
    /// Trajectory node count differs from the run's graph
    NodeCount { graph: usize, trajectory: usize },
    /// Histogram class count differs across runs being aggregated
    ClassCount { expected: usize, found: usize },
}

impl fmt::Display for ShapeMismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeMismatchKind::TimestepCount { expected, found } => {
                write!(f, "{found} timesteps where {expected} were expected")
            }
            ShapeMismatchKind::NodeCount { graph, trajectory } => {
                write!(
                    f,
                    "trajectory covers {trajectory} nodes but the graph has {graph}"
                )
            }
            ShapeMismatchKind::ClassCount { expected, found } => {
                write!(f, "{found} state classes where {expected} were expected")
            }
        }
    }
}

/// Errors that abort a whole analysis session.
///
/// Per-timestep data sparsity (an empty pooled sample, a zero-degree node)
/// is not an error: it surfaces as a `None` point in the output series or
/// as exclusion from the pooled sample.
#[derive(Debug, Clone)]
pub enum AnalysisError {
    /// No runs were supplied
    NoRuns,
    /// A run's shape is inconsistent with the rest of the session
    ShapeMismatch {
        run: usize,
        kind: ShapeMismatchKind,
    },
    /// A run uses a state code outside the configured class count.
    /// Fatal: proceeding would silently corrupt the histogram shape.
    MissingClassData {
        run: usize,
        timestep: usize,
        node: usize,
        code: u8,
    },
}

impl AnalysisError {
    /// Lift a per-trajectory histogram error by attaching the run identifier
    #[must_use]
    pub fn from_histogram(run: usize, err: HistogramError) -> Self {
        match err {
            HistogramError::OutOfRangeCode {
                timestep,
                node,
                code,
            } => AnalysisError::MissingClassData {
                run,
                timestep,
                node,
                code,
            },
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::NoRuns => write!(f, "no runs to aggregate"),
            AnalysisError::ShapeMismatch { run, kind } => {
                write!(f, "run {run}: shape mismatch: {kind}")
            }
            AnalysisError::MissingClassData {
                run,
                timestep,
                node,
                code,
            } => {
                write!(
                    f,
                    "run {run}: state code {code} at timestep {timestep}, node {node} exceeds the configured class count"
                )
            }
        }
    }
}

impl std::error::Error for AnalysisError {}
