mod graph;
mod results;
mod states;
mod trajectory;

pub use graph::ContactGraph;
pub use results::{AggregatedHistogram, AggregatedSeries, SeriesPoint, StateHistogram};
pub use states::{MAX_STATE_CODES, StateCode, StateSpace};
pub use trajectory::{RunBundle, TrajectoryMatrix};
