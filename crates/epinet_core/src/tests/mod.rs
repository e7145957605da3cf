//! Integration tests for the analysis engine
//!
//! Tests are organized by topic:
//! - `end_to_end` - Full sessions over the reference two-run scenario
//! - `graph_modes` - Shared vs. per-run graph handling

mod end_to_end;
