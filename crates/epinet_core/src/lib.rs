//! Multi-run epidemic trajectory analysis library
//!
//! This crate aggregates the output of stochastic epidemic simulations run
//! over contact networks. Each run contributes a per-node-per-timestep
//! health state matrix and a contact graph; the engine turns a set of such
//! runs into time-resolved statistics with uncertainty bands:
//! - Per-state population proportions, mean/std across runs
//! - Average susceptible-infected network distance per timestep
//! - Fraction of infected neighbors among susceptible nodes per timestep
//!
//! Ingestion (file parsing, run discovery) and rendering are deliberately
//! outside this crate: callers hand in fully materialized [`model::RunBundle`]s
//! and receive numeric series back.
//!
//! # Usage
//!
//! ```ignore
//! use epinet_core::analysis::{AnalysisConfig, analyze};
//! use epinet_core::model::{ContactGraph, RunBundle, StateSpace, TrajectoryMatrix};
//! use std::sync::Arc;
//!
//! let graph = Arc::new(ContactGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3)])?);
//! let bundles: Vec<RunBundle> = trajectories
//!     .into_iter()
//!     .enumerate()
//!     .map(|(run, traj)| RunBundle::new(run, traj, Arc::clone(&graph)))
//!     .collect();
//!
//! let config = AnalysisConfig::new(StateSpace::sird());
//! let report = analyze(&bundles, &config)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod aggregate;
pub mod analysis;
pub mod distance;
pub mod error;
pub mod histogram;
pub mod spatial;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::{AnalysisConfig, AnalysisReport, analyze};
pub use model::{ContactGraph, RunBundle, StateCode, StateSpace, TrajectoryMatrix};
