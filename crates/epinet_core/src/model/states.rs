//! Categorical health states and the configured state space
//!
//! Upstream simulators encode node states as small positive integers
//! (1-based). The set of valid codes for a session is fixed ahead of
//! analysis so that histograms stay alignable across runs even when a
//! short run never visits a rare state.

use serde::{Deserialize, Serialize};

use crate::error::StateSpaceError;

/// Largest state code any model variant uses
pub const MAX_STATE_CODES: usize = 5;

/// Categorical health state of a node at one timestep
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateCode {
    Susceptible = 1,
    Infected = 2,
    Recovered = 3,
    Dead = 4,
    Immune = 5,
}

impl StateCode {
    /// Decode a raw integer state code
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(StateCode::Susceptible),
            2 => Some(StateCode::Infected),
            3 => Some(StateCode::Recovered),
            4 => Some(StateCode::Dead),
            5 => Some(StateCode::Immune),
            _ => None,
        }
    }

    /// The raw integer code (1-based)
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Zero-based histogram bin index
    #[must_use]
    pub fn bin(self) -> usize {
        self as usize - 1
    }

    /// Single-letter label used by plot legends
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StateCode::Susceptible => "S",
            StateCode::Infected => "I",
            StateCode::Recovered => "R",
            StateCode::Dead => "D",
            StateCode::Immune => "M",
        }
    }
}

/// Explicitly configured class count for a session.
///
/// Class count is never inferred from observed data: a run that never
/// visits a rare state would otherwise produce a narrower histogram than
/// its siblings and silently misalign the aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSpace {
    class_count: usize,
}

impl StateSpace {
    /// The 4-class S/I/R/D model variant
    #[must_use]
    pub fn sird() -> Self {
        Self { class_count: 4 }
    }

    /// The 5-class variant with an immune compartment
    #[must_use]
    pub fn sirdm() -> Self {
        Self { class_count: 5 }
    }

    /// A custom class count in `1..=MAX_STATE_CODES`
    pub fn custom(class_count: usize) -> Result<Self, StateSpaceError> {
        if class_count == 0 || class_count > MAX_STATE_CODES {
            return Err(StateSpaceError::InvalidClassCount {
                requested: class_count,
                max: MAX_STATE_CODES,
            });
        }
        Ok(Self { class_count })
    }

    /// Number of state classes in this session
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    /// Whether a state falls inside the configured class count
    #[must_use]
    pub fn contains(&self, state: StateCode) -> bool {
        state.bin() < self.class_count
    }

    /// The states of this space, in code order
    pub fn states(&self) -> impl Iterator<Item = StateCode> + '_ {
        (1..=self.class_count).map(|code| {
            StateCode::from_code(code as u8).expect("class count bounded by MAX_STATE_CODES")
        })
    }

    /// Plot labels for the states of this space, in code order
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.states().map(StateCode::label).collect()
    }
}
