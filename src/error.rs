//! Recoverable configuration errors.
//!
//! Contract violations inside a step (merging with no partners, zero total
//! mass, destroying a body twice) are not represented here; they panic.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
	/// Step size must be positive and finite.
	InvalidStepSize(f64),
	/// A body handed to the simulation has a non-finite state.
	InvalidBody { index: usize, reason: &'static str },
	/// A scenario description could not be turned into a simulation.
	Scenario(String),
}

impl fmt::Display for SimError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SimError::InvalidStepSize(dt) => {
				write!(f, "step size must be positive and finite, got {}", dt)
			}
			SimError::InvalidBody { index, reason } => write!(f, "body {}: {}", index, reason),
			SimError::Scenario(msg) => write!(f, "invalid scenario: {}", msg),
		}
	}
}

impl std::error::Error for SimError {}
