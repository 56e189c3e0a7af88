//! YAML scenario descriptions for `Mass` bodies under gravity.
//!
//! ```yaml
//! parameters:
//!   step_size: 1.0
//!   gravitational_constant: 6.6743e-11
//!   steps: 100000
//!   collisions: true
//!   softening: 0.0
//!
//! bodies:
//!   - mass: 1.0e13
//!     radius: 10.0
//!     position: [0.0, 0.0]
//!     velocity: [0.0, 0.0]
//!   - mass: 1.0e12
//!     radius: 10.0
//!     position: [100.0, 0.0]
//!     velocity: [0.0, 3.0]
//! ```

use serde::Deserialize;

use crate::forces::G;
use crate::prelude::*;
use crate::DEFAULT_STEP_SIZE;

fn default_step_size() -> Scalar {
	DEFAULT_STEP_SIZE
}

fn default_gravitational_constant() -> Scalar {
	G
}

fn default_true() -> bool {
	true
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ParametersConfig {
	#[serde(default = "default_step_size")]
	pub step_size: Scalar,
	#[serde(default = "default_gravitational_constant")]
	pub gravitational_constant: Scalar,
	/// Number of steps the runner advances.
	#[serde(default)]
	pub steps: usize,
	#[serde(default = "default_true")]
	pub collisions: bool,
	#[serde(default)]
	pub softening: Scalar,
}

impl Default for ParametersConfig {
	fn default() -> Self {
		ParametersConfig {
			step_size: DEFAULT_STEP_SIZE,
			gravitational_constant: G,
			steps: 0,
			collisions: true,
			softening: 0.0,
		}
	}
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
	pub mass: Scalar,
	pub radius: Scalar,
	pub position: [Scalar; 2],
	#[serde(default)]
	pub velocity: [Scalar; 2],
}

impl BodyConfig {
	fn to_init(&self) -> BodyInit<Mass> {
		BodyInit::new(
			Mass::new(self.mass, self.radius),
			Vector::from(self.position),
			Vector::from(self.velocity),
		)
	}
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
	#[serde(default)]
	pub parameters: ParametersConfig,
	pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
	pub fn from_yaml(text: &str) -> Result<Self, SimError> {
		serde_yaml::from_str(text).map_err(|e| SimError::Scenario(e.to_string()))
	}

	/// A heavy central body with two lighter bodies on opposite sides.
	pub fn reference() -> Self {
		ScenarioConfig {
			parameters: ParametersConfig {
				steps: 100_000,
				..ParametersConfig::default()
			},
			bodies: vec![
				BodyConfig {
					mass: 1e13,
					radius: 10.0,
					position: [0.0, 0.0],
					velocity: [0.0, 0.0],
				},
				BodyConfig {
					mass: 1e12,
					radius: 10.0,
					position: [100.0, 0.0],
					velocity: [0.0, 3.0],
				},
				BodyConfig {
					mass: 1e12,
					radius: 10.0,
					position: [-200.0, 0.0],
					velocity: [0.0, -2.5],
				},
			],
		}
	}

	pub fn gravity(&self) -> Gravity {
		Gravity::new(self.parameters.gravitational_constant).with_softening(self.parameters.softening)
	}

	pub fn build(&self) -> Result<Simulation<Mass>, SimError> {
		for (index, body) in self.bodies.iter().enumerate() {
			if !(body.mass > 0.0 && body.mass.is_finite()) {
				return Err(SimError::Scenario(format!("body {} has mass {}", index, body.mass)));
			}
			if !(body.radius >= 0.0 && body.radius.is_finite()) {
				return Err(SimError::Scenario(format!("body {} has radius {}", index, body.radius)));
			}
		}
		if !(self.parameters.softening >= 0.0) {
			return Err(SimError::Scenario(format!(
				"softening must be non-negative, got {}",
				self.parameters.softening
			)));
		}

		let builder = Simulation::builder(self.gravity())
			.with_step_size(self.parameters.step_size)
			.with_bodies(self.bodies.iter().map(BodyConfig::to_init));
		let builder = if self.parameters.collisions {
			builder.with_collisions(Accretion)
		} else {
			builder
		};
		builder.build()
	}
}
