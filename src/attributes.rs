//! Capability traits through which force and collision models read body
//! attributes. The engine itself never looks inside an attribute value.

use crate::prelude::*;

pub trait Massive {
	fn mass(&self) -> Scalar;
}

pub trait Extent {
	fn radius(&self) -> Scalar;
}

/// Attributes that can be rebuilt from the combined mass and radius of a merger.
pub trait Mergeable: Massive + Extent + Sized {
	fn merged(mass: Scalar, radius: Scalar) -> Self;
}

/// Mass and radius of a disk-like body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mass {
	pub mass: Scalar,
	pub radius: Scalar,
}

impl Mass {
	pub fn new(mass: Scalar, radius: Scalar) -> Self {
		Mass { mass, radius }
	}
}

impl Massive for Mass {
	fn mass(&self) -> Scalar {
		self.mass
	}
}

impl Extent for Mass {
	fn radius(&self) -> Scalar {
		self.radius
	}
}

impl Mergeable for Mass {
	fn merged(mass: Scalar, radius: Scalar) -> Self {
		Mass { mass, radius }
	}
}
