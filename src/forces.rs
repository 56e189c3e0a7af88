//! Force models.
//!
//! A force model computes the acceleration of one body from the full body
//! collection at a given step. Gravity is the reference model; any closure
//! with the same signature is a force model too.

use crate::prelude::*;

/// Gravitational constant in SI units (m³ kg⁻¹ s⁻²).
pub const G: Scalar = 6.6743e-11;

pub trait ForceModel<A> {
	/// Acceleration of `bodies[index]` at `step`.
	///
	/// Only bodies for which [`Body::is_active`] holds at `step` may
	/// contribute, the body itself is skipped, and a body that is not active
	/// at `step` gets the zero vector.
	fn acceleration(&self, index: usize, step: Step, bodies: &[Body<A>]) -> Vector;
}

impl<A, F> ForceModel<A> for F
where
	F: Fn(usize, Step, &[Body<A>]) -> Vector,
{
	fn acceleration(&self, index: usize, step: Step, bodies: &[Body<A>]) -> Vector {
		self(index, step, bodies)
	}
}

/// Direct O(n²) Newtonian gravity.
///
/// No softening is applied unless one is configured with
/// [`Gravity::with_softening`], so two bodies at the same position produce a
/// non-finite acceleration that propagates into the trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
	pub g: Scalar,
	/// Softening length; zero reproduces the plain inverse-square law.
	pub softening: Scalar,
}

impl Gravity {
	pub fn new(g: Scalar) -> Self {
		Gravity { g, softening: 0.0 }
	}

	pub fn with_softening(mut self, softening: Scalar) -> Self {
		self.softening = softening;
		self
	}

	fn active_positions<'a, A>(
		step: Step,
		bodies: &'a [Body<A>],
	) -> impl Iterator<Item = (usize, &'a Body<A>, &'a Vector)> + 'a {
		bodies
			.iter()
			.enumerate()
			.filter(move |(_, b)| b.is_active(step))
			.filter_map(move |(i, b)| b.position_at(step).map(|p| (i, b, p)))
	}

	/// Total pairwise potential energy of the bodies active at `step`.
	pub fn potential_energy<A: Massive>(&self, step: Step, bodies: &[Body<A>]) -> Scalar {
		let eps2 = self.softening * self.softening;
		let active: Vec<_> = Self::active_positions(step, bodies).collect();

		active
			.iter()
			.enumerate()
			.flat_map(|(k, (_, a, pa))| {
				active[k + 1..].iter().map(move |(_, b, pb)| {
					let r = ((*pb - *pa).norm_squared() + eps2).sqrt();
					-self.g * a.attributes().mass() * b.attributes().mass() / r
				})
			})
			.sum()
	}
}

impl Default for Gravity {
	fn default() -> Self {
		Self::new(G)
	}
}

impl<A: Massive> ForceModel<A> for Gravity {
	fn acceleration(&self, index: usize, step: Step, bodies: &[Body<A>]) -> Vector {
		let body = &bodies[index];
		let position = match body.position_at(step) {
			Some(p) if body.is_active(step) => p,
			_ => return Vector::zeros(),
		};
		let eps2 = self.softening * self.softening;

		Self::active_positions(step, bodies)
			.filter(|(j, _, _)| *j != index)
			.map(|(_, other, p)| {
				let dr = p - position;
				let r2 = dr.norm_squared() + eps2;
				dr * (self.g * other.attributes().mass() / (r2 * r2.sqrt()))
			})
			.fold(Vector::zeros(), |acc, a| acc + a)
	}
}
