use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u32);

/// Initial state of a body handed to the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInit<A> {
	pub attributes: A,
	pub position: Vector,
	pub velocity: Vector,
}

impl<A> BodyInit<A> {
	pub fn new(attributes: A, position: Vector, velocity: Vector) -> Self {
		BodyInit {
			attributes,
			position,
			velocity,
		}
	}

	pub(crate) fn check(&self) -> Result<(), &'static str> {
		if !self.position.iter().all(|c| c.is_finite()) {
			return Err("position is not finite");
		}
		if !self.velocity.iter().all(|c| c.is_finite()) {
			return Err("velocity is not finite");
		}
		Ok(())
	}
}

/// A simulated body together with its recorded trajectory.
///
/// History entry `k` holds the state at step `creation_step + k`. While the
/// body takes part in the simulation both histories grow by one entry per
/// step; once destroyed they are frozen.
#[derive(Debug, Clone, PartialEq)]
pub struct Body<A> {
	id: BodyId,
	attributes: A,
	creation_step: Step,
	destruction_step: Option<Step>,
	positions: Vec<Vector>,
	velocities: Vec<Vector>,
}

impl<A> Body<A> {
	pub(crate) fn new(id: BodyId, creation_step: Step, init: BodyInit<A>) -> Self {
		Body {
			id,
			attributes: init.attributes,
			creation_step,
			destruction_step: None,
			positions: vec![init.position],
			velocities: vec![init.velocity],
		}
	}

	pub fn id(&self) -> BodyId {
		self.id
	}

	pub fn attributes(&self) -> &A {
		&self.attributes
	}

	pub fn creation_step(&self) -> Step {
		self.creation_step
	}

	/// `None` while the body is still being propagated.
	pub fn destruction_step(&self) -> Option<Step> {
		self.destruction_step
	}

	pub fn is_destroyed(&self) -> bool {
		self.destruction_step.is_some()
	}

	/// Whether `step` lies in `[creation_step, destruction_step]`.
	pub fn exists(&self, step: Step) -> bool {
		self.creation_step <= step && self.destruction_step.map_or(true, |d| step <= d)
	}

	/// Whether the body is propagated from `step` onward, i.e. it exists and
	/// was not merged away at `step`. Force and collision computation only
	/// considers bodies for which this holds.
	pub fn is_active(&self, step: Step) -> bool {
		self.creation_step <= step && self.destruction_step.map_or(true, |d| step < d)
	}

	fn history_index(&self, step: Step) -> Option<usize> {
		if self.exists(step) {
			Some(step - self.creation_step)
		} else {
			None
		}
	}

	pub fn position_at(&self, step: Step) -> Option<&Vector> {
		self.history_index(step).and_then(|k| self.positions.get(k))
	}

	pub fn velocity_at(&self, step: Step) -> Option<&Vector> {
		self.history_index(step).and_then(|k| self.velocities.get(k))
	}

	/// Most recent entry of this body's own position history.
	pub fn latest_position(&self) -> &Vector {
		&self.positions[self.positions.len() - 1]
	}

	pub fn latest_velocity(&self) -> &Vector {
		&self.velocities[self.velocities.len() - 1]
	}

	/// Last step with a complete (position and velocity) record.
	pub fn last_recorded_step(&self) -> Step {
		self.creation_step + self.velocities.len() - 1
	}

	pub fn positions(&self) -> &[Vector] {
		&self.positions
	}

	pub fn velocities(&self) -> &[Vector] {
		&self.velocities
	}

	pub(crate) fn push_position(&mut self, position: Vector) {
		debug_assert!(!self.is_destroyed(), "{:?} is frozen", self.id);
		self.positions.push(position);
	}

	pub(crate) fn push_velocity(&mut self, velocity: Vector) {
		debug_assert!(!self.is_destroyed(), "{:?} is frozen", self.id);
		self.velocities.push(velocity);
	}

	pub(crate) fn destroy(&mut self, step: Step) {
		assert!(
			self.destruction_step.is_none(),
			"{:?} destroyed twice (at {:?} and {})",
			self.id,
			self.destruction_step,
			step
		);
		assert!(self.creation_step <= step, "{:?} destroyed before it was created", self.id);
		self.destruction_step = Some(step);
	}
}

impl<A: Massive> Body<A> {
	pub fn momentum_at(&self, step: Step) -> Option<Vector> {
		self.velocity_at(step).map(|v| v * self.attributes.mass())
	}

	pub fn kinetic_energy_at(&self, step: Step) -> Option<Scalar> {
		self.velocity_at(step)
			.map(|v| 0.5 * self.attributes.mass() * v.norm_squared())
	}
}

impl<A: Extent> Body<A> {
	/// Squared sum-of-radii contact test at `step`; `false` if either body has
	/// no recorded position there.
	pub fn touches(&self, other: &Body<A>, step: Step) -> bool {
		match (self.position_at(step), other.position_at(step)) {
			(Some(a), Some(b)) => {
				let reach = self.attributes.radius() + other.attributes.radius();
				(a - b).norm_squared() <= reach * reach
			}
			_ => false,
		}
	}
}
