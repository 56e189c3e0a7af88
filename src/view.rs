use crate::prelude::*;

/// Which recorded state of a body to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum At {
	Step(Step),
	/// Last entry of the body's own history. For a destroyed body this is its
	/// destruction step, not the simulation's end step.
	Latest,
}

/// Read-only cursor over the bodies that exist at one step, in collection
/// order. Clone it to restart from the beginning.
#[derive(Debug)]
pub struct SimulationView<'a, A> {
	bodies: &'a [Body<A>],
	step: Step,
	next: usize,
}

impl<'a, A> Clone for SimulationView<'a, A> {
	fn clone(&self) -> Self {
		SimulationView {
			bodies: self.bodies,
			step: self.step,
			next: 0,
		}
	}
}

impl<'a, A> SimulationView<'a, A> {
	pub(crate) fn new(bodies: &'a [Body<A>], step: Step) -> Self {
		SimulationView {
			bodies,
			step,
			next: 0,
		}
	}

	pub fn step(&self) -> Step {
		self.step
	}
}

impl<'a, A> Iterator for SimulationView<'a, A> {
	type Item = Snapshot<'a, A>;

	fn next(&mut self) -> Option<Self::Item> {
		while let Some(body) = self.bodies.get(self.next) {
			self.next += 1;
			if let (Some(position), Some(velocity)) =
				(body.position_at(self.step), body.velocity_at(self.step))
			{
				return Some(Snapshot {
					body,
					position,
					velocity,
				});
			}
		}
		None
	}
}

/// One body as seen by a [`SimulationView`].
#[derive(Debug)]
pub struct Snapshot<'a, A> {
	body: &'a Body<A>,
	position: &'a Vector,
	velocity: &'a Vector,
}

impl<'a, A> Clone for Snapshot<'a, A> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, A> Copy for Snapshot<'a, A> {}

impl<'a, A> Snapshot<'a, A> {
	pub fn id(&self) -> BodyId {
		self.body.id()
	}

	pub fn attributes(&self) -> &'a A {
		self.body.attributes()
	}

	pub fn body(&self) -> &'a Body<A> {
		self.body
	}

	/// Position at the view's step.
	pub fn position(&self) -> &'a Vector {
		self.position
	}

	/// Velocity at the view's step.
	pub fn velocity(&self) -> &'a Vector {
		self.velocity
	}

	pub fn position_at(&self, at: At) -> Option<&'a Vector> {
		match at {
			At::Step(step) => self.body.position_at(step),
			At::Latest => Some(self.body.latest_position()),
		}
	}

	pub fn velocity_at(&self, at: At) -> Option<&'a Vector> {
		match at {
			At::Step(step) => self.body.velocity_at(step),
			At::Latest => Some(self.body.latest_velocity()),
		}
	}
}
