use log::{info, trace};

use crate::prelude::*;

pub mod attributes;
pub mod body;
pub mod collision;
pub mod error;
pub mod forces;
pub mod prelude;
pub mod scenario;
pub mod view;


/// Step size used when none is configured.
pub const DEFAULT_STEP_SIZE: Scalar = 1.0;

/// Velocity-Verlet N-body simulation with optional collision merging.
///
/// Every body ever created is kept, destroyed ones included, so the full
/// trajectory of the run can be read back through [`Simulation::view`] and
/// [`Simulation::trajectories`].
pub struct Simulation<A> {
	bodies: Vec<Body<A>>,
	force: Box<dyn ForceModel<A>>,
	collisions: Option<Box<dyn CollisionModel<A>>>,
	step_size: Scalar,
	current_step: Step,
	next_id: u32,
}

impl<A: 'static> Simulation<A> {
	pub fn builder<F>(force: F) -> SimulationBuilder<A>
	where
		F: ForceModel<A> + 'static,
	{
		SimulationBuilder {
			bodies: Vec::new(),
			force: Box::new(force),
			collisions: None,
			step_size: DEFAULT_STEP_SIZE,
		}
	}
}

impl<A> Simulation<A> {
	/// Advances every active body by one step, then resolves collisions at the
	/// new step if a collision model is configured.
	pub fn step(&mut self) {
		let t = self.current_step;
		let dt = self.step_size;

		let active: Vec<usize> = (0..self.bodies.len())
			.filter(|&i| self.bodies[i].is_active(t))
			.collect();

		let accelerations: Vec<Vector> = active
			.iter()
			.map(|&i| self.force.acceleration(i, t, &self.bodies))
			.collect();

		for (&i, a) in active.iter().zip(&accelerations) {
			let body = &mut self.bodies[i];
			let position = body.latest_position() + body.latest_velocity() * dt + a * (0.5 * dt * dt);
			body.push_position(position);
		}

		// Second force pass sees the positions just appended.
		let next_accelerations: Vec<Vector> = active
			.iter()
			.map(|&i| self.force.acceleration(i, t + 1, &self.bodies))
			.collect();

		for ((&i, a), next_a) in active.iter().zip(&accelerations).zip(&next_accelerations) {
			let body = &mut self.bodies[i];
			let velocity = body.latest_velocity() + (a + next_a) * (0.5 * dt);
			body.push_velocity(velocity);
		}

		self.current_step = t + 1;
		trace!("advanced {} bodies to step {}", active.len(), self.current_step);

		if let Some(model) = &self.collisions {
			collision::resolve(
				&**model,
				self.current_step,
				&mut self.bodies,
				&mut self.next_id,
			);
		}
	}

	/// Advances `steps` steps and returns the new end step.
	pub fn run(&mut self, steps: usize) -> Step {
		for _ in 0..steps {
			self.step();
		}
		self.current_step
	}

	/// Adds a body at the current step and returns its id.
	pub fn add_body(&mut self, attributes: A, position: Vector, velocity: Vector) -> Result<BodyId, SimError> {
		let init = BodyInit::new(attributes, position, velocity);
		init.check().map_err(|reason| SimError::InvalidBody {
			index: self.bodies.len(),
			reason,
		})?;
		let id = self.spawn(init);
		info!("spawned {:?} at step {}", id, self.current_step);
		Ok(id)
	}

	fn spawn(&mut self, init: BodyInit<A>) -> BodyId {
		let id = BodyId(self.next_id);
		self.next_id += 1;
		self.bodies.push(Body::new(id, self.current_step, init));
		id
	}

	/// Index of the most recent step, i.e. the number of steps taken so far.
	pub fn end_step(&self) -> Step {
		self.current_step
	}

	pub fn step_size(&self) -> Scalar {
		self.step_size
	}

	pub fn handles_collisions(&self) -> bool {
		self.collisions.is_some()
	}

	/// All bodies ever created, in creation order.
	pub fn bodies(&self) -> &[Body<A>] {
		&self.bodies
	}

	pub fn body(&self, id: BodyId) -> Option<&Body<A>> {
		self.bodies.iter().find(|b| b.id() == id)
	}

	/// Bodies existing at `step`, or `None` if `step` has not been simulated.
	pub fn view(&self, step: Step) -> Option<SimulationView<'_, A>> {
		if step > self.current_step {
			return None;
		}
		Some(SimulationView::new(&self.bodies, step))
	}

	pub fn latest_view(&self) -> SimulationView<'_, A> {
		SimulationView::new(&self.bodies, self.current_step)
	}

	/// One trajectory per body, ordered by id.
	pub fn trajectories(&self) -> Vec<Trajectory<'_, A>> {
		let mut trajectories: Vec<_> = self
			.bodies
			.iter()
			.map(|body| Trajectory {
				id: body.id(),
				attributes: body.attributes(),
				first_step: body.creation_step(),
				positions: body.positions(),
				velocities: body.velocities(),
			})
			.collect();
		trajectories.sort_by_key(|t| t.id);
		trajectories
	}
}

/// Conserved quantities over the bodies active at a step. Bodies merged away
/// at `step` are not counted; their remnant is.
impl<A: Massive> Simulation<A> {
	pub fn total_mass(&self, step: Step) -> Scalar {
		self.bodies
			.iter()
			.filter(|b| b.is_active(step))
			.map(|b| b.attributes().mass())
			.sum()
	}

	pub fn total_momentum(&self, step: Step) -> Vector {
		self.bodies
			.iter()
			.filter(|b| b.is_active(step))
			.filter_map(|b| b.momentum_at(step))
			.fold(Vector::zeros(), |acc, p| acc + p)
	}

	pub fn kinetic_energy(&self, step: Step) -> Scalar {
		self.bodies
			.iter()
			.filter(|b| b.is_active(step))
			.filter_map(|b| b.kinetic_energy_at(step))
			.sum()
	}
}

/// Recorded path of one body, starting at `first_step`.
#[derive(Debug, Clone, Copy)]
pub struct Trajectory<'a, A> {
	pub id: BodyId,
	pub attributes: &'a A,
	pub first_step: Step,
	pub positions: &'a [Vector],
	pub velocities: &'a [Vector],
}

impl<'a, A> Trajectory<'a, A> {
	pub fn last_step(&self) -> Step {
		self.first_step + self.positions.len() - 1
	}
}

/// Configures and validates a [`Simulation`].
pub struct SimulationBuilder<A> {
	bodies: Vec<BodyInit<A>>,
	force: Box<dyn ForceModel<A>>,
	collisions: Option<Box<dyn CollisionModel<A>>>,
	step_size: Scalar,
}

impl<A: 'static> SimulationBuilder<A> {
	pub fn with_body(mut self, attributes: A, position: Vector, velocity: Vector) -> Self {
		self.bodies.push(BodyInit::new(attributes, position, velocity));
		self
	}

	pub fn with_bodies<I>(mut self, bodies: I) -> Self
	where
		I: IntoIterator<Item = BodyInit<A>>,
	{
		self.bodies.extend(bodies);
		self
	}

	/// Enables collision detection; without a model bodies pass through each
	/// other.
	pub fn with_collisions<C>(mut self, model: C) -> Self
	where
		C: CollisionModel<A> + 'static,
	{
		self.collisions = Some(Box::new(model));
		self
	}

	pub fn with_step_size(mut self, step_size: Scalar) -> Self {
		self.step_size = step_size;
		self
	}

	pub fn build(self) -> Result<Simulation<A>, SimError> {
		if !(self.step_size.is_finite() && self.step_size > 0.0) {
			return Err(SimError::InvalidStepSize(self.step_size));
		}
		for (index, init) in self.bodies.iter().enumerate() {
			init.check()
				.map_err(|reason| SimError::InvalidBody { index, reason })?;
		}

		let mut simulation = Simulation {
			bodies: Vec::with_capacity(self.bodies.len()),
			force: self.force,
			collisions: self.collisions,
			step_size: self.step_size,
			current_step: 0,
			next_id: 0,
		};
		for init in self.bodies {
			simulation.spawn(init);
		}
		info!(
			"simulation with {} bodies, dt = {}, collisions {}",
			simulation.bodies.len(),
			simulation.step_size,
			if simulation.handles_collisions() { "on" } else { "off" }
		);
		Ok(simulation)
	}
}
