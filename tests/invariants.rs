use accrete::prelude::*;

fn no_force(_: usize, _: Step, _: &[Body<Mass>]) -> Vector {
	Vector::zeros()
}

/// Bodies on the x axis drifting into each other at different times, with
/// gravity strong enough to bend their paths.
fn colliding_line() -> Simulation<Mass> {
	Simulation::builder(Gravity::new(0.01))
		.with_body(Mass::new(3.0, 1.0), Vector::new(0.0, 0.0), Vector::new(0.0, 0.0))
		.with_body(Mass::new(5.0, 1.0), Vector::new(6.0, 0.0), Vector::new(-0.5, 0.0))
		.with_body(Mass::new(2.0, 1.0), Vector::new(-12.0, 0.0), Vector::new(0.4, 0.0))
		.with_body(Mass::new(1.0, 0.5), Vector::new(0.0, 40.0), Vector::new(0.0, -1.0))
		.with_collisions(Accretion)
		.with_step_size(0.5)
		.build()
		.unwrap()
}

fn check_history_alignment(simulation: &Simulation<Mass>) {
	let end = simulation.end_step();
	for body in simulation.bodies() {
		let last = body.destruction_step().unwrap_or(end);
		let expected = last - body.creation_step() + 1;
		assert_eq!(body.positions().len(), expected, "{:?} positions", body.id());
		assert_eq!(body.velocities().len(), expected, "{:?} velocities", body.id());
	}
}

#[test]
fn history_stays_aligned_with_existence() {
	let mut simulation = colliding_line();
	check_history_alignment(&simulation);

	for step in 0..150 {
		simulation.step();
		if step == 20 {
			simulation
				.add_body(Mass::new(1.0, 0.5), Vector::new(30.0, 30.0), Vector::new(-0.5, -0.5))
				.unwrap();
		}
		check_history_alignment(&simulation);
	}

	assert!(
		simulation.bodies().iter().any(|b| b.is_destroyed()),
		"scenario never merged"
	);
}

#[test]
fn existence_is_contiguous_and_destruction_is_final() {
	let mut simulation = colliding_line();
	let mut seen: Vec<Option<Step>> = Vec::new();

	for _ in 0..150 {
		simulation.step();
		let bodies = simulation.bodies();
		for (k, body) in bodies.iter().enumerate() {
			match seen.get(k) {
				Some(Some(destroyed)) => assert_eq!(body.destruction_step(), Some(*destroyed)),
				Some(None) => {}
				None => seen.push(None),
			}
			seen[k] = body.destruction_step();
		}
	}

	let end = simulation.end_step();
	for body in simulation.bodies() {
		let last = body.destruction_step().unwrap_or(end);
		assert!(body.creation_step() <= last);
		for t in 0..=end {
			assert_eq!(body.exists(t), body.creation_step() <= t && t <= last, "{:?} at {}", body.id(), t);
		}
	}
}

#[test]
fn merges_conserve_mass_exactly() {
	let mut simulation = colliding_line();
	let initial = simulation.total_mass(0);
	simulation.run(150);

	let merged: Vec<&Body<Mass>> = simulation.bodies().iter().filter(|b| b.creation_step() > 0).collect();
	assert!(!merged.is_empty());
	assert_eq!(simulation.total_mass(simulation.end_step()), initial);
	assert_eq!(initial, 11.0);
}

#[test]
fn momentum_is_conserved_without_collisions() {
	let mut simulation = Simulation::builder(Gravity::new(1.0))
		.with_body(Mass::new(1.0, 0.1), Vector::new(0.0, 0.0), Vector::new(0.0, 0.3))
		.with_body(Mass::new(2.0, 0.1), Vector::new(10.0, 0.0), Vector::new(0.0, -0.2))
		.with_body(Mass::new(3.0, 0.1), Vector::new(0.0, 15.0), Vector::new(0.1, 0.0))
		.with_step_size(0.1)
		.build()
		.unwrap();

	let initial = simulation.total_momentum(0);
	for _ in 0..100 {
		simulation.step();
		let momentum = simulation.total_momentum(simulation.end_step());
		assert!(
			(momentum - initial).norm() < 1e-10,
			"momentum drifted to {:?} at step {}",
			momentum,
			simulation.end_step()
		);
	}
}

#[test]
fn replay_is_bit_identical() {
	let runs: Vec<Vec<Vec<(u64, u64)>>> = (0..2)
		.map(|_| {
			let mut simulation = accrete::scenario::ScenarioConfig::reference().build().unwrap();
			simulation.run(3_000);
			let positions: Vec<Vec<(u64, u64)>> = simulation
				.trajectories()
				.iter()
				.map(|t| t.positions.iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect())
				.collect();
			positions
		})
		.collect();

	assert_eq!(runs[0], runs[1]);
}

#[test]
fn spawned_body_starts_at_current_step() {
	let mut simulation = Simulation::builder(no_force)
		.with_body(Mass::new(1.0, 1.0), Vector::zeros(), Vector::new(1.0, 0.0))
		.build()
		.unwrap();
	simulation.run(5);

	let id = simulation
		.add_body(Mass::new(2.0, 1.0), Vector::new(0.0, 10.0), Vector::new(0.0, 1.0))
		.unwrap();
	assert_eq!(id, BodyId(1));

	let body = simulation.body(id).unwrap();
	assert_eq!(body.creation_step(), 5);
	assert!(!body.exists(4));
	assert_eq!(body.positions().len(), 1);

	simulation.step();
	let body = simulation.body(id).unwrap();
	assert_eq!(body.position_at(6), Some(&Vector::new(0.0, 11.0)));
	assert_eq!(simulation.latest_view().count(), 2);
}

#[test]
fn trajectories_cover_each_body_lifetime() {
	let mut simulation = colliding_line();
	simulation.run(150);

	let trajectories = simulation.trajectories();
	assert_eq!(trajectories.len(), simulation.bodies().len());
	assert!(trajectories.windows(2).all(|w| w[0].id < w[1].id));
	for trajectory in &trajectories {
		let body = simulation.body(trajectory.id).unwrap();
		assert_eq!(trajectory.first_step, body.creation_step());
		assert_eq!(
			trajectory.last_step(),
			body.destruction_step().unwrap_or(simulation.end_step())
		);
		assert_eq!(trajectory.velocities.len(), trajectory.positions.len());
	}
}

#[test]
fn builder_rejects_invalid_configuration() {
	for dt in [0.0, -1.0, Scalar::NAN, Scalar::INFINITY] {
		let result = Simulation::builder(no_force).with_step_size(dt).build();
		assert!(matches!(result, Err(SimError::InvalidStepSize(_))));
	}

	let result = Simulation::builder(no_force)
		.with_body(Mass::new(1.0, 1.0), Vector::zeros(), Vector::zeros())
		.with_body(Mass::new(1.0, 1.0), Vector::new(Scalar::NAN, 0.0), Vector::zeros())
		.build();
	assert!(matches!(result, Err(SimError::InvalidBody { index: 1, .. })));
}

#[test]
fn collisions_are_ignored_without_a_model() {
	let mut simulation = Simulation::builder(no_force)
		.with_body(Mass::new(1.0, 1.0), Vector::new(-2.0, 0.0), Vector::new(1.0, 0.0))
		.with_body(Mass::new(1.0, 1.0), Vector::new(2.0, 0.0), Vector::new(-1.0, 0.0))
		.build()
		.unwrap();
	simulation.run(10);

	assert!(!simulation.handles_collisions());
	assert_eq!(simulation.bodies().len(), 2);
	assert!(simulation.bodies().iter().all(|b| !b.is_destroyed()));
}
