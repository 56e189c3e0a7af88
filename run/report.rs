use accrete::prelude::*;

pub fn summary(simulation: &Simulation<Mass>, gravity: &Gravity, step: Step) -> String {
	let existing = simulation.view(step).map_or(0, |view| view.count());
	let momentum = simulation.total_momentum(step);
	let energy = simulation.kinetic_energy(step) + gravity.potential_energy(step, simulation.bodies());
	format!(
		"step {}: {} bodies, momentum ({:.6e}, {:.6e}), energy {:.6e}",
		step, existing, momentum.x, momentum.y, energy
	)
}

pub fn bodies(view: SimulationView<'_, Mass>) -> Vec<String> {
	let step = view.step();
	view.map(|body| {
		let Mass { mass, radius } = *body.attributes();
		format!(
			"{:?} @ {}: mass {:.4e} radius {:.3} position ({:.3}, {:.3}) velocity ({:.4}, {:.4}) since step {}",
			body.id(),
			step,
			mass,
			radius,
			body.position().x,
			body.position().y,
			body.velocity().x,
			body.velocity().y,
			body.body().creation_step()
		)
	})
	.collect()
}
