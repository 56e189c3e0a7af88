use accrete::forces::G;
use accrete::prelude::*;
use accrete::scenario::ScenarioConfig;

const SCENARIO: &str = r#"
parameters:
  step_size: 0.5
  gravitational_constant: 1.0
  steps: 40
  collisions: false

bodies:
  - mass: 10.0
    radius: 1.0
    position: [0.0, 0.0]
  - mass: 1.0
    radius: 0.5
    position: [5.0, 0.0]
    velocity: [0.0, 1.4]
"#;

#[test]
fn parses_and_builds_scenario() {
	let scenario = ScenarioConfig::from_yaml(SCENARIO).unwrap();

	assert_eq!(scenario.parameters.steps, 40);
	assert_eq!(scenario.bodies.len(), 2);
	assert_eq!(scenario.bodies[0].velocity, [0.0, 0.0]);

	let mut simulation = scenario.build().unwrap();
	assert_eq!(simulation.step_size(), 0.5);
	assert!(!simulation.handles_collisions());

	simulation.run(scenario.parameters.steps);
	assert_eq!(simulation.latest_view().count(), 2);
}

#[test]
fn missing_parameters_use_defaults() {
	let scenario = ScenarioConfig::from_yaml(
		"bodies:\n  - mass: 1.0\n    radius: 1.0\n    position: [0.0, 0.0]\n",
	)
	.unwrap();

	assert_eq!(scenario.parameters.step_size, 1.0);
	assert_eq!(scenario.parameters.gravitational_constant, G);
	assert!(scenario.parameters.collisions);
	assert_eq!(scenario.parameters.softening, 0.0);
	assert!(scenario.build().unwrap().handles_collisions());
}

#[test]
fn rejects_malformed_scenarios() {
	assert!(matches!(
		ScenarioConfig::from_yaml("bodies: 3"),
		Err(SimError::Scenario(_))
	));

	let mut scenario = ScenarioConfig::from_yaml(SCENARIO).unwrap();
	scenario.bodies[1].mass = 0.0;
	assert!(matches!(scenario.build(), Err(SimError::Scenario(_))));

	let mut scenario = ScenarioConfig::from_yaml(SCENARIO).unwrap();
	scenario.parameters.step_size = 0.0;
	assert!(matches!(scenario.build(), Err(SimError::InvalidStepSize(_))));
}

#[test]
fn reference_scenario_matches_demo_setup() {
	let scenario = ScenarioConfig::reference();
	let simulation = scenario.build().unwrap();

	let masses: Vec<Scalar> = simulation.latest_view().map(|b| b.attributes().mass).collect();
	assert_eq!(masses, vec![1e13, 1e12, 1e12]);
	assert_eq!(scenario.parameters.steps, 100_000);
	assert!(simulation.handles_collisions());
}
