use std::{fs, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{debug, info};

use accrete::prelude::*;
use accrete::scenario::ScenarioConfig;

pub mod report;

#[derive(Parser, Debug)]
#[command(about = "Run a gravitational N-body scenario with collision merging")]
struct Args {
	/// YAML scenario file; the built-in three-body scenario when omitted.
	#[arg(short, long)]
	scenario: Option<PathBuf>,

	/// Overrides the step count of the scenario.
	#[arg(short = 'n', long)]
	steps: Option<usize>,

	/// Log a report every this many steps (0 disables).
	#[arg(short, long, default_value_t = 10_000)]
	report_every: usize,

	/// One of off, error, warn, info, debug, trace.
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

fn setup_logging(level: log::LevelFilter) -> Result<()> {
	fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!(
				"{}[{}][{}] {}",
				chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
				record.target(),
				record.level(),
				message
			))
		})
		.level(level)
		.chain(std::io::stdout())
		.apply()
		.context("installing logger")?;
	Ok(())
}

fn load_scenario(path: Option<&PathBuf>) -> Result<ScenarioConfig> {
	match path {
		Some(path) => {
			let text = fs::read_to_string(path)
				.with_context(|| format!("reading scenario {}", path.display()))?;
			let scenario = ScenarioConfig::from_yaml(&text)
				.with_context(|| format!("parsing scenario {}", path.display()))?;
			Ok(scenario)
		}
		None => Ok(ScenarioConfig::reference()),
	}
}

fn main() -> Result<()> {
	let args = Args::parse();
	let level: log::LevelFilter = args
		.log_level
		.parse()
		.map_err(|e| anyhow!("log level {:?}: {}", args.log_level, e))?;
	setup_logging(level)?;

	let scenario = load_scenario(args.scenario.as_ref())?;
	debug!("{:?}", scenario);
	let gravity = scenario.gravity();
	let mut simulation = scenario.build()?;
	let steps = args.steps.unwrap_or(scenario.parameters.steps);

	info!("running {} steps", steps);
	let start_time = std::time::Instant::now();
	for _ in 0..steps {
		simulation.step();
		let step = simulation.end_step();
		if args.report_every > 0 && step % args.report_every == 0 {
			info!("{}", report::summary(&simulation, &gravity, step));
		}
	}
	info!("finished in {:?}", start_time.elapsed());

	for line in report::bodies(simulation.latest_view()) {
		println!("{}", line);
	}
	Ok(())
}
