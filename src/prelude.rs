pub use nalgebra as na;

pub type Scalar = f64;
pub type Step = usize;

pub type Vector = na::Vector2<Scalar>;

pub use crate::{
	attributes::{Extent, Mass, Massive, Mergeable},
	body::{Body, BodyId, BodyInit},
	collision::{Accretion, CollisionModel, Merger},
	error::SimError,
	forces::{ForceModel, Gravity},
	view::{At, SimulationView, Snapshot},
	Simulation, SimulationBuilder,
};
