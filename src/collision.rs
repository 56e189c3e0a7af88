//! Collision detection and merge resolution.
//!
//! Detection pairs every active body `i` with each lower-indexed active body
//! `j < i` in contact with it, and groups the partners by primary `i`. Groups
//! are not closed transitively: a body touching two higher-indexed bodies is
//! merged into each of them independently.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::prelude::*;

/// Outcome of a merge: the state of the body that replaces the colliders.
#[derive(Debug, Clone, PartialEq)]
pub struct Merger<A> {
	pub attributes: A,
	pub position: Vector,
	pub velocity: Vector,
}

impl<A> From<Merger<A>> for BodyInit<A> {
	fn from(merger: Merger<A>) -> Self {
		BodyInit::new(merger.attributes, merger.position, merger.velocity)
	}
}

pub trait CollisionModel<A> {
	/// Whether two active bodies collide at `step`.
	fn in_contact(&self, first: &Body<A>, second: &Body<A>, step: Step) -> bool;

	/// Replacement for `bodies[primary]` and all of `partners` at `step`, or
	/// `None` if the colliders leave nothing behind. Never called with an
	/// empty partner list.
	fn merge(
		&self,
		primary: usize,
		partners: &[usize],
		step: Step,
		bodies: &[Body<A>],
	) -> Option<Merger<A>>;
}

/// Perfectly inelastic merging.
///
/// Mass and linear momentum are conserved exactly; the radius conserves
/// area, `r' = sqrt(Σ r²)`; the position is the center of mass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accretion;

impl<A: Mergeable> CollisionModel<A> for Accretion {
	fn in_contact(&self, first: &Body<A>, second: &Body<A>, step: Step) -> bool {
		first.touches(second, step)
	}

	fn merge(
		&self,
		primary: usize,
		partners: &[usize],
		step: Step,
		bodies: &[Body<A>],
	) -> Option<Merger<A>> {
		assert!(!partners.is_empty(), "merge of body {} without partners", primary);

		let members = std::iter::once(primary).chain(partners.iter().copied()).map(|k| {
			let body = &bodies[k];
			match (body.position_at(step), body.velocity_at(step)) {
				(Some(p), Some(v)) => (body.attributes(), p, v),
				_ => panic!("{:?} has no recorded state at step {}", body.id(), step),
			}
		});

		let mut mass: Scalar = 0.0;
		let mut area: Scalar = 0.0;
		let mut weighted_position = Vector::zeros();
		let mut momentum = Vector::zeros();
		for (attributes, p, v) in members {
			let m = attributes.mass();
			mass += m;
			area += attributes.radius() * attributes.radius();
			weighted_position += p * m;
			momentum += v * m;
		}
		assert!(mass > 0.0, "merge at step {} has non-positive total mass {}", step, mass);

		Some(Merger {
			attributes: A::merged(mass, area.sqrt()),
			position: weighted_position / mass,
			velocity: momentum / mass,
		})
	}
}

/// Partners of each primary index among the bodies active at `step`.
pub fn detect<A, C>(
	model: &C,
	step: Step,
	bodies: &[Body<A>],
) -> BTreeMap<usize, Vec<usize>>
where
	C: CollisionModel<A> + ?Sized,
{
	let mut collisions: BTreeMap<usize, Vec<usize>> = BTreeMap::new();

	for (i, first) in bodies.iter().enumerate() {
		if !first.is_active(step) {
			continue;
		}
		for (j, second) in bodies[..i].iter().enumerate() {
			if second.is_active(step) && model.in_contact(first, second, step) {
				collisions.entry(i).or_default().push(j);
			}
		}
	}

	collisions
}

/// Detects collisions at `step` and applies the merges: every collider is
/// destroyed at `step` and each merger becomes a new body created at `step`.
/// Returns the number of merge groups.
pub(crate) fn resolve<A, C>(
	model: &C,
	step: Step,
	bodies: &mut Vec<Body<A>>,
	next_id: &mut u32,
) -> usize
where
	C: CollisionModel<A> + ?Sized,
{
	let (collisions, mergers) = {
		let snapshot: &[Body<A>] = bodies;
		let collisions = detect(model, step, snapshot);
		// All mergers read the pre-collision state.
		let mergers: Vec<_> = collisions
			.iter()
			.map(|(&primary, partners)| (primary, model.merge(primary, partners, step, snapshot)))
			.collect();
		(collisions, mergers)
	};
	if collisions.is_empty() {
		return 0;
	}

	let destroyed: BTreeSet<usize> = collisions
		.iter()
		.flat_map(|(&primary, partners)| std::iter::once(primary).chain(partners.iter().copied()))
		.collect();
	for &k in &destroyed {
		bodies[k].destroy(step);
	}

	for (primary, merger) in mergers {
		let partner_ids: Vec<BodyId> = collisions[&primary].iter().map(|&k| bodies[k].id()).collect();
		match merger {
			Some(merger) => {
				let id = BodyId(*next_id);
				*next_id += 1;
				debug!(
					"step {}: {:?} merged with {:?} into {:?}",
					step,
					bodies[primary].id(),
					partner_ids,
					id
				);
				bodies.push(Body::new(id, step, merger.into()));
			}
			None => debug!(
				"step {}: {:?} and {:?} destroyed without remnant",
				step,
				bodies[primary].id(),
				partner_ids
			),
		}
	}

	collisions.len()
}
