//! Layout lifecycle: circular seeding, two animated layouts and the
//! force-directed simulation, all funneled through one state machine.
//!
//! Only the active phase may write node positions. Starting any layout
//! replaces the current phase wholesale, so a canceled animation or a
//! stopped simulation can never write again.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::graph::Graph;

/// Duration of the random/circular transitions, in seconds.
pub const ANIMATION_DURATION: f64 = 2.0;
/// Radius of the circular layout and of the initial seeding.
pub const CIRCLE_SCALE: f64 = 100.0;

/// Which animated layout is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
	Random,
	Circular,
}

/// User-triggered layout request, delivered to the canvas component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutCommand {
	ToggleForceDirected,
	Random,
	Circular,
}

struct Track {
	node: usize,
	from: (f64, f64),
	to: (f64, f64),
}

struct NodeAnimation {
	kind: AnimationKind,
	tracks: Vec<Track>,
	elapsed: f64,
}

/// A `force_graph` mirror of the graph, stepped from the frame loop.
/// Position updates flow back into the graph on every step.
struct ForceSim {
	sim: ForceGraph<usize, ()>,
	idx_of: HashMap<usize, DefaultNodeIdx>,
}

impl ForceSim {
	fn new(graph: &Graph) -> Self {
		let mut sim = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut idx_of = HashMap::new();

		for (i, node) in graph.nodes().iter().enumerate() {
			let idx = sim.add_node(NodeData {
				x: node.x as f32,
				y: node.y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: i,
			});
			idx_of.insert(i, idx);
		}
		for edge in graph.edges() {
			if let (Some(&a), Some(&b)) = (idx_of.get(&edge.a), idx_of.get(&edge.b)) {
				sim.add_edge(a, b, EdgeData::default());
			}
		}

		Self { sim, idx_of }
	}

	fn step(&mut self, graph: &mut Graph, dt: f32) {
		self.sim.update(dt);
		self.sim.visit_nodes(|node| {
			let target = graph.node_mut(node.data.user_data);
			target.x = node.x() as f64;
			target.y = node.y() as f64;
		});
	}

	/// Pin a dragged node so the simulation stops pushing it around.
	fn pin(&mut self, node: usize, x: f64, y: f64) {
		let Some(&idx) = self.idx_of.get(&node) else {
			return;
		};
		self.sim.visit_nodes_mut(|n| {
			if n.index() == idx {
				n.data.x = x as f32;
				n.data.y = y as f32;
				n.data.is_anchor = true;
			}
		});
	}
}

enum LayoutPhase {
	Idle,
	ForceDirected(ForceSim),
	Animating(NodeAnimation),
}

/// Owns the layout phase and is the single mutation entry point for
/// machine-driven position writes.
pub struct LayoutEngine {
	phase: LayoutPhase,
	rng: u64,
}

impl Default for LayoutEngine {
	fn default() -> Self {
		Self::new()
	}
}

impl LayoutEngine {
	pub fn new() -> Self {
		Self {
			phase: LayoutPhase::Idle,
			rng: 42,
		}
	}

	pub fn is_simulating(&self) -> bool {
		matches!(self.phase, LayoutPhase::ForceDirected(_))
	}

	pub fn animating_kind(&self) -> Option<AnimationKind> {
		match &self.phase {
			LayoutPhase::Animating(anim) => Some(anim.kind),
			_ => None,
		}
	}

	/// Drop whatever currently owns position writes. Safe to call when
	/// nothing is running.
	pub fn cancel(&mut self) {
		self.phase = LayoutPhase::Idle;
	}

	/// Evenly spaced initial placement so every node has a defined,
	/// non-overlapping position before any interaction.
	pub fn seed_circular(graph: &mut Graph) {
		let count = graph.node_count();
		for (i, node) in graph.nodes_mut().iter_mut().enumerate() {
			let (x, y) = circle_point(i, count);
			node.x = x;
			node.y = y;
		}
	}

	/// Start the simulation if stopped, stop it if running. Returns
	/// whether the simulation is running afterwards.
	pub fn toggle_force_directed(&mut self, graph: &Graph) -> bool {
		if self.is_simulating() {
			self.phase = LayoutPhase::Idle;
			return false;
		}
		// Replacing the phase also cancels any in-flight animation.
		self.phase = LayoutPhase::ForceDirected(ForceSim::new(graph));
		true
	}

	/// Animate every node to a uniformly random position inside the
	/// current bounding extents. Always cancels the running layout
	/// first; the most recent request wins.
	pub fn trigger_random(&mut self, graph: &Graph) {
		let Some((min, max)) = position_extents(graph) else {
			self.phase = LayoutPhase::Idle;
			return;
		};

		let tracks = graph
			.nodes()
			.iter()
			.enumerate()
			.map(|(i, node)| Track {
				node: i,
				from: (node.x, node.y),
				to: (
					min.0 + self.next_unit() * (max.0 - min.0),
					min.1 + self.next_unit() * (max.1 - min.1),
				),
			})
			.collect();

		self.phase = LayoutPhase::Animating(NodeAnimation {
			kind: AnimationKind::Random,
			tracks,
			elapsed: 0.0,
		});
	}

	/// Animate every node onto an evenly spaced circle of fixed scale.
	/// Always cancels the running layout first.
	pub fn trigger_circular(&mut self, graph: &Graph) {
		let count = graph.node_count();
		if count == 0 {
			self.phase = LayoutPhase::Idle;
			return;
		}

		let tracks = graph
			.nodes()
			.iter()
			.enumerate()
			.map(|(i, node)| Track {
				node: i,
				from: (node.x, node.y),
				to: circle_point(i, count),
			})
			.collect();

		self.phase = LayoutPhase::Animating(NodeAnimation {
			kind: AnimationKind::Circular,
			tracks,
			elapsed: 0.0,
		});
	}

	/// Keep the simulation's copy of a dragged node pinned under the
	/// pointer. No-op unless the simulation is running.
	pub fn sync_drag(&mut self, node: usize, x: f64, y: f64) {
		if let LayoutPhase::ForceDirected(sim) = &mut self.phase {
			sim.pin(node, x, y);
		}
	}

	/// Advance the active phase by `dt` seconds. Animations transition
	/// to idle on completion; the simulation runs until stopped.
	pub fn tick(&mut self, graph: &mut Graph, dt: f64) {
		let mut finished = false;
		match &mut self.phase {
			LayoutPhase::Idle => {}
			LayoutPhase::ForceDirected(sim) => sim.step(graph, dt as f32),
			LayoutPhase::Animating(anim) => {
				anim.elapsed += dt;
				let t = (anim.elapsed / ANIMATION_DURATION).min(1.0);
				let eased = ease(anim.kind, t);
				for track in &anim.tracks {
					let node = graph.node_mut(track.node);
					node.x = track.from.0 + (track.to.0 - track.from.0) * eased;
					node.y = track.from.1 + (track.to.1 - track.from.1) * eased;
				}
				finished = t >= 1.0;
			}
		}
		if finished {
			self.phase = LayoutPhase::Idle;
		}
	}

	/// Simple deterministic pseudo-random unit value.
	fn next_unit(&mut self) -> f64 {
		self.rng = (self.rng.wrapping_mul(9301).wrapping_add(49297)) % 233280;
		self.rng as f64 / 233280.0
	}
}

fn circle_point(i: usize, count: usize) -> (f64, f64) {
	let angle = i as f64 * 2.0 * PI / count.max(1) as f64;
	(CIRCLE_SCALE * angle.cos(), CIRCLE_SCALE * angle.sin())
}

/// Bounding extents of current positions, `None` on an empty graph.
fn position_extents(graph: &Graph) -> Option<((f64, f64), (f64, f64))> {
	let mut nodes = graph.nodes().iter();
	let first = nodes.next()?;
	let mut min = (first.x, first.y);
	let mut max = (first.x, first.y);
	for node in nodes {
		min.0 = min.0.min(node.x);
		min.1 = min.1.min(node.y);
		max.0 = max.0.max(node.x);
		max.1 = max.1.max(node.y);
	}
	Some((min, max))
}

fn ease(kind: AnimationKind, t: f64) -> f64 {
	match kind {
		AnimationKind::Circular => t,
		AnimationKind::Random => {
			// Quadratic in-out.
			if t < 0.5 {
				2.0 * t * t
			} else {
				1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
			}
		}
	}
}
