//! Shared scene state for the canvas: the styled graph, the layout
//! engine, the interaction controller and the camera.

use super::graph::Graph;
use super::interaction::InteractionController;
use super::layout::LayoutEngine;

/// Smallest world-space hit radius, so low-degree nodes stay clickable.
pub const HIT_RADIUS: f64 = 12.0;

/// Camera: screen translation plus zoom factor.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

/// Background drag state for the surface's default camera pan.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Everything the frame loop and the event handlers share. All position
/// writes funnel through this one value.
pub struct SceneState {
	pub graph: Graph,
	pub layout: LayoutEngine,
	pub interaction: InteractionController,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
}

impl SceneState {
	/// Wrap an already styled and seeded graph, with the camera
	/// centered on the canvas.
	pub fn new(graph: Graph, width: f64, height: f64) -> Self {
		Self {
			graph,
			layout: LayoutEngine::new(),
			interaction: InteractionController::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			pan: PanState::default(),
			width,
			height,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under the screen position, using the node's drawn
	/// size (with a floor) as hit radius.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		for (idx, node) in self.graph.nodes().iter().enumerate() {
			let (dx, dy) = (node.x - gx, node.y - gy);
			if (dx * dx + dy * dy).sqrt() < node.size.max(HIT_RADIUS) {
				found = Some(idx);
			}
		}
		found
	}

	/// Advance the active layout by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		self.layout.tick(&mut self.graph, dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::super::graph::build_graph;
	use super::super::layout::LayoutEngine;
	use super::*;

	fn scene() -> SceneState {
		let rows = vec![vec!["<A>".to_string(), "<B>".to_string()]];
		let headers: Vec<String> = ["L", "R"].iter().map(|h| h.to_string()).collect();
		let selected: HashSet<String> = headers.iter().cloned().collect();
		let mut graph = build_graph(&rows, &headers, &selected);
		LayoutEngine::seed_circular(&mut graph);
		SceneState::new(graph, 800.0, 600.0)
	}

	#[test]
	fn screen_to_graph_inverts_the_camera() {
		let mut s = scene();
		s.transform.k = 2.0;
		let (gx, gy) = s.screen_to_graph(500.0, 400.0);
		assert_eq!(gx, (500.0 - 400.0) / 2.0);
		assert_eq!(gy, (400.0 - 300.0) / 2.0);
	}

	#[test]
	fn hit_test_finds_node_under_the_pointer() {
		let s = scene();
		let node = &s.graph.nodes()[0];
		let sx = node.x * s.transform.k + s.transform.x;
		let sy = node.y * s.transform.k + s.transform.y;
		assert_eq!(s.node_at_position(sx, sy), Some(0));
		assert_eq!(s.node_at_position(sx + 500.0, sy + 500.0), None);
	}
}
