//! Pointer-driven drag/click state machine.
//!
//! A pointer-down on a node starts a drag; on release the gesture is
//! classified by its end-to-end screen displacement. Node navigation is
//! two independent affordances: single click opens the node's page URL
//! (only after a click-classified gesture), double click opens its
//! resource URL regardless of classification.

use super::graph::Graph;

/// Screen-space displacement below which a gesture counts as a click,
/// checked independently on both axes.
pub const CLICK_DELTA: f64 = 6.0;

/// Classification of a completed pointer-down/up pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
	Click,
	Drag,
}

/// Drag/click state: `Idle` or `Dragging(node)`.
pub struct InteractionController {
	dragging: Option<usize>,
	start: (f64, f64),
	allow_click: bool,
}

impl Default for InteractionController {
	fn default() -> Self {
		Self::new()
	}
}

impl InteractionController {
	pub fn new() -> Self {
		Self {
			dragging: None,
			start: (0.0, 0.0),
			allow_click: true,
		}
	}

	pub fn dragging(&self) -> Option<usize> {
		self.dragging
	}

	pub fn is_dragging(&self) -> bool {
		self.dragging.is_some()
	}

	/// Pointer pressed at screen coordinates, possibly over a node.
	/// Returns whether a drag started; the surface must suppress its
	/// default camera pan for the duration.
	pub fn pointer_down(
		&mut self,
		graph: &mut Graph,
		node: Option<usize>,
		sx: f64,
		sy: f64,
	) -> bool {
		self.start = (sx, sy);
		let Some(node) = node else {
			return false;
		};
		self.dragging = Some(node);
		graph.node_mut(node).highlighted = true;
		true
	}

	/// Pointer moved to graph-space coordinates. Overwrites the dragged
	/// node's position and returns its index so the caller can keep a
	/// running simulation pinned.
	pub fn pointer_move(&mut self, graph: &mut Graph, gx: f64, gy: f64) -> Option<usize> {
		let node = self.dragging?;
		let n = graph.node_mut(node);
		n.x = gx;
		n.y = gy;
		Some(node)
	}

	/// Pointer released at screen coordinates. Clears the highlight and
	/// classifies the gesture; `None` when no drag was in progress.
	pub fn pointer_up(&mut self, graph: &mut Graph, sx: f64, sy: f64) -> Option<Gesture> {
		let node = self.dragging.take()?;
		graph.node_mut(node).highlighted = false;

		let (dx, dy) = ((sx - self.start.0).abs(), (sy - self.start.1).abs());
		self.allow_click = dx < CLICK_DELTA && dy < CLICK_DELTA;
		Some(if self.allow_click {
			Gesture::Click
		} else {
			Gesture::Drag
		})
	}

	/// Abort any drag in progress, e.g. when the pointer leaves the
	/// surface.
	pub fn reset(&mut self, graph: &mut Graph) {
		if let Some(node) = self.dragging.take() {
			graph.node_mut(node).highlighted = false;
		}
	}

	/// URL to open for a single click on the node. `None` when the
	/// preceding gesture was a drag, the node is hidden, or it carries
	/// no page URL.
	pub fn click_url<'a>(&self, graph: &'a Graph, node: usize) -> Option<&'a str> {
		if !self.allow_click || graph.node(node).hidden {
			return None;
		}
		graph.node(node).page_url.as_deref()
	}

	/// URL to open for a double click, independent of drag/click
	/// classification. `None` when the node has no resource URL.
	pub fn double_click_url(graph: &Graph, node: usize) -> Option<&str> {
		graph.node(node).resource_url.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::super::graph::build_graph;
	use super::*;

	fn pair() -> Graph {
		let rows = vec![vec![
			"<http://example.org/a>".to_string(),
			"<http://example.org/b>".to_string(),
		]];
		let headers: Vec<String> = ["L", "R"].iter().map(|h| h.to_string()).collect();
		let selected: HashSet<String> = headers.iter().cloned().collect();
		build_graph(&rows, &headers, &selected)
	}

	#[test]
	fn small_displacement_classifies_as_click() {
		let mut graph = pair();
		let mut ctl = InteractionController::new();

		assert!(ctl.pointer_down(&mut graph, Some(0), 100.0, 100.0));
		assert!(graph.node(0).highlighted);
		let gesture = ctl.pointer_up(&mut graph, 105.9, 94.1);
		assert_eq!(gesture, Some(Gesture::Click));
		assert!(!graph.node(0).highlighted);
	}

	#[test]
	fn threshold_on_either_axis_classifies_as_drag() {
		let mut graph = pair();
		let mut ctl = InteractionController::new();

		ctl.pointer_down(&mut graph, Some(0), 100.0, 100.0);
		assert_eq!(
			ctl.pointer_up(&mut graph, 106.0, 100.0),
			Some(Gesture::Drag)
		);

		ctl.pointer_down(&mut graph, Some(0), 100.0, 100.0);
		assert_eq!(
			ctl.pointer_up(&mut graph, 100.0, 93.0),
			Some(Gesture::Drag)
		);
	}

	#[test]
	fn move_overwrites_dragged_node_position() {
		let mut graph = pair();
		let mut ctl = InteractionController::new();

		ctl.pointer_down(&mut graph, Some(1), 0.0, 0.0);
		assert_eq!(ctl.pointer_move(&mut graph, 33.0, -7.5), Some(1));
		assert_eq!(graph.node(1).x, 33.0);
		assert_eq!(graph.node(1).y, -7.5);
	}

	#[test]
	fn move_without_drag_does_nothing() {
		let mut graph = pair();
		let mut ctl = InteractionController::new();
		assert_eq!(ctl.pointer_move(&mut graph, 1.0, 2.0), None);
		assert_eq!(ctl.pointer_up(&mut graph, 0.0, 0.0), None);
	}

	#[test]
	fn down_on_background_leaves_pan_to_the_surface() {
		let mut graph = pair();
		let mut ctl = InteractionController::new();
		assert!(!ctl.pointer_down(&mut graph, None, 5.0, 5.0));
		assert!(!ctl.is_dragging());
	}

	#[test]
	fn click_honored_only_after_click_classified_gesture() {
		let mut graph = pair();
		graph.node_mut(0).page_url = Some("http://example.org/page".to_string());
		let mut ctl = InteractionController::new();

		ctl.pointer_down(&mut graph, Some(0), 0.0, 0.0);
		ctl.pointer_up(&mut graph, 50.0, 0.0);
		assert_eq!(ctl.click_url(&graph, 0), None);

		ctl.pointer_down(&mut graph, Some(0), 0.0, 0.0);
		ctl.pointer_up(&mut graph, 1.0, 1.0);
		assert_eq!(ctl.click_url(&graph, 0), Some("http://example.org/page"));
	}

	#[test]
	fn click_on_hidden_or_url_less_node_is_a_noop() {
		let mut graph = pair();
		let ctl = InteractionController::new();
		assert_eq!(ctl.click_url(&graph, 0), None);

		graph.node_mut(0).page_url = Some("http://example.org/p".to_string());
		graph.node_mut(0).hidden = true;
		assert_eq!(ctl.click_url(&graph, 0), None);
	}

	#[test]
	fn double_click_uses_resource_url_regardless_of_gesture() {
		let mut graph = pair();
		let mut ctl = InteractionController::new();

		ctl.pointer_down(&mut graph, Some(0), 0.0, 0.0);
		ctl.pointer_up(&mut graph, 50.0, 50.0);

		assert_eq!(
			InteractionController::double_click_url(&graph, 0),
			Some("http://example.org/a")
		);

		graph.node_mut(0).resource_url = None;
		assert_eq!(InteractionController::double_click_url(&graph, 0), None);
	}

	#[test]
	fn reset_aborts_drag_and_clears_highlight() {
		let mut graph = pair();
		let mut ctl = InteractionController::new();

		ctl.pointer_down(&mut graph, Some(0), 0.0, 0.0);
		ctl.reset(&mut graph);
		assert!(!ctl.is_dragging());
		assert!(!graph.node(0).highlighted);
	}
}
