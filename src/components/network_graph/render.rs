//! Canvas 2d drawing of the styled, positioned graph.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{SceneState, ViewTransform};

/// Default surface background, matching the page container.
pub const BACKGROUND_COLOR: &str = "#f0f0f0";

/// Which visual layers to draw; shared with snapshot export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderLayers {
	pub edges: bool,
	pub nodes: bool,
	pub edge_labels: bool,
	pub node_labels: bool,
}

impl Default for RenderLayers {
	fn default() -> Self {
		Self {
			edges: true,
			nodes: true,
			edge_labels: false,
			node_labels: true,
		}
	}
}

/// Draw the live view with the scene's own camera and extents.
pub fn render(state: &SceneState, ctx: &CanvasRenderingContext2d) {
	render_with(
		state,
		ctx,
		state.width,
		state.height,
		BACKGROUND_COLOR,
		&state.transform,
		&RenderLayers::default(),
	);
}

/// Draw onto an arbitrary surface; snapshot export reuses this with its
/// own camera, background and layer selection.
pub fn render_with(
	state: &SceneState,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
	background: &str,
	transform: &ViewTransform,
	layers: &RenderLayers,
) {
	ctx.set_fill_style_str(background);
	ctx.fill_rect(0.0, 0.0, width, height);
	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);

	if layers.edges {
		draw_edges(state, ctx, transform.k);
	}
	if layers.edge_labels {
		draw_edge_labels(state, ctx, transform.k);
	}
	if layers.nodes {
		draw_nodes(state, ctx, transform.k);
	}
	if layers.node_labels {
		draw_node_labels(state, ctx, transform.k);
	}

	ctx.restore();
}

fn draw_edges(state: &SceneState, ctx: &CanvasRenderingContext2d, k: f64) {
	ctx.set_stroke_style_str("rgba(90, 90, 110, 0.5)");
	ctx.set_line_width(1.5 / k);
	for edge in state.graph.edges() {
		let (a, b) = (state.graph.node(edge.a), state.graph.node(edge.b));
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

fn draw_edge_labels(state: &SceneState, ctx: &CanvasRenderingContext2d, k: f64) {
	ctx.set_fill_style_str("rgba(60, 60, 80, 0.8)");
	ctx.set_font(&format!("{}px sans-serif", 9.0 / k.max(0.5)));
	for edge in state.graph.edges() {
		let (a, b) = (state.graph.node(edge.a), state.graph.node(edge.b));
		let (mx, my) = ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
		let _ = ctx.fill_text(&edge.weight.to_string(), mx, my);
	}
}

fn draw_nodes(state: &SceneState, ctx: &CanvasRenderingContext2d, k: f64) {
	for node in state.graph.nodes() {
		if node.hidden {
			continue;
		}
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.size, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.color);
		ctx.fill();

		if node.highlighted {
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, node.size + 3.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(30, 30, 30, 0.9)");
			ctx.set_line_width(2.0 / k);
			ctx.stroke();
		}
	}
}

fn draw_node_labels(state: &SceneState, ctx: &CanvasRenderingContext2d, k: f64) {
	ctx.set_fill_style_str("rgba(30, 30, 30, 0.9)");
	ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
	for node in state.graph.nodes() {
		if node.hidden {
			continue;
		}
		let _ = ctx.fill_text(&node.label, node.x + node.size + 3.0, node.y + 3.0);
	}
}
