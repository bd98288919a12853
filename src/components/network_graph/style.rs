//! Visual encoding: category color assignment and degree-based sizing.

use super::graph::Graph;

const PALETTE: &[&str] = &[
	"#FA5A3D", "#5A75DB", "#FFD700", "#8A2BE2", "#00A676", "#FF6F61",
];

/// Color for categories that are not part of the header list.
const FALLBACK_COLOR: &str = "#000000";

pub const MIN_SIZE: f64 = 5.0;
pub const MAX_SIZE: f64 = 20.0;

/// Deterministic palette assignment, indexed by the category's position
/// in the header list modulo palette length. Collisions are expected
/// when categories outnumber palette entries.
pub fn color_of(category: &str, headers: &[String]) -> &'static str {
	headers
		.iter()
		.position(|h| h == category)
		.map(|i| PALETTE[i % PALETTE.len()])
		.unwrap_or(FALLBACK_COLOR)
}

/// Linear min-max normalization of degree into `[MIN_SIZE, MAX_SIZE]`.
/// When every node shares the same degree all sizes collapse to
/// `MIN_SIZE`, keeping the mapping total and deterministic.
fn size_of(degree: usize, min_degree: usize, max_degree: usize) -> f64 {
	if max_degree == min_degree {
		return MIN_SIZE;
	}
	let t = (degree - min_degree) as f64 / (max_degree - min_degree) as f64;
	MIN_SIZE + t * (MAX_SIZE - MIN_SIZE)
}

/// Assign `color` and `size` to every node in place.
pub fn apply_styles(graph: &mut Graph, headers: &[String]) {
	let mut degrees = vec![0usize; graph.node_count()];
	for edge in graph.edges() {
		degrees[edge.a] += 1;
		degrees[edge.b] += 1;
	}
	let min_degree = degrees.iter().copied().min().unwrap_or(0);
	let max_degree = degrees.iter().copied().max().unwrap_or(0);

	for (idx, node) in graph.nodes_mut().iter_mut().enumerate() {
		node.color = color_of(&node.category, headers).to_owned();
		node.size = size_of(degrees[idx], min_degree, max_degree);
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::super::graph::build_graph;
	use super::*;

	fn headers(raw: &[&str]) -> Vec<String> {
		raw.iter().map(|h| h.to_string()).collect()
	}

	#[test]
	fn palette_wraps_around_by_header_position() {
		let hs = headers(&["a", "b", "c", "d", "e", "f", "g"]);
		assert_eq!(color_of("a", &hs), PALETTE[0]);
		assert_eq!(color_of("f", &hs), PALETTE[5]);
		// Seventh header reuses the first palette entry.
		assert_eq!(color_of("g", &hs), PALETTE[0]);
	}

	#[test]
	fn unknown_category_gets_fallback_color() {
		assert_eq!(color_of("nope", &headers(&["a", "b"])), FALLBACK_COLOR);
	}

	#[test]
	fn sizes_are_monotone_in_degree() {
		// Star around A: degree(A) = 3, leaves have degree 1.
		let rows: Vec<Vec<String>> = [["<A>", "<B>"], ["<A>", "<C>"], ["<A>", "<D>"]]
			.iter()
			.map(|r| r.iter().map(|c| c.to_string()).collect())
			.collect();
		let hs = headers(&["L", "R"]);
		let selected: HashSet<String> = hs.iter().cloned().collect();
		let mut graph = build_graph(&rows, &hs, &selected);
		apply_styles(&mut graph, &hs);

		let hub = graph.node_index("A").unwrap();
		let leaf = graph.node_index("B").unwrap();
		assert_eq!(graph.node(hub).size, MAX_SIZE);
		assert_eq!(graph.node(leaf).size, MIN_SIZE);
		assert!(graph.node(hub).size > graph.node(leaf).size);
	}

	#[test]
	fn equal_degrees_collapse_to_min_size() {
		let rows: Vec<Vec<String>> = [["<A>", "<B>"]]
			.iter()
			.map(|r| r.iter().map(|c| c.to_string()).collect())
			.collect();
		let hs = headers(&["L", "R"]);
		let selected: HashSet<String> = hs.iter().cloned().collect();
		let mut graph = build_graph(&rows, &hs, &selected);
		apply_styles(&mut graph, &hs);

		for node in graph.nodes() {
			assert_eq!(node.size, MIN_SIZE);
		}
	}

	#[test]
	fn midrange_degree_lands_between_bounds() {
		assert_eq!(size_of(0, 0, 2), MIN_SIZE);
		assert_eq!(size_of(1, 0, 2), (MIN_SIZE + MAX_SIZE) / 2.0);
		assert_eq!(size_of(2, 0, 2), MAX_SIZE);
	}
}
