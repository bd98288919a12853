//! Graph model and construction from parsed table rows.
//!
//! Node identity is the cell value with its enclosing angle brackets
//! stripped; the column a value came from becomes the node's category.

use std::collections::{HashMap, HashSet, VecDeque};

/// A single entity in the diagram.
#[derive(Clone, Debug)]
pub struct Node {
	/// Unique identity within the graph.
	pub key: String,
	pub label: String,
	/// Source column name, fixed at creation.
	pub category: String,
	/// Full URL for double-click navigation; absent for literal values.
	pub resource_url: Option<String>,
	/// Optional single-click navigation target.
	pub page_url: Option<String>,
	pub x: f64,
	pub y: f64,
	pub color: String,
	pub size: f64,
	pub highlighted: bool,
	pub hidden: bool,
}

/// Unordered pair of node indices. `a < b` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	pub a: usize,
	pub b: usize,
	pub weight: u32,
}

/// Node/edge store with identity-based deduplication.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	index: HashMap<String, usize>,
	edge_set: HashSet<(usize, usize)>,
}

impl Graph {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn nodes_mut(&mut self) -> &mut [Node] {
		&mut self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, idx: usize) -> &Node {
		&self.nodes[idx]
	}

	pub fn node_mut(&mut self, idx: usize) -> &mut Node {
		&mut self.nodes[idx]
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node_index(&self, key: &str) -> Option<usize> {
		self.index.get(key).copied()
	}

	/// Insert a node, keeping the existing one untouched if the key is
	/// already present. Returns the node's index either way.
	pub fn add_node(&mut self, node: Node) -> usize {
		if let Some(&idx) = self.index.get(&node.key) {
			return idx;
		}
		let idx = self.nodes.len();
		self.index.insert(node.key.clone(), idx);
		self.nodes.push(node);
		idx
	}

	/// Insert an edge between two existing nodes. Self-loops and
	/// duplicate unordered pairs are rejected; returns whether an edge
	/// was actually added. Weight stays fixed at 1 on repeats.
	pub fn add_edge(&mut self, a: usize, b: usize) -> bool {
		if a == b {
			return false;
		}
		let pair = (a.min(b), a.max(b));
		if !self.edge_set.insert(pair) {
			return false;
		}
		self.edges.push(Edge {
			a: pair.0,
			b: pair.1,
			weight: 1,
		});
		true
	}

	/// Number of edges incident to the node, computed from the edge set.
	pub fn degree(&self, idx: usize) -> usize {
		self.edges
			.iter()
			.filter(|e| e.a == idx || e.b == idx)
			.count()
	}

	/// Reduce the graph to its largest connected component, discarding
	/// every node and edge outside it. Destructive and irreversible
	/// within this graph instance.
	pub fn crop_to_largest_component(&mut self) {
		if self.nodes.is_empty() {
			return;
		}

		let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
		for edge in &self.edges {
			adjacency[edge.a].push(edge.b);
			adjacency[edge.b].push(edge.a);
		}

		let mut component = vec![usize::MAX; self.nodes.len()];
		let mut sizes = Vec::new();
		for start in 0..self.nodes.len() {
			if component[start] != usize::MAX {
				continue;
			}
			let id = sizes.len();
			let mut size = 0usize;
			let mut queue = VecDeque::from([start]);
			component[start] = id;
			while let Some(n) = queue.pop_front() {
				size += 1;
				for &m in &adjacency[n] {
					if component[m] == usize::MAX {
						component[m] = id;
						queue.push_back(m);
					}
				}
			}
			sizes.push(size);
		}

		let largest = sizes
			.iter()
			.enumerate()
			.max_by_key(|&(id, &size)| (size, std::cmp::Reverse(id)))
			.map(|(id, _)| id)
			.unwrap_or(0);

		let mut remap = vec![usize::MAX; self.nodes.len()];
		let mut kept = Vec::new();
		for (idx, node) in self.nodes.drain(..).enumerate() {
			if component[idx] == largest {
				remap[idx] = kept.len();
				kept.push(node);
			}
		}

		self.nodes = kept;
		self.index = self
			.nodes
			.iter()
			.enumerate()
			.map(|(idx, node)| (node.key.clone(), idx))
			.collect();
		self.edges.retain_mut(|edge| {
			if remap[edge.a] == usize::MAX {
				return false;
			}
			edge.a = remap[edge.a];
			edge.b = remap[edge.b];
			true
		});
		self.edge_set = self.edges.iter().map(|e| (e.a, e.b)).collect();
	}
}

/// Strip one leading `<` and one trailing `>` from a raw cell value.
fn strip_brackets(value: &str) -> &str {
	let value = value.strip_prefix('<').unwrap_or(value);
	value.strip_suffix('>').unwrap_or(value)
}

/// First non-empty substring between double quotes, if any.
fn quoted_literal(value: &str) -> Option<&str> {
	let mut rest = value;
	loop {
		let open = rest.find('"')?;
		let body = &rest[open + 1..];
		let close = body.find('"')?;
		if close > 0 {
			return Some(&body[..close]);
		}
		rest = body;
	}
}

fn derive_node(key: &str, category: &str) -> Node {
	let (label, resource_url) = if key.contains("XMLSchema") {
		// Schema-typed literal: label is the quoted lexical form, and
		// there is nothing to navigate to.
		(quoted_literal(key).unwrap_or(key).to_owned(), None)
	} else {
		// URL-shaped value: label is the last path segment.
		let segment = key.rsplit('/').next().unwrap_or(key);
		let label = if segment.is_empty() { key } else { segment };
		(label.to_owned(), Some(key.to_owned()))
	};

	Node {
		key: key.to_owned(),
		label,
		category: category.to_owned(),
		resource_url,
		page_url: None,
		x: 0.0,
		y: 0.0,
		color: String::new(),
		size: 0.0,
		highlighted: false,
		hidden: false,
	}
}

/// Build a graph from table rows under the given category selection.
///
/// Per row, each selected column with a non-empty cell contributes one
/// node (insertion is idempotent across rows), and every unordered pair
/// of distinct identities present in the graph contributes one edge,
/// deduplicated against the whole graph.
pub fn build_graph(
	rows: &[Vec<String>],
	headers: &[String],
	selected: &HashSet<String>,
) -> Graph {
	let mut graph = Graph::new();

	for row in rows {
		// One identity candidate per column; empty and missing trailing
		// cells contribute nothing.
		let keys: Vec<Option<&str>> = (0..headers.len())
			.map(|i| {
				row.get(i)
					.map(|cell| strip_brackets(cell))
					.filter(|key| !key.is_empty())
			})
			.collect();

		for (key, header) in keys.iter().zip(headers) {
			let Some(key) = key else { continue };
			if selected.contains(header) {
				graph.add_node(derive_node(key, header));
			}
		}

		for i in 0..keys.len() {
			for j in (i + 1)..keys.len() {
				let (Some(a), Some(b)) = (keys[i], keys[j]) else {
					continue;
				};
				if a == b {
					continue;
				}
				if let (Some(ai), Some(bi)) = (graph.node_index(a), graph.node_index(b)) {
					graph.add_edge(ai, bi);
				}
			}
		}
	}

	graph
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
		raw.iter()
			.map(|r| r.iter().map(|c| c.to_string()).collect())
			.collect()
	}

	fn headers(raw: &[&str]) -> Vec<String> {
		raw.iter().map(|h| h.to_string()).collect()
	}

	fn selection(raw: &[&str]) -> HashSet<String> {
		raw.iter().map(|h| h.to_string()).collect()
	}

	#[test]
	fn builds_nodes_and_edge_from_selected_columns_only() {
		let graph = build_graph(
			&rows(&[&["<A>", "<knows>", "<B>"]]),
			&headers(&["Subject", "Predicate", "Object"]),
			&selection(&["Subject", "Object"]),
		);

		assert_eq!(graph.node_count(), 2);
		assert_eq!(graph.edge_count(), 1);
		let a = graph.node_index("A").unwrap();
		let b = graph.node_index("B").unwrap();
		assert_eq!(graph.node(a).category, "Subject");
		assert_eq!(graph.node(b).category, "Object");
		assert!(graph.node_index("knows").is_none());
	}

	#[test]
	fn repeated_pair_keeps_single_edge_with_weight_one() {
		let graph = build_graph(
			&rows(&[&["<A>", "<p>", "<B>"], &["<A>", "<q>", "<B>"]]),
			&headers(&["Subject", "Predicate", "Object"]),
			&selection(&["Subject", "Object"]),
		);

		assert_eq!(graph.node_count(), 2);
		assert_eq!(graph.edge_count(), 1);
		assert_eq!(graph.edges()[0].weight, 1);
	}

	#[test]
	fn no_self_loops_or_duplicate_pairs() {
		let graph = build_graph(
			&rows(&[&["<A>", "<A>"], &["<A>", "<B>"], &["<B>", "<A>"]]),
			&headers(&["Left", "Right"]),
			&selection(&["Left", "Right"]),
		);

		assert_eq!(graph.node_count(), 2);
		assert_eq!(graph.edge_count(), 1);
		for edge in graph.edges() {
			assert_ne!(edge.a, edge.b);
		}
	}

	#[test]
	fn node_insertion_is_idempotent_and_keeps_first_category() {
		let graph = build_graph(
			&rows(&[&["<A>", "<B>"], &["<B>", "<A>"]]),
			&headers(&["Left", "Right"]),
			&selection(&["Left", "Right"]),
		);

		assert_eq!(graph.node_count(), 2);
		let a = graph.node_index("A").unwrap();
		assert_eq!(graph.node(a).category, "Left");
	}

	#[test]
	fn empty_and_missing_cells_contribute_nothing() {
		let graph = build_graph(
			&rows(&[&["<A>", "", "<B>"], &["<C>"]]),
			&headers(&["Subject", "Predicate", "Object"]),
			&selection(&["Subject", "Predicate", "Object"]),
		);

		assert_eq!(graph.node_count(), 3);
		assert_eq!(graph.edge_count(), 1);
	}

	#[test]
	fn url_value_gets_last_segment_label_and_resource_url() {
		let graph = build_graph(
			&rows(&[&["<http://example.org/people/alice>", "<http://example.org/b>"]]),
			&headers(&["S", "O"]),
			&selection(&["S", "O"]),
		);

		let idx = graph.node_index("http://example.org/people/alice").unwrap();
		let node = graph.node(idx);
		assert_eq!(node.label, "alice");
		assert_eq!(
			node.resource_url.as_deref(),
			Some("http://example.org/people/alice")
		);
	}

	#[test]
	fn schema_literal_gets_quoted_label_and_no_resource_url() {
		let raw = "\"42\"^^<http://www.w3.org/2001/XMLSchema#integer>";
		let graph = build_graph(
			&rows(&[&["<A>", raw]]),
			&headers(&["S", "O"]),
			&selection(&["S", "O"]),
		);

		let key = "\"42\"^^<http://www.w3.org/2001/XMLSchema#integer";
		let idx = graph.node_index(key).unwrap();
		let node = graph.node(idx);
		assert_eq!(node.label, "42");
		assert!(node.resource_url.is_none());
	}

	#[test]
	fn value_without_slash_labels_as_itself() {
		let graph = build_graph(
			&rows(&[&["plain", "<other>"]]),
			&headers(&["S", "O"]),
			&selection(&["S", "O"]),
		);

		let idx = graph.node_index("plain").unwrap();
		assert_eq!(graph.node(idx).label, "plain");
	}

	#[test]
	fn degree_counts_incident_edges() {
		let graph = build_graph(
			&rows(&[&["<A>", "<B>"], &["<A>", "<C>"], &["<B>", "<C>"]]),
			&headers(&["L", "R"]),
			&selection(&["L", "R"]),
		);

		for idx in 0..graph.node_count() {
			let by_hand = graph
				.edges()
				.iter()
				.filter(|e| e.a == idx || e.b == idx)
				.count();
			assert_eq!(graph.degree(idx), by_hand);
			assert_eq!(graph.degree(idx), 2);
		}
	}

	#[test]
	fn crop_keeps_only_largest_component() {
		let mut graph = build_graph(
			&rows(&[
				&["<A>", "<B>"],
				&["<B>", "<C>"],
				&["<X>", "<Y>"],
			]),
			&headers(&["L", "R"]),
			&selection(&["L", "R"]),
		);

		graph.crop_to_largest_component();
		assert_eq!(graph.node_count(), 3);
		assert_eq!(graph.edge_count(), 2);
		assert!(graph.node_index("X").is_none());
		assert!(graph.node_index("A").is_some());

		// Indices must stay consistent after the rebuild.
		for edge in graph.edges() {
			assert!(edge.a < graph.node_count());
			assert!(edge.b < graph.node_count());
		}
	}

	#[test]
	fn crop_of_empty_graph_is_a_noop() {
		let mut graph = Graph::new();
		graph.crop_to_largest_component();
		assert!(graph.is_empty());
	}
}
