//! Tree and graph builders: turn normalized values into the two renderable
//! structures. The tree mirrors the raw hierarchy 1:1; the graph collapses
//! visually-identical terminal relationships for the overview rendering.

use std::collections::HashSet;

use crate::components::force_graph::{GraphData, GraphLink, GraphNode};
use crate::model::NormalizedValue;

/// One parent -> child edge between full-path node ids, carrying the child
/// record it was built from.
#[derive(Clone, Debug, PartialEq)]
pub struct TaxonomyLink {
	pub source: String,
	pub target: String,
	pub record: NormalizedValue,
}

/// A renderable set of taxonomy nodes and edges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaxonomyData {
	pub nodes: Vec<NormalizedValue>,
	pub links: Vec<TaxonomyLink>,
}

fn link_from(value: &NormalizedValue) -> TaxonomyLink {
	TaxonomyLink {
		source: value.parent_value.clone().unwrap_or_default(),
		target: value.value.clone(),
		record: value.clone(),
	}
}

/// Strict tree: one node per value (id = full path), one link per parented
/// record. No deduplication and no cycle detection; parent references are
/// server-guaranteed.
pub fn build_tree(values: &[NormalizedValue]) -> TaxonomyData {
	TaxonomyData {
		nodes: values.to_vec(),
		links: values
			.iter()
			.filter(|v| v.parent_value.is_some())
			.map(link_from)
			.collect(),
	}
}

/// Overview graph: same nodes as the tree, but links deduplicated on the
/// `(last_value, last_parent)` pair, first occurrence wins. Different full
/// paths ending in the same terminal relationship collapse to one edge.
/// Nodes sharing a `last_value` are intentionally not merged; links target
/// full-path ids and merging would orphan them.
pub fn build_graph(values: &[NormalizedValue]) -> TaxonomyData {
	let mut seen = HashSet::new();
	TaxonomyData {
		nodes: values.to_vec(),
		links: values
			.iter()
			.filter(|v| v.parent_value.is_some())
			.filter(|v| seen.insert((v.last_value.clone(), v.last_parent.clone())))
			.map(link_from)
			.collect(),
	}
}

/// Map taxonomy data to the canvas widget's input, applying the search-text
/// visibility filter to nodes and dropping links with a hidden endpoint.
/// Node size falls off with depth so roots render largest.
pub fn to_graph_data(data: &TaxonomyData, search: &str) -> GraphData {
	let nodes: Vec<GraphNode> = data
		.nodes
		.iter()
		.filter(|n| n.value.contains(search))
		.map(|n| GraphNode {
			id: n.value.clone(),
			label: Some(format!("{} ({})", n.name, n.content_type)),
			color: None,
			group: Some((n.level - 1) as u32),
			size: Some(50.0 / n.level as f64),
		})
		.collect();
	let visible: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let links = data
		.links
		.iter()
		.filter(|l| visible.contains(l.source.as_str()) && visible.contains(l.target.as_str()))
		.map(|l| GraphLink {
			source: l.source.clone(),
			target: l.target.clone(),
		})
		.collect();
	GraphData { nodes, links }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::LabelValueRecord;
	use crate::normalize::normalize_values;

	fn values(records: &[(&str, Option<&str>)]) -> Vec<NormalizedValue> {
		let records: Vec<LabelValueRecord> = records
			.iter()
			.map(|(value, parent)| LabelValueRecord {
				value: value.to_string(),
				parent_value: parent.map(str::to_owned),
				name: [("nb-NO".to_owned(), value.to_string())].into(),
			})
			.collect();
		normalize_values(&records, "nb-NO")
	}

	#[test]
	fn tree_keeps_every_parented_record_as_a_link() {
		// Two distinct branches with the same (lastValue, lastParent) tail.
		let vs = values(&[
			("a", None),
			("b", None),
			("a/x", Some("a")),
			("b/a", Some("b")),
			("b/a/x", Some("b/a")),
		]);
		let tree = build_tree(&vs);
		assert_eq!(tree.nodes.len(), 5);
		assert_eq!(tree.links.len(), 3);
		assert_eq!(tree.links[0].source, "a");
		assert_eq!(tree.links[0].target, "a/x");
	}

	#[test]
	fn graph_deduplicates_links_by_terminal_pair() {
		let vs = values(&[
			("a", None),
			("b", None),
			("a/x", Some("a")),
			("b/a", Some("b")),
			("b/a/x", Some("b/a")),
		]);
		let graph = build_graph(&vs);
		// Nodes are never merged, even with duplicate last segments.
		assert_eq!(graph.nodes.len(), 5);
		// "a/x" and "b/a/x" share ("x", "a"); the first occurrence wins.
		assert_eq!(graph.links.len(), 2);
		let targets: Vec<&str> = graph.links.iter().map(|l| l.target.as_str()).collect();
		assert_eq!(targets, ["a/x", "b/a"]);
	}

	#[test]
	fn two_record_hierarchy_builds_one_edge_in_both_views() {
		let vs = values(&[("a", None), ("a/b", Some("a"))]);

		let tree = build_tree(&vs);
		assert_eq!(tree.nodes.len(), 2);
		assert_eq!(tree.links.len(), 1);
		assert_eq!((tree.links[0].source.as_str(), tree.links[0].target.as_str()), ("a", "a/b"));

		let graph = build_graph(&vs);
		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.links.len(), 1);
		assert_eq!(graph.links[0].record.last_value, "b");
		assert_eq!(graph.links[0].record.last_parent.as_deref(), Some("a"));
	}

	#[test]
	fn search_filter_hides_nodes_and_their_links() {
		let vs = values(&[("a", None), ("a/b", Some("a")), ("c", None)]);
		let view = to_graph_data(&build_tree(&vs), "a");
		let ids: Vec<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["a", "a/b"]);
		assert_eq!(view.links.len(), 1);

		// Empty search shows everything.
		let view = to_graph_data(&build_tree(&vs), "");
		assert_eq!(view.nodes.len(), 3);
	}

	#[test]
	fn node_labels_carry_name_and_content_type() {
		let vs = values(&[("a", None), ("a/b", Some("a"))]);
		let view = to_graph_data(&build_tree(&vs), "");
		assert_eq!(view.nodes[0].label.as_deref(), Some("a (root)"));
		assert_eq!(view.nodes[1].label.as_deref(), Some("a/b (child 1)"));
	}
}
