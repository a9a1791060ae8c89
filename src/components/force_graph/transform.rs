//! Dataset-to-renderable-graph transformation.
//!
//! Two passes, both pure and deterministic: inverse-relation normalization,
//! then union-node synthesis for two-parent children. Downstream code (layout,
//! renderer, legend) only ever sees the output of these passes.

use std::collections::{BTreeMap, BTreeSet};

use super::types::{GraphData, GraphLink, GraphNode, NodeType};

/// Canonical parentage direction. "child" links are stored inverted in some
/// datasets; we rewrite them so grouping only has to look at one kind.
pub fn normalize_inverse_links(links: Vec<GraphLink>) -> Vec<GraphLink> {
	links
		.into_iter()
		.map(|l| {
			if l.relation == "child" {
				GraphLink {
					source: l.target,
					target: l.source,
					relation: "parent".into(),
				}
			} else {
				l
			}
		})
		.collect()
}

fn union_id(a: &str, b: &str) -> String {
	let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
	format!("union:{lo}|{hi}")
}

/// Reroutes two-parent parentage through synthetic union nodes.
///
/// For each child with exactly two distinct parents A and B, the direct
/// A→child and B→child edges are replaced by A→union, B→union ("union") and
/// union→child ("parent"). One union node exists per unordered parent pair no
/// matter how many children it has. Children with zero, one, or more than two
/// distinct parents keep their direct edges; every non-parent link passes
/// through untouched. Re-running the transform on its own output synthesizes
/// nothing new, since grouping ignores "union" edges.
pub fn build_union_graph(g: GraphData) -> GraphData {
	let mut nodes = g.nodes;
	let links = g.links;

	// childId -> distinct parent ids, in stable order.
	let mut parents_by_child: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
	for l in &links {
		if l.relation == "parent" {
			parents_by_child
				.entry(l.target.clone())
				.or_default()
				.insert(l.source.clone());
		}
	}

	let generation_of = |nodes: &[GraphNode], id: &str| -> f64 {
		nodes
			.iter()
			.find(|n| n.id == id)
			.map(|n| n.generation)
			.unwrap_or(0.0)
	};

	let mut new_links: Vec<GraphLink> = links
		.iter()
		.filter(|l| l.relation != "parent")
		.cloned()
		.collect();

	let mut union_pairs: BTreeSet<String> = BTreeSet::new();

	for (child, parents) in &parents_by_child {
		if parents.len() == 2 {
			let mut it = parents.iter();
			let (p1, p2) = (it.next().unwrap(), it.next().unwrap());
			let key = union_id(p1, p2);

			if union_pairs.insert(key.clone()) {
				let generation =
					(generation_of(&nodes, p1) + generation_of(&nodes, p2)) / 2.0;
				nodes.push(GraphNode {
					id: key.clone(),
					label: String::new(),
					kind: NodeType::Union,
					generation,
					img: None,
					is_union: true,
				});
				// Parent->union edges belong to the pair, not the child, so
				// they are emitted once even when the pair has many children.
				for p in [p1, p2] {
					new_links.push(GraphLink {
						source: p.clone(),
						target: key.clone(),
						relation: "union".into(),
					});
				}
			}
			new_links.push(GraphLink {
				source: key,
				target: child.clone(),
				relation: "parent".into(),
			});
		} else {
			// 0, 1, or >2 parents: single-parent births and the odd
			// many-parent myth keep their direct edges.
			for p in parents {
				new_links.push(GraphLink {
					source: p.clone(),
					target: child.clone(),
					relation: "parent".into(),
				});
			}
		}
	}

	GraphData {
		nodes,
		links: new_links,
	}
}
